//! Addresses and toggles crosspoints of the MT8816 analog switch array

use embedded_hal::digital::v2::OutputPin;
use heapless::Vec;

/// One crosspoint coordinate, encoded `ruYYXXXX`: X select in the low
/// nibble, Y select in bits 4-5, bit 7 reserved as the "no switch action"
/// flag. Always expressed in logical coordinates; the hardware remap is
/// applied only when the address is written to the select lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchAddress(u8);

impl SwitchAddress {
    /// Sentinel that must never be presented to the select lines.
    pub const NO_ACTION: Self = Self(0b1000_0000);

    pub const fn new(row: u8, column: u8) -> Self {
        Self(row | column)
    }

    pub const fn x(self) -> u8 {
        self.0 & 0x0F
    }

    pub const fn y(self) -> u8 {
        (self.0 >> 4) & 0x03
    }

    pub const fn is_no_action(self) -> bool {
        self.0 & Self::NO_ACTION.0 != 0
    }
}

/// The MT8816 address decode truth table is not in ascending order over
/// X6-X13 ("switch connections are not in ascending order" per the
/// datasheet); this permutation restores logical X0-X15 addressing.
const X_REMAP: [u8; 16] = [0, 1, 2, 3, 4, 5, 8, 9, 10, 11, 12, 13, 6, 7, 14, 15];

/// Seam between the scan-code / joystick logic and the physical array.
pub trait Crosspoint {
    type Error;

    /// Closes (`on`) or opens one crosspoint.
    fn set(&mut self, on: bool, address: SwitchAddress) -> Result<(), Self::Error>;
}

/// Drives the MT8816 select, data and strobe lines. Every operation leaves
/// all lines back at zero.
pub struct CrosspointDriver<P> {
    x_select: Vec<P, 4>,
    y_select: Vec<P, 2>,
    data: P,
    strobe: P,
}

impl<E, P: OutputPin<Error = E>> CrosspointDriver<P> {
    pub fn new(x_select: Vec<P, 4>, y_select: Vec<P, 2>, data: P, strobe: P) -> Self {
        CrosspointDriver {
            x_select,
            y_select,
            data,
            strobe,
        }
    }

    /// Switches every crosspoint of the 16x4 array off. The array has no
    /// reset line wired, so this runs once at startup.
    pub fn reset(&mut self) -> Result<(), E> {
        for y in 0..4u8 {
            for x in 0..16u8 {
                self.set(false, SwitchAddress::new(y << 4, x))?;
            }
        }
        Ok(())
    }
}

impl<E, P: OutputPin<Error = E>> Crosspoint for CrosspointDriver<P> {
    type Error = E;

    fn set(&mut self, on: bool, address: SwitchAddress) -> Result<(), E> {
        debug_assert!(!address.is_no_action());

        let x = X_REMAP[address.x() as usize];
        let y = address.y();
        for (bit, pin) in self.x_select.iter_mut().enumerate() {
            pin.set_state(((x >> bit) & 1 == 1).into())?;
        }
        for (bit, pin) in self.y_select.iter_mut().enumerate() {
            pin.set_state(((y >> bit) & 1 == 1).into())?;
        }
        self.data.set_state(on.into())?;

        self.strobe.set_high()?;

        // The address must still be valid when the strobe falls.
        self.strobe.set_low()?;
        self.data.set_low()?;
        for pin in self.x_select.iter_mut().chain(self.y_select.iter_mut()) {
            pin.set_low()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec as StdVec;

    use super::*;

    type Log = Rc<RefCell<StdVec<(&'static str, bool)>>>;

    #[derive(Clone)]
    struct LogPin {
        name: &'static str,
        log: Log,
    }

    impl LogPin {
        fn new(name: &'static str, log: &Log) -> Self {
            LogPin {
                name,
                log: log.clone(),
            }
        }
    }

    impl OutputPin for LogPin {
        type Error = core::convert::Infallible;

        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push((self.name, false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push((self.name, true));
            Ok(())
        }
    }

    fn driver(log: &Log) -> CrosspointDriver<LogPin> {
        let mut x_select = Vec::new();
        x_select.extend([
            LogPin::new("x0", log),
            LogPin::new("x1", log),
            LogPin::new("x2", log),
            LogPin::new("x3", log),
        ]);
        let mut y_select = Vec::new();
        y_select.extend([LogPin::new("y0", log), LogPin::new("y1", log)]);
        CrosspointDriver::new(x_select, y_select, LogPin::new("data", log), LogPin::new("strobe", log))
    }

    #[test]
    fn remap_is_a_permutation() {
        let mut seen = X_REMAP;
        seen.sort_unstable();
        assert_eq!(seen, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn remap_spot_values() {
        assert_eq!(X_REMAP[0], 0);
        assert_eq!(X_REMAP[6], 8);
        assert_eq!(X_REMAP[11], 13);
        assert_eq!(X_REMAP[12], 6);
        assert_eq!(X_REMAP[13], 7);
        assert_eq!(X_REMAP[15], 15);
    }

    #[test]
    fn close_pulses_strobe_with_remapped_address() {
        let log: Log = Default::default();
        let mut driver = driver(&log);

        // Logical X=12 remaps to 6 (0b0110), Y=1.
        driver.set(true, SwitchAddress::new(0x10, 12)).unwrap();

        assert_eq!(
            *log.borrow(),
            [
                ("x0", false),
                ("x1", true),
                ("x2", true),
                ("x3", false),
                ("y0", true),
                ("y1", false),
                ("data", true),
                ("strobe", true),
                ("strobe", false),
                ("data", false),
                ("x0", false),
                ("x1", false),
                ("x2", false),
                ("x3", false),
                ("y0", false),
                ("y1", false),
            ]
        );
    }

    #[test]
    fn open_drives_data_low_under_strobe() {
        let log: Log = Default::default();
        let mut driver = driver(&log);

        driver.set(false, SwitchAddress::new(0x00, 0)).unwrap();

        let events = log.borrow();
        let strobe_up = events.iter().position(|e| *e == ("strobe", true)).unwrap();
        assert_eq!(events[..strobe_up].iter().filter(|(name, on)| *name == "data" && *on).count(), 0);
    }

    #[test]
    fn reset_opens_all_64_crosspoints() {
        let log: Log = Default::default();
        let mut driver = driver(&log);

        driver.reset().unwrap();

        let events = log.borrow();
        let pulses = events.iter().filter(|e| **e == ("strobe", true)).count();
        assert_eq!(pulses, 64);
        assert!(events.iter().all(|(name, on)| *name != "data" || !on));
    }
}
