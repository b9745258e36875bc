//! Samples an Atari-style joystick into switch transitions

use embedded_hal::digital::v2::InputPin;
use heapless::Vec;

use crate::matrix::{Crosspoint, SwitchAddress};
use crate::wiring::JoystickSwitches;

/// One logical snapshot of the six joystick lines, active high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoystickInput(u8);

impl JoystickInput {
    pub const UP: u8 = 0x01;
    pub const DOWN: u8 = 0x02;
    pub const LEFT: u8 = 0x04;
    pub const RIGHT: u8 = 0x08;
    pub const BUTTON_1: u8 = 0x10;
    pub const BUTTON_2: u8 = 0x20;

    pub const fn from_bits(bits: u8) -> Self {
        JoystickInput(bits & 0x3F)
    }

    pub const fn button1(self) -> bool {
        self.0 & Self::BUTTON_1 != 0
    }

    pub const fn button2(self) -> bool {
        self.0 & Self::BUTTON_2 != 0
    }

    const fn direction_bits(self) -> u8 {
        self.0 & 0x0F
    }
}

/// Reads the active-low lines in the order up, down, left, right,
/// button 1, button 2, normalizing to active-high logic.
pub fn read_lines<E, P: InputPin<Error = E>>(lines: &mut Vec<P, 6>) -> Result<JoystickInput, E> {
    let mut bits = 0;
    for (i, line) in lines.iter_mut().enumerate() {
        if line.is_low()? {
            bits |= 1 << i;
        }
    }
    Ok(JoystickInput::from_bits(bits))
}

/// The eight real travel states of the stick, or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Neutral,
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownRight,
    DownLeft,
}

impl Direction {
    /// Any combination other than the eight real ones, such as opposite
    /// directions held at once, reads as neutral.
    fn decode(bits: u8) -> Self {
        match bits {
            0x01 => Direction::Up,
            0x02 => Direction::Down,
            0x04 => Direction::Left,
            0x08 => Direction::Right,
            0x05 => Direction::UpLeft,
            0x09 => Direction::UpRight,
            0x0A => Direction::DownRight,
            0x06 => Direction::DownLeft,
            _ => Direction::Neutral,
        }
    }

    /// The crosspoints this travel state holds closed: one for a
    /// cardinal direction, three for a diagonal (both cardinals plus the
    /// dedicated diagonal contact), closed in that listed order.
    fn switches(self, map: &JoystickSwitches) -> Vec<SwitchAddress, 3> {
        let mut needed = Vec::new();
        match self {
            Direction::Neutral => {}
            Direction::Up => needed.extend([map.up]),
            Direction::Down => needed.extend([map.down]),
            Direction::Left => needed.extend([map.left]),
            Direction::Right => needed.extend([map.right]),
            Direction::UpLeft => needed.extend([map.up_left_extra, map.up, map.left]),
            Direction::UpRight => {
                needed.extend([map.up_right_down_left_extra, map.up, map.right])
            }
            Direction::DownRight => needed.extend([map.down_right_extra, map.down, map.right]),
            Direction::DownLeft => {
                needed.extend([map.up_right_down_left_extra, map.down, map.left])
            }
        }
        needed
    }
}

/// Debounces one joystick by change detection and keeps its crosspoints
/// in step with the latest snapshot.
pub struct JoystickSampler {
    switches: JoystickSwitches,
    previous: JoystickInput,
}

impl JoystickSampler {
    pub const fn new(switches: JoystickSwitches) -> Self {
        JoystickSampler {
            switches,
            previous: JoystickInput::from_bits(0),
        }
    }

    /// Compares the snapshot against the previous poll and, on change,
    /// re-drives the buttons and the direction crosspoints. Every
    /// direction switch the new state does not need is opened before any
    /// switch is closed: two electrically conflicting directions must
    /// never be closed at once, even transiently.
    pub fn poll<M: Crosspoint>(
        &mut self,
        input: JoystickInput,
        matrix: &mut M,
    ) -> Result<(), M::Error> {
        if input == self.previous {
            return Ok(());
        }

        matrix.set(input.button1(), self.switches.button1)?;
        matrix.set(input.button2(), self.switches.button2)?;

        let needed = Direction::decode(input.direction_bits()).switches(&self.switches);
        for address in self.switches.directions() {
            if !needed.contains(&address) {
                matrix.set(false, address)?;
            }
        }
        for &address in &needed {
            matrix.set(true, address)?;
        }

        self.previous = input;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec as StdVec;

    use super::*;
    use crate::testutil::RecordingMatrix;
    use crate::wiring::LEFT_JOYSTICK;

    fn poll(sampler: &mut JoystickSampler, bits: u8) -> RecordingMatrix {
        let mut matrix = RecordingMatrix::new();
        sampler.poll(JoystickInput::from_bits(bits), &mut matrix).unwrap();
        matrix
    }

    /// Direction calls only, skipping the two leading button calls.
    fn direction_calls(matrix: &RecordingMatrix) -> StdVec<(bool, SwitchAddress)> {
        matrix.calls[2..].to_vec()
    }

    #[test]
    fn stable_snapshot_is_a_no_op() {
        let mut sampler = JoystickSampler::new(LEFT_JOYSTICK);
        let matrix = poll(&mut sampler, JoystickInput::UP);
        assert!(!matrix.calls.is_empty());

        let matrix = poll(&mut sampler, JoystickInput::UP);
        assert!(matrix.calls.is_empty());
    }

    #[test]
    fn cardinal_direction_closes_one_crosspoint() {
        let mut sampler = JoystickSampler::new(LEFT_JOYSTICK);
        let matrix = poll(&mut sampler, JoystickInput::UP);

        assert_eq!(matrix.closed(), [LEFT_JOYSTICK.up]);
        assert_eq!(direction_calls(&matrix).len(), 7);
    }

    #[test]
    fn diagonal_closes_three_crosspoints() {
        let mut sampler = JoystickSampler::new(LEFT_JOYSTICK);
        let matrix = poll(&mut sampler, JoystickInput::UP | JoystickInput::LEFT);

        assert_eq!(
            matrix.closed(),
            [
                LEFT_JOYSTICK.up_left_extra,
                LEFT_JOYSTICK.up,
                LEFT_JOYSTICK.left,
            ]
        );
    }

    #[test]
    fn every_open_precedes_every_close() {
        let mut sampler = JoystickSampler::new(LEFT_JOYSTICK);
        poll(&mut sampler, JoystickInput::UP | JoystickInput::LEFT);
        let matrix = poll(&mut sampler, JoystickInput::DOWN | JoystickInput::RIGHT);

        let calls = direction_calls(&matrix);
        let first_close = calls.iter().position(|(on, _)| *on).unwrap();
        assert!(calls[..first_close].iter().all(|(on, _)| !on));
        assert!(calls[first_close..].iter().all(|(on, _)| *on));
        assert_eq!(
            matrix.closed(),
            [
                LEFT_JOYSTICK.down_right_extra,
                LEFT_JOYSTICK.down,
                LEFT_JOYSTICK.right,
            ]
        );
    }

    #[test]
    fn opposite_directions_read_as_neutral() {
        let mut sampler = JoystickSampler::new(LEFT_JOYSTICK);
        poll(&mut sampler, JoystickInput::UP);
        let matrix = poll(&mut sampler, JoystickInput::UP | JoystickInput::DOWN);

        assert!(matrix.closed().is_empty());
        assert_eq!(direction_calls(&matrix).len(), 7);
    }

    #[test]
    fn returning_to_center_opens_all_direction_crosspoints() {
        let mut sampler = JoystickSampler::new(LEFT_JOYSTICK);
        poll(&mut sampler, JoystickInput::UP | JoystickInput::RIGHT);
        let matrix = poll(&mut sampler, 0);

        assert!(matrix.closed().is_empty());
        let opened = matrix.opened();
        for address in LEFT_JOYSTICK.directions() {
            assert!(opened.contains(&address));
        }
    }

    #[test]
    fn buttons_are_driven_independently_of_direction() {
        let mut sampler = JoystickSampler::new(LEFT_JOYSTICK);
        let matrix = poll(&mut sampler, JoystickInput::UP | JoystickInput::BUTTON_1);

        assert_eq!(matrix.calls[0], (true, LEFT_JOYSTICK.button1));
        assert_eq!(matrix.calls[1], (false, LEFT_JOYSTICK.button2));
        assert!(matrix.closed().contains(&LEFT_JOYSTICK.up));

        // Releasing the button leaves the held direction closed.
        let matrix = poll(&mut sampler, JoystickInput::UP);
        assert_eq!(matrix.calls[0], (false, LEFT_JOYSTICK.button1));
        assert_eq!(matrix.closed(), [LEFT_JOYSTICK.up]);
    }
}
