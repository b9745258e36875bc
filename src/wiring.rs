//! Physical wiring of the CreatiVision controller ports to the switch array
//!
//! Crosspoint rows (Y select, plus X bit 3 for the right-hand half of the
//! array) connect to the console PIA port A pins, columns to port B.
//! X0-X7 / Y0-Y1 serve the left controller, X8-X15 / Y2-Y3 the right one.
//! Pin numbering follows the CreatiVision schematic, which counts the
//! controller plug pins 1-10 left to right looking into the plug.

use paste::paste;

use crate::matrix::SwitchAddress;

pub const PIA_PA0: u8 = 0b0000_0000;
pub const PIA_PA1: u8 = 0b0001_0000;
pub const PIA_PA2: u8 = 0b0010_1000;
pub const PIA_PA3: u8 = 0b0011_1000;

pub const PIA_PB0: u8 = 0b0000_0000;
pub const PIA_PB1: u8 = 0b0000_0001;
pub const PIA_PB2: u8 = 0b0000_0010;
pub const PIA_PB3: u8 = 0b0000_0011;
pub const PIA_PB4: u8 = 0b0000_0100;
pub const PIA_PB5: u8 = 0b0000_0101;
pub const PIA_PB6: u8 = 0b0000_0110;
pub const PIA_PB7: u8 = 0b0000_0111;

/// The crosspoints closed by one physical key. Most keys are double-pole
/// and close two; a few close one, leaving `b` at the no-action sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchPair {
    a: SwitchAddress,
    b: SwitchAddress,
}

impl SwitchPair {
    pub const fn single(a: SwitchAddress) -> Self {
        SwitchPair {
            a,
            b: SwitchAddress::NO_ACTION,
        }
    }

    pub const fn double(a: SwitchAddress, b: SwitchAddress) -> Self {
        SwitchPair { a, b }
    }

    /// The one or two real addresses, in emission order.
    pub fn addresses(self) -> impl Iterator<Item = SwitchAddress> {
        [self.a, self.b].into_iter().filter(|a| !a.is_no_action())
    }
}

macro_rules! key_switches {
    ($key:tt: $row:ident -> $a:ident + $b:ident) => {
        paste! {
            pub const [<KEY_ $key>]: SwitchPair = SwitchPair::double(
                SwitchAddress::new($row, $a),
                SwitchAddress::new($row, $b),
            );
        }
    };
    ($key:tt: $row:ident -> $a:ident) => {
        paste! {
            pub const [<KEY_ $key>]: SwitchPair =
                SwitchPair::single(SwitchAddress::new($row, $a));
        }
    };
}

// Left controller keyboard (24 keys)
key_switches!(1: PIA_PA0 -> PIA_PB3 + PIA_PB2);
key_switches!(2: PIA_PA1 -> PIA_PB5 + PIA_PB4);
key_switches!(3: PIA_PA1 -> PIA_PB5 + PIA_PB6);
key_switches!(4: PIA_PA1 -> PIA_PB5 + PIA_PB3);
key_switches!(5: PIA_PA1 -> PIA_PB6 + PIA_PB3);
key_switches!(6: PIA_PA1 -> PIA_PB6 + PIA_PB4);
key_switches!(CTRL: PIA_PA0 -> PIA_PB7);
key_switches!(Q: PIA_PA1 -> PIA_PB4 + PIA_PB3);
key_switches!(W: PIA_PA1 -> PIA_PB3 + PIA_PB2);
key_switches!(E: PIA_PA1 -> PIA_PB4 + PIA_PB2);
key_switches!(R: PIA_PA1 -> PIA_PB5 + PIA_PB2);
key_switches!(T: PIA_PA1 -> PIA_PB6 + PIA_PB2);
key_switches!(LEFT_ARROW: PIA_PA1 -> PIA_PB3 + PIA_PB0);
key_switches!(A: PIA_PA1 -> PIA_PB4 + PIA_PB0);
key_switches!(S: PIA_PA1 -> PIA_PB5 + PIA_PB0);
key_switches!(D: PIA_PA1 -> PIA_PB6 + PIA_PB0);
key_switches!(F: PIA_PA1 -> PIA_PB1 + PIA_PB0);
key_switches!(G: PIA_PA1 -> PIA_PB2 + PIA_PB0);
key_switches!(SHIFT: PIA_PA1 -> PIA_PB7);
key_switches!(Z: PIA_PA1 -> PIA_PB3 + PIA_PB1);
key_switches!(X: PIA_PA1 -> PIA_PB4 + PIA_PB1);
key_switches!(C: PIA_PA1 -> PIA_PB5 + PIA_PB1);
key_switches!(V: PIA_PA1 -> PIA_PB6 + PIA_PB1);
key_switches!(B: PIA_PA1 -> PIA_PB2 + PIA_PB1);

// Right controller keyboard (24 keys)
key_switches!(7: PIA_PA3 -> PIA_PB1 + PIA_PB2);
key_switches!(8: PIA_PA3 -> PIA_PB6 + PIA_PB1);
key_switches!(9: PIA_PA3 -> PIA_PB5 + PIA_PB1);
key_switches!(0: PIA_PA3 -> PIA_PB4 + PIA_PB1);
key_switches!(COLON: PIA_PA3 -> PIA_PB3 + PIA_PB1);
key_switches!(MINUS: PIA_PA3 -> PIA_PB7);
key_switches!(Y: PIA_PA3 -> PIA_PB0 + PIA_PB2);
key_switches!(U: PIA_PA3 -> PIA_PB0 + PIA_PB1);
key_switches!(I: PIA_PA3 -> PIA_PB6 + PIA_PB0);
key_switches!(O: PIA_PA3 -> PIA_PB5 + PIA_PB0);
key_switches!(P: PIA_PA3 -> PIA_PB4 + PIA_PB0);
key_switches!(RETURN: PIA_PA3 -> PIA_PB3 + PIA_PB0);
key_switches!(H: PIA_PA3 -> PIA_PB6 + PIA_PB2);
key_switches!(J: PIA_PA3 -> PIA_PB5 + PIA_PB2);
key_switches!(K: PIA_PA3 -> PIA_PB4 + PIA_PB2);
key_switches!(L: PIA_PA3 -> PIA_PB3 + PIA_PB2);
key_switches!(SEMICOLON: PIA_PA3 -> PIA_PB4 + PIA_PB3);
key_switches!(N: PIA_PA3 -> PIA_PB6 + PIA_PB4);
key_switches!(M: PIA_PA3 -> PIA_PB6 + PIA_PB3);
key_switches!(COMMA: PIA_PA3 -> PIA_PB5 + PIA_PB3);
key_switches!(PERIOD: PIA_PA3 -> PIA_PB6 + PIA_PB5);
key_switches!(SLASH: PIA_PA3 -> PIA_PB5 + PIA_PB4);
key_switches!(RIGHT_ARROW: PIA_PA2 -> PIA_PB7);
key_switches!(SPACE: PIA_PA2 -> PIA_PB3 + PIA_PB2);

/// The crosspoints one joystick drives: four cardinal directions, the
/// three dedicated diagonal-travel contacts, and both buttons.
#[derive(Debug, Clone, Copy)]
pub struct JoystickSwitches {
    pub up: SwitchAddress,
    pub down: SwitchAddress,
    pub left: SwitchAddress,
    pub right: SwitchAddress,
    pub up_left_extra: SwitchAddress,
    pub up_right_down_left_extra: SwitchAddress,
    pub down_right_extra: SwitchAddress,
    pub button1: SwitchAddress,
    pub button2: SwitchAddress,
}

impl JoystickSwitches {
    /// Every direction-related crosspoint, buttons excluded.
    pub const fn directions(&self) -> [SwitchAddress; 7] {
        [
            self.up,
            self.down,
            self.left,
            self.right,
            self.up_left_extra,
            self.up_right_down_left_extra,
            self.down_right_extra,
        ]
    }
}

pub const LEFT_JOYSTICK: JoystickSwitches = JoystickSwitches {
    up: SwitchAddress::new(PIA_PA0, PIA_PB3),
    down: SwitchAddress::new(PIA_PA0, PIA_PB1),
    left: SwitchAddress::new(PIA_PA0, PIA_PB5),
    right: SwitchAddress::new(PIA_PA0, PIA_PB2),
    up_left_extra: SwitchAddress::new(PIA_PA0, PIA_PB4),
    up_right_down_left_extra: SwitchAddress::new(PIA_PA0, PIA_PB6),
    down_right_extra: SwitchAddress::new(PIA_PA0, PIA_PB0),
    button1: SwitchAddress::new(PIA_PA0, PIA_PB7),
    button2: SwitchAddress::new(PIA_PA1, PIA_PB7),
};

pub const RIGHT_JOYSTICK: JoystickSwitches = JoystickSwitches {
    up: SwitchAddress::new(PIA_PA2, PIA_PB3),
    down: SwitchAddress::new(PIA_PA2, PIA_PB1),
    left: SwitchAddress::new(PIA_PA2, PIA_PB5),
    right: SwitchAddress::new(PIA_PA2, PIA_PB2),
    up_left_extra: SwitchAddress::new(PIA_PA2, PIA_PB4),
    up_right_down_left_extra: SwitchAddress::new(PIA_PA2, PIA_PB6),
    down_right_extra: SwitchAddress::new(PIA_PA2, PIA_PB0),
    button1: SwitchAddress::new(PIA_PA2, PIA_PB7),
    button2: SwitchAddress::new(PIA_PA3, PIA_PB7),
};
