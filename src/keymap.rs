//! Maps PS/2 set-2 scan codes to CreatiVision key switches
//!
//! Keys are mapped by their unshifted PS/2 legend. The CreatiVision has
//! separate ':' and ';' keys, so the PS/2 quote key doubles as ':'; its
//! backspace doubles as the left-arrow key.

use crate::wiring::{self, SwitchPair};

/// What a received scan code means, before the sticky prefix flags are
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAction {
    /// `0xF0`, the break prefix: the next resolved key is a release.
    ReleasePrefix,
    /// `0xE0`/`0xE1`: the code that follows uses its extended reading.
    ExtendedPrefix,
    /// Resolves to the same switches with or without the extended prefix.
    Key(SwitchPair),
    /// Keypad codes whose extended counterpart is of no interest (and the
    /// fake-shift code): resolve only while the extended prefix is off.
    NotExtended(SwitchPair),
    /// Codes shared between a keypad key and a cursor key.
    Contextual {
        plain: SwitchPair,
        extended: SwitchPair,
    },
}

/// The closed table of recognized codes. Everything else is a key the
/// CreatiVision does not have.
pub fn lookup(code: u8) -> Option<ScanAction> {
    use wiring::*;
    use ScanAction::*;

    Some(match code {
        0xF0 => ReleasePrefix,
        0xE0 | 0xE1 => ExtendedPrefix,

        // Left controller keyboard (24 keys)
        0x16 => Key(KEY_1),
        0x69 => NotExtended(KEY_1), // keypad '1'
        0x1E => Key(KEY_2),
        0x72 => NotExtended(KEY_2), // keypad '2'
        0x26 => Key(KEY_3),
        0x7A => NotExtended(KEY_3), // keypad '3'
        0x25 => Key(KEY_4),
        0x2E => Key(KEY_5),
        0x73 => Key(KEY_5), // keypad '5'
        0x36 => Key(KEY_6),
        0x15 => Key(KEY_Q),
        0x1D => Key(KEY_W),
        0x24 => Key(KEY_E),
        0x2D => Key(KEY_R),
        0x2C => Key(KEY_T),
        0x6B => Contextual {
            plain: KEY_4, // keypad '4'
            extended: KEY_LEFT_ARROW,
        },
        0x66 => Key(KEY_LEFT_ARROW), // backspace
        0x1C => Key(KEY_A),
        0x1B => Key(KEY_S),
        0x23 => Key(KEY_D),
        0x2B => Key(KEY_F),
        0x34 => Key(KEY_G),
        0x12 => NotExtended(KEY_SHIFT), // left shift; E0 12 is the fake shift
        0x59 => Key(KEY_SHIFT),         // right shift
        0x1A => Key(KEY_Z),
        0x22 => Key(KEY_X),
        0x21 => Key(KEY_C),
        0x2A => Key(KEY_V),
        0x32 => Key(KEY_B),
        0x14 => Key(KEY_CTRL), // left or right ctrl

        // Right controller keyboard (24 keys)
        0x3D => Key(KEY_7),
        0x6C => NotExtended(KEY_7), // keypad '7'
        0x3E => Key(KEY_8),
        0x75 => NotExtended(KEY_8), // keypad '8'
        0x46 => Key(KEY_9),
        0x7D => NotExtended(KEY_9), // keypad '9'
        0x45 => Key(KEY_0),
        0x70 => NotExtended(KEY_0), // keypad '0'
        0x52 => Key(KEY_COLON),     // PS/2 quote
        0x4E => Key(KEY_MINUS),
        0x7B => Key(KEY_MINUS), // keypad '-'
        0x35 => Key(KEY_Y),
        0x3C => Key(KEY_U),
        0x43 => Key(KEY_I),
        0x44 => Key(KEY_O),
        0x4D => Key(KEY_P),
        0x5A => Key(KEY_RETURN), // enter, main or keypad
        0x33 => Key(KEY_H),
        0x3B => Key(KEY_J),
        0x42 => Key(KEY_K),
        0x4B => Key(KEY_L),
        0x4C => Key(KEY_SEMICOLON),
        0x31 => Key(KEY_N),
        0x3A => Key(KEY_M),
        0x41 => Key(KEY_COMMA),
        0x49 => Key(KEY_PERIOD),
        0x71 => NotExtended(KEY_PERIOD), // keypad '.'
        0x4A => Key(KEY_SLASH),          // '/', main or keypad
        0x74 => Contextual {
            plain: KEY_6, // keypad '6'
            extended: KEY_RIGHT_ARROW,
        },
        0x29 => Key(KEY_SPACE),

        _ => return None,
    })
}
