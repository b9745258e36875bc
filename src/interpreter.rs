//! Turns received scan codes into key-switch transitions

use crate::keymap::{lookup, ScanAction};
use crate::matrix::Crosspoint;

/// Interprets one scan code at a time, carrying the sticky release and
/// extended prefix flags between calls. The flags survive until a code
/// resolves to a real key action or turns out to be of no interest; a
/// bare prefix, or a keypad code suppressed by the extended prefix,
/// leaves them untouched.
#[derive(Debug, Default)]
pub struct ScanCodeInterpreter {
    release_pending: bool,
    extended_pending: bool,
}

impl ScanCodeInterpreter {
    pub const fn new() -> Self {
        ScanCodeInterpreter {
            release_pending: false,
            extended_pending: false,
        }
    }

    pub fn process<M: Crosspoint>(&mut self, code: u8, matrix: &mut M) -> Result<(), M::Error> {
        let Some(action) = lookup(code) else {
            // Keys of no interest still clear the prefix flags, so a
            // stray prefix cannot leak into the next real key.
            self.release_pending = false;
            self.extended_pending = false;
            return Ok(());
        };

        let resolved = match action {
            ScanAction::ReleasePrefix => {
                self.release_pending = true;
                None
            }
            ScanAction::ExtendedPrefix => {
                self.extended_pending = true;
                None
            }
            ScanAction::Key(pair) => Some(pair),
            ScanAction::NotExtended(pair) => (!self.extended_pending).then_some(pair),
            ScanAction::Contextual { plain, extended } => Some(if self.extended_pending {
                extended
            } else {
                plain
            }),
        };

        if let Some(pair) = resolved {
            let close = !self.release_pending;
            for address in pair.addresses() {
                matrix.set(close, address)?;
            }
            self.release_pending = false;
            self.extended_pending = false;
        }
        Ok(())
    }
}
