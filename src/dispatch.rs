//! Round-robin poll over the three input sources

use crate::interpreter::ScanCodeInterpreter;
use crate::joystick::{JoystickInput, JoystickSampler};
use crate::matrix::Crosspoint;
use crate::wiring;

/// Owns both joystick samplers and the scan-code interpreter, giving each
/// one turn per poll round. Nothing here blocks; the caller loops forever.
pub struct Dispatcher {
    left: JoystickSampler,
    right: JoystickSampler,
    keyboard: ScanCodeInterpreter,
}

impl Dispatcher {
    pub const fn new() -> Self {
        Dispatcher {
            left: JoystickSampler::new(wiring::LEFT_JOYSTICK),
            right: JoystickSampler::new(wiring::RIGHT_JOYSTICK),
            keyboard: ScanCodeInterpreter::new(),
        }
    }

    /// One round: left stick, right stick, then at most one scan code.
    /// `scan_code` is popped by the caller, under whatever critical
    /// section its buffer needs; `None` when the buffer was empty.
    pub fn poll<M: Crosspoint>(
        &mut self,
        left: JoystickInput,
        right: JoystickInput,
        scan_code: Option<u8>,
        matrix: &mut M,
    ) -> Result<(), M::Error> {
        self.left.poll(left, matrix)?;
        self.right.poll(right, matrix)?;
        if let Some(code) = scan_code {
            self.keyboard.process(code, matrix)?;
        }
        Ok(())
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::testutil::RecordingMatrix;
    use crate::wiring::{KEY_A, LEFT_JOYSTICK, RIGHT_JOYSTICK};

    #[test]
    fn polls_left_stick_then_right_stick_then_keyboard() {
        let mut dispatcher = Dispatcher::new();
        let mut matrix = RecordingMatrix::new();

        dispatcher
            .poll(
                JoystickInput::from_bits(JoystickInput::UP),
                JoystickInput::from_bits(JoystickInput::DOWN),
                Some(0x1C),
                &mut matrix,
            )
            .unwrap();

        let left_up = matrix
            .calls
            .iter()
            .position(|c| *c == (true, LEFT_JOYSTICK.up))
            .unwrap();
        let right_down = matrix
            .calls
            .iter()
            .position(|c| *c == (true, RIGHT_JOYSTICK.down))
            .unwrap();
        let key_a = matrix
            .calls
            .iter()
            .position(|c| *c == (true, KEY_A.addresses().next().unwrap()))
            .unwrap();
        assert!(left_up < right_down && right_down < key_a);
    }

    #[test]
    fn empty_buffer_means_no_keyboard_activity() {
        let mut dispatcher = Dispatcher::new();
        let mut matrix = RecordingMatrix::new();

        let center = JoystickInput::from_bits(0);
        dispatcher.poll(center, center, None, &mut matrix).unwrap();
        assert!(matrix.calls.is_empty());
    }

    #[test]
    fn the_sticks_do_not_share_debounce_state() {
        let mut dispatcher = Dispatcher::new();
        let mut matrix = RecordingMatrix::new();

        let up = JoystickInput::from_bits(JoystickInput::UP);
        let center = JoystickInput::from_bits(0);
        dispatcher.poll(up, center, None, &mut matrix).unwrap();
        matrix.calls.clear();

        // Only the right stick changes; the left stays quiet.
        dispatcher.poll(up, up, None, &mut matrix).unwrap();
        assert!(matrix.calls.iter().any(|c| *c == (true, RIGHT_JOYSTICK.up)));
        assert!(!matrix.calls.iter().any(|c| *c == (true, LEFT_JOYSTICK.up)));
    }
}
