//! # Joystick Report Module
//!
//! The aggregate output state flushed to the virtual device once per tick.
//!
//! ## Logical Channels
//!
//! | Channel | Range | Used by layout |
//! |---------------|----------------------|----------------|
//! | x, y, z | [-axis_max, axis_max] | Linear |
//! | rx, ry, rz | [-axis_max, axis_max] | Rotational |
//! | steering | [-axis_max, axis_max] | Driving |
//! | accelerator | [0, axis_max] | Driving |
//! | brake | [0, axis_max] | Driving |
//!
//! Seven buttons ride along in every layout; index 0 is the stick's own
//! button, 1-6 the auxiliary buttons.
//!
//! The output device retains whatever it was last sent, so the control
//! loop writes every channel every tick; [`JoystickReport::clear_axes`]
//! zeroes all nine axis channels before the active layout fills its own.

use crate::io::BUTTON_COUNT;

/// One tick's worth of output state.
///
/// # Examples
///
/// ```
/// use joystick_adapter::hid::report::JoystickReport;
///
/// let mut report = JoystickReport::new();
/// report.x = 150;
/// report.set_button(0, true);
/// report.clear_axes();
/// assert_eq!(report.x, 0);
/// assert!(report.button(0)); // buttons survive an axis clear
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoystickReport {
    /// Linear axes.
    pub x: i32,
    pub y: i32,
    pub z: i32,
    /// Rotational axes.
    pub rx: i32,
    pub ry: i32,
    pub rz: i32,
    /// Driving controls.
    pub steering: i32,
    pub accelerator: i32,
    pub brake: i32,
    buttons: [bool; BUTTON_COUNT],
}

impl JoystickReport {
    /// Creates a report with all axes centered and buttons released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes all nine axis channels; button states are untouched.
    pub fn clear_axes(&mut self) {
        self.x = 0;
        self.y = 0;
        self.z = 0;
        self.rx = 0;
        self.ry = 0;
        self.rz = 0;
        self.steering = 0;
        self.accelerator = 0;
        self.brake = 0;
    }

    /// Sets one button state. Indices outside 0-6 are ignored.
    pub fn set_button(&mut self, index: usize, pressed: bool) {
        if let Some(slot) = self.buttons.get_mut(index) {
            *slot = pressed;
        }
    }

    /// Returns one button state. Indices outside 0-6 read as released.
    #[must_use]
    pub fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    /// Returns all button states.
    #[must_use]
    pub fn buttons(&self) -> [bool; BUTTON_COUNT] {
        self.buttons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_neutral() {
        let report = JoystickReport::new();
        assert_eq!(report.x, 0);
        assert_eq!(report.steering, 0);
        assert_eq!(report.brake, 0);
        for i in 0..BUTTON_COUNT {
            assert!(!report.button(i));
        }
    }

    #[test]
    fn test_clear_axes_zeroes_all_nine_channels() {
        let mut report = JoystickReport::new();
        report.x = 1;
        report.y = 2;
        report.z = 3;
        report.rx = 4;
        report.ry = 5;
        report.rz = 6;
        report.steering = 7;
        report.accelerator = 8;
        report.brake = 9;

        report.clear_axes();
        assert_eq!(report, JoystickReport::new());
    }

    #[test]
    fn test_clear_axes_keeps_buttons() {
        let mut report = JoystickReport::new();
        report.set_button(3, true);
        report.clear_axes();
        assert!(report.button(3));
    }

    #[test]
    fn test_button_roundtrip() {
        let mut report = JoystickReport::new();
        report.set_button(0, true);
        report.set_button(6, true);
        assert!(report.button(0));
        assert!(!report.button(1));
        assert!(report.button(6));

        report.set_button(0, false);
        assert!(!report.button(0));
    }

    #[test]
    fn test_out_of_range_button_index_is_ignored() {
        let mut report = JoystickReport::new();
        report.set_button(99, true);
        assert!(!report.button(99));
        assert_eq!(report, JoystickReport::new());
    }
}
