//! # Virtual Device Module
//!
//! Presents the adapter to the host as a uinput joystick.
//!
//! The device is created once at startup with its axis ranges declared in
//! the uinput absolute-axis setup: the six stick axes and the steering
//! wheel are symmetric around zero, while the two pedals are one-sided.
//!
//! | Logical channel | evdev axis |
//! |-----------------|------------|
//! | x, y, z | ABS_X, ABS_Y, ABS_Z |
//! | rx, ry, rz | ABS_RX, ABS_RY, ABS_RZ |
//! | steering | ABS_WHEEL |
//! | accelerator | ABS_GAS |
//! | brake | ABS_BRAKE |
//!
//! Buttons map onto the classic joystick key range starting at
//! BTN_TRIGGER. Every flush emits all sixteen events in one batch so the
//! kernel delivers the report atomically (evdev appends the SYN marker).

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AbsInfo, AbsoluteAxisType, AttributeSet, EventType, InputEvent, Key, UinputAbsSetup};
use tracing::info;

use crate::error::Result;
use crate::hid::report::JoystickReport;
use crate::io::BUTTON_COUNT;

/// Key codes for the seven buttons, report index order.
const BUTTON_KEYS: [Key; BUTTON_COUNT] = [
    Key::BTN_TRIGGER,
    Key::BTN_THUMB,
    Key::BTN_THUMB2,
    Key::BTN_TOP,
    Key::BTN_TOP2,
    Key::BTN_PINKIE,
    Key::BTN_BASE,
];

/// Sink for completed reports; the control loop flushes one per tick.
pub trait ReportSink {
    /// Sends the whole report as one atomic device update.
    fn send_state(&mut self, report: &JoystickReport) -> Result<()>;
}

/// Virtual joystick backed by a uinput device.
pub struct VirtualJoystick {
    device: VirtualDevice,
}

impl VirtualJoystick {
    /// Creates the uinput device and declares its channels and ranges.
    ///
    /// # Arguments
    ///
    /// * `name` - Device name shown to the host
    /// * `axis_max` - Magnitude of the symmetric axis range; pedals get
    ///   `[0, axis_max]`
    ///
    /// # Errors
    ///
    /// Returns error if `/dev/uinput` is not accessible.
    pub fn create(name: &str, axis_max: i32) -> Result<Self> {
        let mut keys = AttributeSet::<Key>::new();
        for key in BUTTON_KEYS {
            keys.insert(key);
        }

        let symmetric = AbsInfo::new(0, -axis_max, axis_max, 0, 0, 0);
        let pedal = AbsInfo::new(0, 0, axis_max, 0, 0, 0);

        let axes = [
            (AbsoluteAxisType::ABS_X, symmetric),
            (AbsoluteAxisType::ABS_Y, symmetric),
            (AbsoluteAxisType::ABS_Z, symmetric),
            (AbsoluteAxisType::ABS_RX, symmetric),
            (AbsoluteAxisType::ABS_RY, symmetric),
            (AbsoluteAxisType::ABS_RZ, symmetric),
            (AbsoluteAxisType::ABS_WHEEL, symmetric),
            (AbsoluteAxisType::ABS_GAS, pedal),
            (AbsoluteAxisType::ABS_BRAKE, pedal),
        ];

        let mut builder = VirtualDeviceBuilder::new()?.name(name).with_keys(&keys)?;
        for (axis, info) in axes {
            let setup = UinputAbsSetup::new(axis, info);
            builder = builder.with_absolute_axis(&setup)?;
        }

        let device = builder.build()?;
        info!("virtual joystick '{}' created (axis range ±{})", name, axis_max);
        Ok(Self { device })
    }
}

impl ReportSink for VirtualJoystick {
    fn send_state(&mut self, report: &JoystickReport) -> Result<()> {
        let mut events = Vec::with_capacity(9 + BUTTON_COUNT);

        events.push(InputEvent::new(EventType::ABSOLUTE, AbsoluteAxisType::ABS_X.0, report.x));
        events.push(InputEvent::new(EventType::ABSOLUTE, AbsoluteAxisType::ABS_Y.0, report.y));
        events.push(InputEvent::new(EventType::ABSOLUTE, AbsoluteAxisType::ABS_Z.0, report.z));
        events.push(InputEvent::new(EventType::ABSOLUTE, AbsoluteAxisType::ABS_RX.0, report.rx));
        events.push(InputEvent::new(EventType::ABSOLUTE, AbsoluteAxisType::ABS_RY.0, report.ry));
        events.push(InputEvent::new(EventType::ABSOLUTE, AbsoluteAxisType::ABS_RZ.0, report.rz));
        events.push(InputEvent::new(
            EventType::ABSOLUTE,
            AbsoluteAxisType::ABS_WHEEL.0,
            report.steering,
        ));
        events.push(InputEvent::new(
            EventType::ABSOLUTE,
            AbsoluteAxisType::ABS_GAS.0,
            report.accelerator,
        ));
        events.push(InputEvent::new(
            EventType::ABSOLUTE,
            AbsoluteAxisType::ABS_BRAKE.0,
            report.brake,
        ));

        for (index, key) in BUTTON_KEYS.iter().enumerate() {
            let state = i32::from(report.button(index));
            events.push(InputEvent::new(EventType::KEY, key.0, state));
        }

        self.device.emit(&events)?;
        Ok(())
    }
}

#[cfg(test)]
pub mod mocks {
    use super::*;

    /// Report sink that records everything flushed to it.
    #[derive(Default)]
    pub struct RecordingSink {
        pub sent: Vec<JoystickReport>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn last(&self) -> Option<&JoystickReport> {
            self.sent.last()
        }
    }

    impl ReportSink for RecordingSink {
        fn send_state(&mut self, report: &JoystickReport) -> Result<()> {
            self.sent.push(*report);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::RecordingSink;
    use super::*;

    #[test]
    fn test_button_keys_are_distinct() {
        for (i, a) in BUTTON_KEYS.iter().enumerate() {
            for b in &BUTTON_KEYS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_recording_sink_captures_reports() {
        let mut sink = RecordingSink::new();

        let mut report = JoystickReport::new();
        report.steering = 150;
        report.set_button(0, true);
        sink.send_state(&report).unwrap();

        report.clear_axes();
        sink.send_state(&report).unwrap();

        assert_eq!(sink.sent.len(), 2);
        assert_eq!(sink.sent[0].steering, 150);
        assert_eq!(sink.last().unwrap().steering, 0);
        assert!(sink.last().unwrap().button(0));
    }
}
