//! # Joystick Adapter Library
//!
//! Turns a three-axis analog stick and seven buttons into a virtual HID
//! joystick with three mode-switched report layouts.
//!
//! This library provides the core functionality: startup calibration,
//! deadzone/range conditioning of raw ADC readings, mode classification
//! and routing, and the uinput output device.

pub mod config;
pub mod error;
pub mod hid;
pub mod io;
pub mod joystick;
pub mod telemetry;

#[cfg(test)]
mod pipeline_tests {
    //! End-to-end checks of one control tick against scripted hardware:
    //! calibrate, condition, route, flush to a recording sink.

    use crate::config::{Config, RAW_MAX};
    use crate::hid::device::mocks::RecordingSink;
    use crate::hid::device::ReportSink;
    use crate::hid::report::JoystickReport;
    use crate::io::mocks::{FixedButtons, ScriptedAnalog};
    use crate::io::{AnalogSource, ButtonSource, BUTTON_COUNT};
    use crate::joystick::calibration::Calibrator;
    use crate::joystick::conditioner::AxisConditioner;
    use crate::joystick::mode::{Mode, ModeRouter};

    fn conditioners_from(config: &Config, centers: [u16; 3]) -> [AxisConditioner; 3] {
        let inverts = [
            config.axes.invert_x,
            config.axes.invert_y,
            config.axes.invert_z,
        ];
        [0usize, 1, 2].map(|i| {
            AxisConditioner::new(
                centers[i],
                config.axes.deadzone,
                inverts[i],
                RAW_MAX,
                config.axes.axis_max,
            )
        })
    }

    fn tick(
        adc: &mut ScriptedAnalog,
        buttons: &mut FixedButtons,
        sink: &mut RecordingSink,
        conditioners: &[AxisConditioner; 3],
        router: &ModeRouter,
        report: &mut JoystickReport,
    ) -> Mode {
        for index in 0..BUTTON_COUNT {
            report.set_button(index, buttons.is_pressed(index).unwrap());
        }
        let values = [0u8, 1, 2].map(|ch| {
            let raw = adc.read(ch).unwrap();
            conditioners[ch as usize].condition(raw)
        });
        let selector = adc.read(3).unwrap();
        let mode = router.route(selector, values[0], values[1], values[2], report);
        sink.send_state(report).unwrap();
        mode
    }

    #[test]
    fn test_resting_stick_sends_all_neutral() {
        let config = Config::default();
        let mut adc = ScriptedAnalog::new();
        let mut buttons = FixedButtons::none();
        let mut sink = RecordingSink::new();

        let centers = Calibrator::new([0, 1, 2], config.calibration.samples)
            .calibrate(&mut adc)
            .unwrap();
        let conditioners = conditioners_from(&config, [centers.x, centers.y, centers.z]);
        let router = ModeRouter::new(&config.mode);

        adc.set_resting(3, 500); // linear mode
        let mut report = JoystickReport::new();
        let mode = tick(&mut adc, &mut buttons, &mut sink, &conditioners, &router, &mut report);

        assert_eq!(mode, Mode::Linear);
        assert_eq!(*sink.last().unwrap(), JoystickReport::new());
    }

    #[test]
    fn test_driving_tick_with_pulled_back_stick() {
        let config = Config::default();
        let mut adc = ScriptedAnalog::new();
        let mut buttons = FixedButtons::none();
        let mut sink = RecordingSink::new();

        let centers = Calibrator::new([0, 1, 2], config.calibration.samples)
            .calibrate(&mut adc)
            .unwrap();
        let conditioners = conditioners_from(&config, [centers.x, centers.y, centers.z]);
        let router = ModeRouter::new(&config.mode);

        // Selector into driving, stick pushed right and pulled fully back.
        // Y is inverted in the default config, so a low raw reading means
        // the stick is pulled back toward the operator -> brake.
        adc.set_resting(0, 1023);
        adc.set_resting(1, 1023);
        adc.set_resting(3, 950);
        buttons.pressed[0] = true;

        let mut report = JoystickReport::new();
        let mode = tick(&mut adc, &mut buttons, &mut sink, &conditioners, &router, &mut report);

        assert_eq!(mode, Mode::Driving);
        let sent = sink.last().unwrap();
        assert_eq!(sent.steering, 400);
        assert_eq!(sent.accelerator, 0);
        assert_eq!(sent.brake, 400);
        assert_eq!(sent.x, 0);
        assert_eq!(sent.rx, 0);
        assert!(sent.button(0));
    }

    #[test]
    fn test_mode_flip_between_ticks_drops_stale_channels() {
        let config = Config::default();
        let mut adc = ScriptedAnalog::new();
        let mut buttons = FixedButtons::none();
        let mut sink = RecordingSink::new();

        let centers = Calibrator::new([0, 1, 2], config.calibration.samples)
            .calibrate(&mut adc)
            .unwrap();
        let conditioners = conditioners_from(&config, [centers.x, centers.y, centers.z]);
        let router = ModeRouter::new(&config.mode);

        adc.set_resting(0, 1023); // stick held right throughout
        let mut report = JoystickReport::new();

        adc.set_resting(3, 950); // driving
        tick(&mut adc, &mut buttons, &mut sink, &conditioners, &router, &mut report);
        assert_eq!(sink.last().unwrap().steering, 400);

        adc.set_resting(3, 50); // flipped to rotational
        tick(&mut adc, &mut buttons, &mut sink, &conditioners, &router, &mut report);
        let sent = sink.last().unwrap();
        assert_eq!(sent.steering, 0, "stale steering must be zeroed");
        assert_eq!(sent.rx, 400);
    }
}
