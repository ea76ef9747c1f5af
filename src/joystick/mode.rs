//! # Mode Router Module
//!
//! Classifies the analog mode selector and routes conditioned axis values
//! into one of three mutually exclusive report layouts.
//!
//! ## Layouts
//!
//! | Selector reading | Mode | Layout |
//! |-------------------|------|-----------------------------------|
//! | above `high` | 1 | steering / accelerator / brake |
//! | `low` ..= `high` | 2 | X / Y / Z linear axes |
//! | below `low` | 3 | Rx / Ry / Rz rotational axes |
//!
//! Both thresholds are inclusive on the center band: readings equal to
//! `low` or `high` classify as mode 2. Classification is a pure function
//! of the current reading, with no hysteresis or retained state, so the
//! layout can flip on any tick. The router zeroes the channels of the two
//! inactive layouts every tick; the output device would otherwise keep
//! reporting stale values from a previous mode.
//!
//! In the driving layout the Y axis splits into two pedals: pushing
//! forward (positive) drives the accelerator, pulling back (negative)
//! drives the brake with the magnitude, and neutral releases both. The Z
//! axis is unused in that layout.

use crate::config::ModeConfig;
use crate::hid::report::JoystickReport;

/// Output layout selected by the mode switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Mode 1: steering wheel with accelerator and brake pedals.
    Driving,
    /// Mode 2: plain X/Y/Z linear axes (selector center band).
    Linear,
    /// Mode 3: Rx/Ry/Rz rotational axes.
    Rotational,
}

impl Mode {
    /// Mode number as labelled on the hardware switch.
    #[must_use]
    pub fn number(&self) -> u8 {
        match self {
            Mode::Driving => 1,
            Mode::Linear => 2,
            Mode::Rotational => 3,
        }
    }
}

/// Routes conditioned axis values into the layout the selector picks.
#[derive(Debug, Clone, Copy)]
pub struct ModeRouter {
    low: u16,
    high: u16,
}

impl ModeRouter {
    /// Creates a router with the configured selector thresholds.
    #[must_use]
    pub fn new(config: &ModeConfig) -> Self {
        Self {
            low: config.low,
            high: config.high,
        }
    }

    /// Classifies a raw selector reading. Total over all readings:
    /// exactly one mode for every possible value.
    #[must_use]
    pub fn classify(&self, selector_raw: u16) -> Mode {
        if selector_raw < self.low {
            Mode::Rotational
        } else if selector_raw > self.high {
            Mode::Driving
        } else {
            Mode::Linear
        }
    }

    /// Routes one tick's conditioned axis values into the report.
    ///
    /// All nine axis channels are written every call; the two inactive
    /// layouts are zeroed. Returns the classified mode.
    pub fn route(
        &self,
        selector_raw: u16,
        x: i32,
        y: i32,
        z: i32,
        report: &mut JoystickReport,
    ) -> Mode {
        let mode = self.classify(selector_raw);
        report.clear_axes();

        match mode {
            Mode::Driving => {
                report.steering = x;
                if y > 0 {
                    report.accelerator = y;
                } else if y < 0 {
                    report.brake = -y;
                }
                // z is unused while driving
            }
            Mode::Linear => {
                report.x = x;
                report.y = y;
                report.z = z;
            }
            Mode::Rotational => {
                report.rx = x;
                report.ry = y;
                report.rz = z;
            }
        }

        mode
    }
}
