//! # Startup Calibration Module
//!
//! Establishes the neutral (resting) raw value of each stick axis.
//!
//! The stick must be left untouched while the adapter starts. The first
//! reading of each axis seeds a running value; every further round folds a
//! fresh reading in by halving (`running = (sample + running) / 2`). This
//! is an exponential smoother rather than an arithmetic mean (recent samples
//! weigh more), but on a resting stick it converges on the resting value
//! and is exact for a constant input.
//!
//! Centers are computed once per run and are immutable afterwards; there is
//! no recalibration path and nothing is persisted across restarts.

use tracing::info;

use crate::config::RAW_MAX;
use crate::error::Result;
use crate::io::AnalogSource;

/// Calibrated neutral raw value per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisCenters {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

/// Samples the three stick axes and produces their resting centers.
#[derive(Debug, Clone, Copy)]
pub struct Calibrator {
    channels: [u8; 3],
    samples: u32,
}

impl Calibrator {
    /// Creates a calibrator for the given ADC channels.
    ///
    /// # Arguments
    ///
    /// * `channels` - ADC channels of the X, Y and Z axes, in that order
    /// * `samples` - Total readings folded into each center (at least 1)
    #[must_use]
    pub fn new(channels: [u8; 3], samples: u32) -> Self {
        Self {
            channels,
            samples: samples.max(1),
        }
    }

    /// Runs the calibration pass. Blocks for `samples` rounds of three
    /// analog reads; the control loop must not run concurrently.
    ///
    /// Each axis is smoothed against its own previous running value, and
    /// every reading is clamped into the 10-bit range before averaging so
    /// a glitched conversion cannot poison the center.
    ///
    /// # Errors
    ///
    /// Returns error if an underlying analog read fails.
    pub fn calibrate<S: AnalogSource>(&self, source: &mut S) -> Result<AxisCenters> {
        let mut centers = [
            self.read_clamped(source, 0)?,
            self.read_clamped(source, 1)?,
            self.read_clamped(source, 2)?,
        ];

        for _ in 1..self.samples {
            for axis in 0..3 {
                let sample = self.read_clamped(source, axis)?;
                centers[axis] = (sample + centers[axis]) / 2;
            }
        }

        let centers = AxisCenters {
            x: centers[0],
            y: centers[1],
            z: centers[2],
        };
        info!(
            "calibration complete after {} samples: x={} y={} z={}",
            self.samples, centers.x, centers.y, centers.z
        );
        Ok(centers)
    }

    fn read_clamped<S: AnalogSource>(&self, source: &mut S, axis: usize) -> Result<u16> {
        Ok(source.read(self.channels[axis])?.min(RAW_MAX))
    }
}
