//! # Axis Conditioner Module
//!
//! Turns raw ADC readings into signed logical axis values.
//!
//! ## Pipeline
//!
//! For each axis, every tick:
//!
//! 1. **Deadzone**: readings within `deadzone` counts of the calibrated
//!    center produce exactly 0, suppressing sensor noise and drift.
//! 2. **Linear remap**: the remaining raw range on each side of the
//!    deadzone is stretched onto the symmetric output range:
//!    `[center+deadzone, raw_max]` → `[0, axis_max]` above center,
//!    `[0, center-deadzone]` → `[-axis_max, 0]` below.
//! 3. **Direction**: the result is multiplied by ±1 so an axis can be
//!    inverted without rewiring.
//!
//! The remap is computed in floating point and rounded to nearest, so the
//! first raw step past the deadzone already registers as a non-zero
//! deflection. Outputs are clamped into `[-axis_max, axis_max]`; a noisy
//! reading can never push an out-of-range value into the HID report.
//!
//! ## Usage
//!
//! ```
//! use joystick_adapter::joystick::conditioner::AxisConditioner;
//!
//! let cond = AxisConditioner::new(512, 30, false, 1023, 400);
//!
//! assert_eq!(cond.condition(512), 0);    // at center
//! assert_eq!(cond.condition(542), 0);    // deadzone edge, inclusive
//! assert_eq!(cond.condition(1023), 400); // full deflection
//! assert_eq!(cond.condition(0), -400);
//! ```

/// Per-axis signal conditioning: deadzone, range remap, direction.
///
/// Deterministic given its parameters; one instance per physical axis,
/// constructed once after calibration.
#[derive(Debug, Clone, Copy)]
pub struct AxisConditioner {
    /// Calibrated neutral raw value.
    center: u16,
    /// Neutral band half-width in raw counts.
    deadzone: u16,
    /// +1 or -1, applied last.
    direction: i32,
    /// Upper raw bound (lower bound is 0).
    raw_max: u16,
    /// Symmetric output bound: outputs span [-axis_max, axis_max].
    axis_max: i32,
}

impl AxisConditioner {
    /// Creates a conditioner for one axis.
    ///
    /// # Arguments
    ///
    /// * `center` - Calibrated neutral raw value for this axis
    /// * `deadzone` - Half-width of the neutral band in raw counts
    /// * `inverted` - Flip the sign of the output
    /// * `raw_max` - Full-scale raw reading (1023 for a 10-bit ADC)
    /// * `axis_max` - Magnitude of the symmetric output range
    #[must_use]
    pub fn new(center: u16, deadzone: u16, inverted: bool, raw_max: u16, axis_max: i32) -> Self {
        Self {
            center: center.min(raw_max),
            deadzone,
            direction: if inverted { -1 } else { 1 },
            raw_max,
            axis_max: axis_max.max(1),
        }
    }

    /// Returns the calibrated center this conditioner was built with.
    #[must_use]
    pub fn center(&self) -> u16 {
        self.center
    }

    /// Conditions one raw reading into a signed logical axis value.
    ///
    /// # Examples
    ///
    /// ```
    /// use joystick_adapter::joystick::conditioner::AxisConditioner;
    ///
    /// let cond = AxisConditioner::new(512, 30, true, 1023, 400);
    /// // Inverted axis: full-scale reading maps to the negative end
    /// assert_eq!(cond.condition(1023), -400);
    /// ```
    #[must_use]
    pub fn condition(&self, raw: u16) -> i32 {
        let raw = i32::from(raw.min(self.raw_max));
        let center = i32::from(self.center);
        let deadzone = i32::from(self.deadzone);

        let out = if (raw - center).abs() <= deadzone {
            0
        } else if raw > center {
            remap(raw, center + deadzone, i32::from(self.raw_max), 0, self.axis_max)
        } else {
            remap(raw, 0, center - deadzone, -self.axis_max, 0)
        };

        (out * self.direction).clamp(-self.axis_max, self.axis_max)
    }
}

/// Linearly remaps `value` from `[in_min, in_max]` to `[out_min, out_max]`,
/// rounding to the nearest integer.
fn remap(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    let t = (value - in_min) as f32 / (in_max - in_min) as f32;
    ((out_min as f32) + t * (out_max - out_min) as f32).round() as i32
}
