//! # HID Output Module
//!
//! The virtual joystick the host sees: the per-tick report state and the
//! uinput device that flushes it.

pub mod device;
pub mod report;
