//! # Joystick Module
//!
//! Analog signal conditioning and mode-dependent routing.
//!
//! This module handles:
//! - Startup calibration of the stick's resting centers
//! - Per-tick deadzone filtering, range remapping and direction correction
//! - Classifying the mode selector and routing axis values into the
//!   active report layout

pub mod calibration;
pub mod conditioner;
pub mod mode;
