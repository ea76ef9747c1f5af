//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every threshold the conditioning and routing code depends on (deadzone,
//! mode thresholds, axis range, inversion flags) lives here as a named,
//! defaulted field rather than a hard-coded constant, so tests can inject
//! synthetic values.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Full-scale raw value of the 10-bit ADC.
pub const RAW_MAX: u16 = 1023;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub adc: AdcConfig,
    #[serde(default)]
    pub buttons: ButtonConfig,
    #[serde(default)]
    pub axes: AxesConfig,
    #[serde(default)]
    pub mode: ModeConfig,
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub adapter: AdapterConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// MCP3008 ADC configuration (axes and mode selector)
#[derive(Debug, Deserialize, Clone)]
pub struct AdcConfig {
    #[serde(default = "default_spi_bus")]
    pub spi_bus: u8,

    #[serde(default = "default_chip_select")]
    pub chip_select: u8,

    #[serde(default = "default_clock_hz")]
    pub clock_hz: u32,

    #[serde(default = "default_channel_x")]
    pub channel_x: u8,

    #[serde(default = "default_channel_y")]
    pub channel_y: u8,

    #[serde(default = "default_channel_z")]
    pub channel_z: u8,

    #[serde(default = "default_channel_mode")]
    pub channel_mode: u8,
}

/// Button GPIO configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ButtonConfig {
    /// BCM pin numbers for the 7 buttons. Index 0 is the stick's own
    /// button, 1-6 are the auxiliary buttons. Lines are active-low with
    /// internal pull-ups.
    #[serde(default = "default_button_pins")]
    pub pins: Vec<u8>,
}

/// Axis conditioning configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AxesConfig {
    /// Raw counts around the calibrated center treated as neutral.
    #[serde(default = "default_deadzone")]
    pub deadzone: u16,

    /// Symmetric logical axis range: outputs span [-axis_max, axis_max].
    #[serde(default = "default_axis_max")]
    pub axis_max: i32,

    #[serde(default)]
    pub invert_x: bool,

    #[serde(default = "default_invert_y")]
    pub invert_y: bool,

    #[serde(default)]
    pub invert_z: bool,
}

/// Mode selector thresholds
#[derive(Debug, Deserialize, Clone)]
pub struct ModeConfig {
    /// Readings below this select the rotational-axes layout.
    #[serde(default = "default_mode_low")]
    pub low: u16,

    /// Readings above this select the driving layout.
    #[serde(default = "default_mode_high")]
    pub high: u16,
}

/// Startup calibration configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CalibrationConfig {
    #[serde(default = "default_calibration_samples")]
    pub samples: u32,
}

/// Control loop / output device configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AdapterConfig {
    #[serde(default = "default_update_rate_hz")]
    pub update_rate_hz: u32,

    #[serde(default = "default_device_name")]
    pub device_name: String,
}

/// Telemetry configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_log_interval_ms")]
    pub log_interval_ms: u64,
}

// Default value functions
fn default_spi_bus() -> u8 { 0 }
fn default_chip_select() -> u8 { 0 }
fn default_clock_hz() -> u32 { 1_350_000 }
fn default_channel_x() -> u8 { 0 }
fn default_channel_y() -> u8 { 1 }
fn default_channel_z() -> u8 { 2 }
fn default_channel_mode() -> u8 { 3 }

fn default_button_pins() -> Vec<u8> { vec![21, 2, 3, 4, 5, 6, 7] }

fn default_deadzone() -> u16 { 30 }
fn default_axis_max() -> i32 { 400 }
fn default_invert_y() -> bool { true }

fn default_mode_low() -> u16 { 128 }
fn default_mode_high() -> u16 { 895 }

fn default_calibration_samples() -> u32 { 256 }

fn default_update_rate_hz() -> u32 { 125 }
fn default_device_name() -> String { "Mode-Switched Joystick".to_string() }

fn default_log_dir() -> String { "./logs".to_string() }
fn default_log_interval_ms() -> u64 { 100 }

impl Default for AdcConfig {
    fn default() -> Self {
        Self {
            spi_bus: default_spi_bus(),
            chip_select: default_chip_select(),
            clock_hz: default_clock_hz(),
            channel_x: default_channel_x(),
            channel_y: default_channel_y(),
            channel_z: default_channel_z(),
            channel_mode: default_channel_mode(),
        }
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self { pins: default_button_pins() }
    }
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            deadzone: default_deadzone(),
            axis_max: default_axis_max(),
            invert_x: false,
            invert_y: default_invert_y(),
            invert_z: false,
        }
    }
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self { low: default_mode_low(), high: default_mode_high() }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self { samples: default_calibration_samples() }
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            update_rate_hz: default_update_rate_hz(),
            device_name: default_device_name(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            log_interval_ms: default_log_interval_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adc: AdcConfig::default(),
            buttons: ButtonConfig::default(),
            axes: AxesConfig::default(),
            mode: ModeConfig::default(),
            calibration: CalibrationConfig::default(),
            adapter: AdapterConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if self.buttons.pins.len() != 7 {
            return Err(crate::error::AdapterError::Config(
                toml::de::Error::custom("buttons.pins must list exactly 7 BCM pins")
            ));
        }

        if self.adc.channel_x > 7
            || self.adc.channel_y > 7
            || self.adc.channel_z > 7
            || self.adc.channel_mode > 7
        {
            return Err(crate::error::AdapterError::Config(
                toml::de::Error::custom("adc channels must be between 0 and 7")
            ));
        }

        if self.axes.deadzone >= RAW_MAX / 2 {
            return Err(crate::error::AdapterError::Config(
                toml::de::Error::custom("axes.deadzone must be less than half the raw range")
            ));
        }

        if self.axes.axis_max <= 0 {
            return Err(crate::error::AdapterError::Config(
                toml::de::Error::custom("axes.axis_max must be greater than 0")
            ));
        }

        if self.mode.low >= self.mode.high || self.mode.high > RAW_MAX {
            return Err(crate::error::AdapterError::Config(
                toml::de::Error::custom("mode thresholds must satisfy low < high <= 1023")
            ));
        }

        if self.calibration.samples == 0 {
            return Err(crate::error::AdapterError::Config(
                toml::de::Error::custom("calibration.samples must be greater than 0")
            ));
        }

        if self.adapter.update_rate_hz == 0 || self.adapter.update_rate_hz > 1000 {
            return Err(crate::error::AdapterError::Config(
                toml::de::Error::custom("adapter.update_rate_hz must be between 1 and 1000")
            ));
        }

        if self.adapter.device_name.is_empty() {
            return Err(crate::error::AdapterError::Config(
                toml::de::Error::custom("adapter.device_name cannot be empty")
            ));
        }

        if self.telemetry.enabled && self.telemetry.log_dir.is_empty() {
            return Err(crate::error::AdapterError::Config(
                toml::de::Error::custom("telemetry.log_dir cannot be empty when enabled")
            ));
        }

        if self.telemetry.log_interval_ms == 0 || self.telemetry.log_interval_ms > 60000 {
            return Err(crate::error::AdapterError::Config(
                toml::de::Error::custom("telemetry.log_interval_ms must be between 1 and 60000")
            ));
        }

        Ok(())
    }
}
