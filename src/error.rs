//! # Error Types
//!
//! Custom error types for the joystick adapter using `thiserror`.

use thiserror::Error;

/// Main error type for the joystick adapter
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// GPIO access errors (button lines)
    #[error("GPIO error: {0}")]
    Gpio(#[from] rppal::gpio::Error),

    /// SPI access errors (ADC)
    #[error("SPI error: {0}")]
    Spi(#[from] rppal::spi::Error),

    /// Virtual output device errors
    #[error("Output device error: {0}")]
    Device(String),
}

/// Result type alias for the joystick adapter
pub type Result<T> = std::result::Result<T, AdapterError>;
