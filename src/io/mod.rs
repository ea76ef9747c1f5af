//! # Hardware Input Module
//!
//! Analog and digital input collaborators for the control loop.
//!
//! The three stick axes and the mode selector are read through an MCP3008
//! 10-bit ADC on SPI, so raw readings span exactly 0-1023. The seven
//! buttons are active-low GPIO lines with internal pull-ups; the raw level
//! is inverted here so callers see `true` when a button is held.
//!
//! Both sides are behind small traits ([`AnalogSource`], [`ButtonSource`])
//! so calibration, conditioning and the control loop can be tested against
//! scripted inputs without hardware.

use rppal::gpio::{Gpio, InputPin};
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};
use tracing::debug;

use crate::config::{AdcConfig, ButtonConfig};
use crate::error::{AdapterError, Result};

/// Number of button lines the adapter drives (stick button + 6 auxiliary).
pub const BUTTON_COUNT: usize = 7;

/// Source of raw analog readings in the range 0-1023.
pub trait AnalogSource {
    /// Reads one ADC channel (0-7).
    fn read(&mut self, channel: u8) -> Result<u16>;
}

/// Source of logical button states (`true` = pressed).
pub trait ButtonSource {
    /// Reads button `index` (0-6). Index 0 is the stick's own button.
    fn is_pressed(&mut self, index: usize) -> Result<bool>;
}

/// MCP3008 ADC on the Raspberry Pi SPI bus.
pub struct Mcp3008 {
    spi: Spi,
}

impl Mcp3008 {
    /// Opens the SPI bus and chip select named in the config.
    ///
    /// # Errors
    ///
    /// Returns error if the bus cannot be opened or the config names a
    /// bus/chip-select combination the board does not expose.
    pub fn open(config: &AdcConfig) -> Result<Self> {
        let bus = match config.spi_bus {
            0 => Bus::Spi0,
            1 => Bus::Spi1,
            other => {
                return Err(AdapterError::Device(format!(
                    "unsupported SPI bus {other}"
                )))
            }
        };
        let slave = match config.chip_select {
            0 => SlaveSelect::Ss0,
            1 => SlaveSelect::Ss1,
            2 => SlaveSelect::Ss2,
            other => {
                return Err(AdapterError::Device(format!(
                    "unsupported chip select {other}"
                )))
            }
        };

        let spi = Spi::new(bus, slave, config.clock_hz, Mode::Mode0)?;
        debug!("MCP3008 opened on SPI{} CS{}", config.spi_bus, config.chip_select);
        Ok(Self { spi })
    }
}

impl AnalogSource for Mcp3008 {
    fn read(&mut self, channel: u8) -> Result<u16> {
        if channel > 7 {
            return Err(AdapterError::Device(format!(
                "ADC channel {channel} out of range"
            )));
        }

        // Single-ended conversion: start bit, SGL/DIFF + channel, clock-out byte.
        let tx = [0x01, 0x80 | (channel << 4), 0x00];
        let mut rx = [0u8; 3];
        self.spi.transfer(&mut rx, &tx)?;

        let value = (u16::from(rx[1] & 0x03) << 8) | u16::from(rx[2]);
        Ok(value)
    }
}

/// Active-low button lines on GPIO with internal pull-ups.
pub struct GpioButtons {
    pins: Vec<InputPin>,
}

impl GpioButtons {
    /// Claims the seven BCM pins named in the config as pull-up inputs.
    ///
    /// # Errors
    ///
    /// Returns error if the GPIO peripheral cannot be opened or a pin is
    /// already claimed by another process.
    pub fn open(config: &ButtonConfig) -> Result<Self> {
        let gpio = Gpio::new()?;
        let mut pins = Vec::with_capacity(config.pins.len());
        for &pin in &config.pins {
            pins.push(gpio.get(pin)?.into_input_pullup());
        }
        debug!("claimed {} button pins: {:?}", pins.len(), config.pins);
        Ok(Self { pins })
    }
}

impl ButtonSource for GpioButtons {
    fn is_pressed(&mut self, index: usize) -> Result<bool> {
        let pin = self.pins.get(index).ok_or_else(|| {
            AdapterError::Device(format!("button index {index} out of range"))
        })?;
        // Pull-up wiring: line reads low while the button is held.
        Ok(pin.is_low())
    }
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::collections::VecDeque;

    /// Scripted analog source for testing.
    ///
    /// Each channel holds a queue of readings; once the queue is drained
    /// the channel keeps returning its configured resting value, mimicking
    /// a stick that settles after being moved.
    pub struct ScriptedAnalog {
        queues: [VecDeque<u16>; 8],
        resting: [u16; 8],
    }

    impl ScriptedAnalog {
        pub fn new() -> Self {
            Self {
                queues: Default::default(),
                resting: [512; 8],
            }
        }

        /// Sets the value a channel returns once its script is exhausted.
        pub fn set_resting(&mut self, channel: u8, value: u16) {
            self.resting[channel as usize] = value;
        }

        /// Queues readings to be returned in order for a channel.
        pub fn push_readings(&mut self, channel: u8, values: &[u16]) {
            self.queues[channel as usize].extend(values.iter().copied());
        }
    }

    impl AnalogSource for ScriptedAnalog {
        fn read(&mut self, channel: u8) -> Result<u16> {
            let idx = channel as usize;
            Ok(self.queues[idx]
                .pop_front()
                .unwrap_or(self.resting[idx]))
        }
    }

    /// Button source with fixed pressed/released states.
    pub struct FixedButtons {
        pub pressed: [bool; BUTTON_COUNT],
    }

    impl FixedButtons {
        pub fn none() -> Self {
            Self { pressed: [false; BUTTON_COUNT] }
        }
    }

    impl ButtonSource for FixedButtons {
        fn is_pressed(&mut self, index: usize) -> Result<bool> {
            Ok(self.pressed[index])
        }
    }
}
