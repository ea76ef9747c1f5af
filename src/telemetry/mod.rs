//! # Telemetry Module
//!
//! Optional JSONL logging of per-tick adapter state.
//!
//! When enabled, one record per logging interval is appended to a
//! timestamped `.jsonl` file: raw readings, conditioned axis values, the
//! active mode and the button states. Useful for checking calibration
//! drift and mode-switch wiring without attaching a joystick tester.
//!
//! Disabled by default; the control loop runs identically either way.

use chrono::Utc;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

use crate::config::TelemetryConfig;
use crate::error::Result;
use crate::io::BUTTON_COUNT;

/// One logged control-loop tick.
#[derive(Debug, Clone, Serialize)]
pub struct TickRecord {
    /// UTC timestamp, RFC 3339.
    pub timestamp: String,
    /// Active mode number (1-3).
    pub mode: u8,
    /// Raw axis readings [x, y, z].
    pub raw: [u16; 3],
    /// Raw mode selector reading.
    pub selector: u16,
    /// Conditioned axis values [x, y, z].
    pub conditioned: [i32; 3],
    /// Logical button states.
    pub buttons: [bool; BUTTON_COUNT],
}

impl TickRecord {
    /// Builds a record stamped with the current UTC time.
    #[must_use]
    pub fn now(
        mode: u8,
        raw: [u16; 3],
        selector: u16,
        conditioned: [i32; 3],
        buttons: [bool; BUTTON_COUNT],
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            mode,
            raw,
            selector,
            conditioned,
            buttons,
        }
    }
}

/// Rate-limited JSONL tick logger.
pub struct TelemetryLogger {
    writer: BufWriter<File>,
    path: PathBuf,
    interval: Duration,
    last_write: Option<Instant>,
    records_written: u64,
}

impl TelemetryLogger {
    /// Creates the log directory and opens a fresh timestamped file.
    ///
    /// # Errors
    ///
    /// Returns error if the directory or file cannot be created.
    pub fn create(config: &TelemetryConfig) -> Result<Self> {
        fs::create_dir_all(&config.log_dir)?;

        let name = format!("joystick-{}.jsonl", Utc::now().format("%Y%m%d-%H%M%S"));
        let path = PathBuf::from(&config.log_dir).join(name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        info!("telemetry log: {}", path.display());
        Ok(Self {
            writer: BufWriter::new(file),
            path,
            interval: Duration::from_millis(config.log_interval_ms),
            last_write: None,
            records_written: 0,
        })
    }

    /// Path of the active log file.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Number of records actually written (ticks inside the rate limit
    /// are dropped, not queued).
    #[must_use]
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Appends one record unless the logging interval has not elapsed.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the file write fails.
    pub fn log(&mut self, record: &TickRecord) -> Result<()> {
        if let Some(last) = self.last_write {
            if last.elapsed() < self.interval {
                return Ok(());
            }
        }

        let line = serde_json::to_string(record)
            .map_err(|e| crate::error::AdapterError::Device(e.to_string()))?;
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;

        self.last_write = Some(Instant::now());
        self.records_written += 1;
        Ok(())
    }
}
