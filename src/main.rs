//! # Joystick Adapter
//!
//! Three-axis analog joystick to virtual HID adapter with mode-switched
//! report layouts.
//!
//! Reads the stick and mode selector through an MCP3008 ADC, the seven
//! buttons through GPIO, and presents a uinput joystick whose report
//! layout follows the hardware mode switch.

use anyhow::Result;
use tokio::time::{interval, Duration};
use tracing::{debug, info};

use joystick_adapter::config::{AdcConfig, Config};
use joystick_adapter::error::Result as AdapterResult;
use joystick_adapter::hid::device::{ReportSink, VirtualJoystick};
use joystick_adapter::hid::report::JoystickReport;
use joystick_adapter::io::{AnalogSource, ButtonSource, GpioButtons, Mcp3008, BUTTON_COUNT};
use joystick_adapter::joystick::calibration::Calibrator;
use joystick_adapter::joystick::conditioner::AxisConditioner;
use joystick_adapter::joystick::mode::{Mode, ModeRouter};
use joystick_adapter::telemetry::{TelemetryLogger, TickRecord};

/// Config file used when no path is given on the command line.
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Number of ticks between status log messages.
const LOG_INTERVAL_TICKS: u64 = 1000;

/// Main entry point for the joystick adapter
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration (defaults if no file is present)
///    - Open the ADC and claim the button GPIO lines
///    - Run the blocking calibration pass (stick must rest untouched)
///    - Create the uinput joystick with its axis ranges
///
/// 2. **Main Loop**
///    - One tick per interval: read buttons, read and condition the three
///      axes, classify the mode selector, route into the report, flush
///    - A failed tick is logged and skipped; the next tick re-reads
///      everything, which is the only recovery mechanism needed
///    - Log status every [`LOG_INTERVAL_TICKS`] ticks
///
/// 3. **Graceful Shutdown**
///    - Ctrl+C stops the loop and logs the total tick count
///
/// # Errors
///
/// Returns error if the ADC, GPIO lines or uinput device cannot be opened,
/// or if calibration reads fail.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Joystick Adapter v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = if std::path::Path::new(&config_path).exists() {
        info!("loading configuration from {config_path}");
        Config::load(&config_path)?
    } else {
        info!("no config file at {config_path}, using defaults");
        Config::default()
    };

    let mut adc = Mcp3008::open(&config.adc)?;
    let mut buttons = GpioButtons::open(&config.buttons)?;

    // Blocking calibration prefix: the loop must not run during it and the
    // stick has to be at rest.
    info!(
        "calibrating stick centers over {} samples, do not touch the stick",
        config.calibration.samples
    );
    let channels = [
        config.adc.channel_x,
        config.adc.channel_y,
        config.adc.channel_z,
    ];
    let centers = Calibrator::new(channels, config.calibration.samples).calibrate(&mut adc)?;

    let raw_max = joystick_adapter::config::RAW_MAX;
    let conditioners = [
        AxisConditioner::new(centers.x, config.axes.deadzone, config.axes.invert_x, raw_max, config.axes.axis_max),
        AxisConditioner::new(centers.y, config.axes.deadzone, config.axes.invert_y, raw_max, config.axes.axis_max),
        AxisConditioner::new(centers.z, config.axes.deadzone, config.axes.invert_z, raw_max, config.axes.axis_max),
    ];
    let router = ModeRouter::new(&config.mode);

    let mut sink = VirtualJoystick::create(&config.adapter.device_name, config.axes.axis_max)?;

    let mut telemetry = if config.telemetry.enabled {
        Some(TelemetryLogger::create(&config.telemetry)?)
    } else {
        None
    };

    let period_us = 1_000_000 / u64::from(config.adapter.update_rate_hz);
    let mut tick_interval = interval(Duration::from_micros(period_us));

    info!(
        "starting control loop at {}Hz",
        config.adapter.update_rate_hz
    );
    info!("Press Ctrl+C to exit");

    let mut report = JoystickReport::new();
    let mut tick_count: u64 = 0;
    let mut last_log_count: u64 = 0;

    // Main control loop
    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                match run_tick(
                    &mut adc,
                    &mut buttons,
                    &mut sink,
                    &conditioners,
                    &router,
                    &config.adc,
                    &mut report,
                    telemetry.as_mut(),
                ) {
                    Ok(mode) => {
                        tick_count += 1;
                        if tick_count - last_log_count >= LOG_INTERVAL_TICKS {
                            info!(
                                "sent {} reports, current mode {} ({:?})",
                                tick_count, mode.number(), mode
                            );
                            last_log_count = tick_count;
                        }
                    }
                    Err(e) => {
                        debug!("tick failed, skipping: {e}");
                    }
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                info!("Total reports sent: {tick_count}");
                break;
            }
        }
    }

    Ok(())
}

/// Runs one control-loop tick: read everything, condition, route, flush.
#[allow(clippy::too_many_arguments)]
fn run_tick<A, B, S>(
    adc: &mut A,
    buttons: &mut B,
    sink: &mut S,
    conditioners: &[AxisConditioner; 3],
    router: &ModeRouter,
    adc_channels: &AdcConfig,
    report: &mut JoystickReport,
    telemetry: Option<&mut TelemetryLogger>,
) -> AdapterResult<Mode>
where
    A: AnalogSource,
    B: ButtonSource,
    S: ReportSink,
{
    for index in 0..BUTTON_COUNT {
        report.set_button(index, buttons.is_pressed(index)?);
    }

    let raw_x = adc.read(adc_channels.channel_x)?;
    let raw_y = adc.read(adc_channels.channel_y)?;
    let raw_z = adc.read(adc_channels.channel_z)?;
    let x = conditioners[0].condition(raw_x);
    let y = conditioners[1].condition(raw_y);
    let z = conditioners[2].condition(raw_z);

    let selector = adc.read(adc_channels.channel_mode)?;
    let mode = router.route(selector, x, y, z, report);

    sink.send_state(report)?;

    if let Some(logger) = telemetry {
        logger.log(&TickRecord::now(
            mode.number(),
            [raw_x, raw_y, raw_z],
            selector,
            [x, y, z],
            report.buttons(),
        ))?;
    }

    Ok(mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_interval_constant() {
        // At the default 125Hz, 1000 ticks is 8 seconds between status lines
        assert_eq!(LOG_INTERVAL_TICKS, 1000);
    }

    #[test]
    fn test_tick_period_calculation() {
        let period_us = 1_000_000u64 / 125;
        assert_eq!(period_us, 8000, "default rate should give an 8ms tick");
    }

    #[test]
    fn test_default_config_path() {
        assert_eq!(DEFAULT_CONFIG_PATH, "config/default.toml");
    }
}
