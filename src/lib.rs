//! # WindKit
//!
//! A G-code toolpath generator for two-axis filament winding machines:
//! a carriage moving along the mandrel (`X`) and the mandrel's rotation
//! (`Z`, in degrees).
//!
//! ## Architecture
//!
//! WindKit is organized as a workspace with multiple crates:
//!
//! 1. **windkit-core** - Layer model, coercion, number rendering
//! 2. **windkit-settings** - Machine configuration and wind schedule loading
//! 3. **windkit-camtools** - Winder state, helical planning, wind calculator
//! 4. **windkit** - Command line binary that integrates all crates

pub use windkit_core::{
    format_coordinate, HelicalWind, HelicalWindParams, HoopWind, Layer, LayerError, WindType,
};

pub use windkit_settings::{
    ConfigError, MachineConfig, Schedule, ScheduleLayer, ScheduleWarning, SettingsError,
    SettingsResult,
};

pub use windkit_camtools::{
    generate_program, plan_indexed_wind, plan_wind, CamToolError, Diagnostic, HelicalGeometry, MotionError,
    PlanError, ProgramSummary, WindCalculation, WindCalculator, WindProgram,
    WindProgramGenerator, Winder,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Default output file for generated programs
pub const DEFAULT_OUTPUT: &str = "windGcode.nc";

/// Initialize logging with the default configuration
///
/// Log lines go to stderr so a program piped to stdout stays clean.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// One line describing a layer, as printed by `windkit info`
pub fn describe_layer(index: usize, layer: &Layer) -> String {
    match layer {
        Layer::Hoop(hoop) => format!(
            "{}: hoop, tow {} x {}, {}",
            index,
            hoop.tow_width(),
            hoop.tow_thickness(),
            if hoop.is_single_pass() {
                "single pass"
            } else {
                "double pass"
            }
        ),
        Layer::Helical(helical) => format!(
            "{}: helical, tow {} x {}, {} deg, {} starts, lock {}{}",
            index,
            helical.tow_width(),
            helical.tow_thickness(),
            helical.wind_angle(),
            helical.num_starts(),
            helical.lock_angle(),
            if helical.skip_initial_lock() {
                ", no initial lock"
            } else {
                ""
            }
        ),
    }
}
