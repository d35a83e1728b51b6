//! Toolpath planning for a winding schedule
//!
//! The planner homes and zeroes the winder, then walks the schedule in
//! order and drives the [`Winder`] through each layer. Problems that only
//! affect part of the program (a layer whose starts cannot tile the
//! mandrel, a single out-of-bounds move) are reported as [`Diagnostic`]s
//! and planning carries on. Callers must inspect the diagnostics, not just
//! the program, to judge a run.

use crate::error::{CamToolResult, MotionError, PlanError};
use crate::stats::ProgramSummary;
use crate::winder::Winder;
use std::f64::consts::PI;
use std::fmt;
use std::path::Path;
use windkit_core::layer::{HelicalWind, HoopWind, Layer};
use windkit_settings::{MachineConfig, Schedule, ScheduleWarning};

/// Number of side-by-side circuits needed to cover the mandrel.
///
/// The tow is laid at `wind_angle` degrees to the axis, so its width
/// measured around the circumference is `tow_width / cos(wind_angle)`.
/// Returns `None` when the geometry gives no finite, positive count,
/// including any angle of 90 degrees or more from the axis.
pub fn circuit_count(mandrel_diameter: f64, tow_width: f64, wind_angle: f64) -> Option<i64> {
    if wind_angle.is_nan() || wind_angle.abs() >= 90.0 {
        return None;
    }

    let circumference = PI * mandrel_diameter;
    let effective_tow_width = tow_width / wind_angle.to_radians().cos();
    let circuits = (circumference / effective_tow_width).ceil();

    if circuits.is_finite() && circuits >= 1.0 && circuits <= i64::MAX as f64 {
        Some(circuits as i64)
    } else {
        None
    }
}

/// Derived geometry of one helical layer on a given mandrel
#[derive(Debug, Clone, PartialEq)]
pub struct HelicalGeometry {
    /// Mandrel circumference (in)
    pub circumference: f64,
    /// Tow width measured around the circumference (in)
    pub effective_tow_width: f64,
    /// Circuits needed for full coverage
    pub num_circuits: i64,
    /// Start positions per pattern
    pub num_starts: i64,
    /// Patterns needed for full coverage
    pub num_patterns: i64,
    /// Rotation between adjacent circuits (degrees)
    pub pass_step_angle: f64,
    /// Rotation accrued over one full-length pass (degrees)
    pub pass_angle: f64,
}

impl HelicalGeometry {
    /// Derive the geometry of `layer` on a mandrel of `mandrel_diameter`.
    ///
    /// Fails when the circuits cannot be divided evenly between the starts.
    pub fn compute(layer: &HelicalWind, mandrel_diameter: f64) -> Result<Self, PlanError> {
        let wind_angle = layer.wind_angle();
        let num_starts = layer.num_starts();

        let num_circuits = circuit_count(mandrel_diameter, layer.tow_width(), wind_angle)
            .ok_or(PlanError::InvalidGeometry {
                tow_width: layer.tow_width(),
                wind_angle,
            })?;

        if num_starts <= 0 || num_circuits % num_starts != 0 {
            return Err(PlanError::InvalidStartCount {
                num_circuits,
                num_starts,
            });
        }

        let circumference = PI * mandrel_diameter;
        let effective_tow_width = layer.tow_width() / wind_angle.to_radians().cos();
        let pass_step_angle = 360.0 / num_circuits as f64;
        let pass_angle =
            (layer.wind_length() * wind_angle.to_radians().tan()) * (360.0 / circumference);
        if !pass_angle.is_finite() {
            return Err(PlanError::InvalidGeometry {
                tow_width: layer.tow_width(),
                wind_angle,
            });
        }

        Ok(Self {
            circumference,
            effective_tow_width,
            num_circuits,
            num_starts,
            num_patterns: num_circuits / num_starts,
            pass_step_angle,
            pass_angle,
        })
    }

    /// Rotation that brings the mandrel to `lock_angle` relative to the
    /// phase left by a pass.
    pub fn lock_rotation(&self, lock_angle: f64) -> f64 {
        lock_angle - self.pass_angle.rem_euclid(360.0)
    }

    /// Rotation from one start position to the next within a pattern
    pub fn start_advance(&self) -> f64 {
        self.pass_step_angle * self.num_circuits as f64 / self.num_starts as f64
    }
}

/// Non-fatal problem reported while generating a program
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A schedule entry named a wind type with no layer model
    UnknownWindType { index: usize, wind_type: String },
    /// A whole layer was skipped
    LayerSkipped { layer: usize, error: PlanError },
    /// A single move inside a layer was skipped
    OutOfBounds { layer: usize, error: MotionError },
}

impl Diagnostic {
    /// Whether the diagnostic leaves tracked and physical state diverged
    pub fn desynchronizes(&self) -> bool {
        matches!(self, Diagnostic::OutOfBounds { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownWindType { index, wind_type } => {
                write!(f, "layer {}: invalid wind type {}, skipped", index, wind_type)
            }
            Self::LayerSkipped { layer, error } => {
                write!(f, "layer {} skipped: {}", layer, error)
            }
            Self::OutOfBounds { layer, error } => write!(f, "layer {}: {}", layer, error),
        }
    }
}

impl From<ScheduleWarning> for Diagnostic {
    fn from(warning: ScheduleWarning) -> Self {
        match warning {
            ScheduleWarning::UnknownWindType { index, wind_type } => {
                Diagnostic::UnknownWindType { index, wind_type }
            }
        }
    }
}

/// Plan every layer of `schedule` onto `winder`.
///
/// Homes the machine, zeroes the position, then dispatches each layer in
/// order. Diagnostics name layers by their position in `schedule`.
pub fn plan_wind(schedule: &[Layer], winder: &mut Winder) -> Vec<Diagnostic> {
    plan_indexed_wind(schedule.iter().enumerate(), winder)
}

/// Plan layers that carry their own index, such as the entries of a
/// loaded [`Schedule`] after unknown entries were dropped.
///
/// Diagnostics name each layer by the index it was given.
pub fn plan_indexed_wind<'a, I>(layers: I, winder: &mut Winder) -> Vec<Diagnostic>
where
    I: IntoIterator<Item = (usize, &'a Layer)>,
{
    winder.move_home();
    winder.zero();

    let mut diagnostics = Vec::new();

    for (index, layer) in layers {
        match layer {
            Layer::Hoop(hoop) => plan_hoop_wind(hoop, winder),
            Layer::Helical(helical) => match plan_helical_wind(helical, winder) {
                Ok(rejected) => diagnostics.extend(
                    rejected
                        .into_iter()
                        .map(|error| Diagnostic::OutOfBounds { layer: index, error }),
                ),
                Err(error) => {
                    tracing::warn!("{}. Layer {} will be skipped.", error, index);
                    diagnostics.push(Diagnostic::LayerSkipped { layer: index, error });
                }
            },
        }
    }

    diagnostics
}

/// Plan a hoop layer.
///
/// Hoop winding has no toolpath yet; the layer emits nothing.
pub fn plan_hoop_wind(layer: &HoopWind, _winder: &mut Winder) {
    tracing::debug!(
        "Hoop layer (tow width {}, single pass {}) has no toolpath, nothing emitted",
        layer.tow_width(),
        layer.is_single_pass()
    );
}

/// Plan a helical layer.
///
/// Returns the moves rejected for leaving the carriage travel; each was
/// skipped and the pattern continued. Fails without emitting anything when
/// the layer's geometry cannot be wound.
pub fn plan_helical_wind(
    layer: &HelicalWind,
    winder: &mut Winder,
) -> Result<Vec<MotionError>, PlanError> {
    let geometry = HelicalGeometry::compute(layer, winder.diameter())?;
    tracing::debug!(
        "Helical layer at {} deg: {} circuits, {} starts, {} patterns, pass angle {:.3}",
        layer.wind_angle(),
        geometry.num_circuits,
        geometry.num_starts,
        geometry.num_patterns,
        geometry.pass_angle
    );

    let wind_length = layer.wind_length();
    let lock_angle = layer.lock_angle() as f64;
    let lock_rotation = geometry.lock_rotation(lock_angle);
    let mut rejected = Vec::new();
    let mut step = |winder: &mut Winder, dx: f64, dz: f64| {
        if let Err(error) = winder.move_by(dx, dz) {
            rejected.push(error);
        }
    };

    if !layer.skip_initial_lock() {
        step(winder, 0.0, lock_angle);
    }

    for pattern in 0..geometry.num_patterns {
        let x = winder.x();
        winder.set_axes(x, 0.0);

        for start in 0..geometry.num_starts {
            winder.push_comment(format!(
                "Pattern: {}/{} Circuit: {}/{}",
                pattern, geometry.num_patterns, start, geometry.num_starts
            ));

            // Wind down the mandrel, lock, wind back, lock
            step(winder, wind_length, geometry.pass_angle);
            step(winder, 0.0, lock_rotation);
            step(winder, -wind_length, geometry.pass_angle);
            step(winder, 0.0, lock_rotation);

            step(winder, 0.0, geometry.start_advance());
        }

        step(winder, 0.0, geometry.pass_step_angle);
    }

    Ok(rejected)
}

/// A generated program and everything reported while generating it
#[derive(Debug, Clone, PartialEq)]
pub struct WindProgram {
    pub gcode: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl WindProgram {
    /// True when nothing was skipped
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Program text, one command per line
    pub fn to_gcode_string(&self) -> String {
        let mut text = self.gcode.join("\n");
        text.push('\n');
        text
    }

    pub fn summary(&self) -> ProgramSummary {
        ProgramSummary::from_lines(&self.gcode)
    }

    /// Write the program to `path`
    pub fn write_to_file(&self, path: &Path) -> CamToolResult<()> {
        std::fs::write(path, self.to_gcode_string())?;
        tracing::info!("G-code saved to {}", path.display());
        Ok(())
    }
}

/// Generator for a complete winding program
pub struct WindProgramGenerator<'a> {
    schedule: &'a Schedule,
    config: &'a MachineConfig,
    feed_rate: f64,
}

impl<'a> WindProgramGenerator<'a> {
    /// Create a generator that uses the schedule's default feed rate
    pub fn new(schedule: &'a Schedule, config: &'a MachineConfig) -> Self {
        Self {
            schedule,
            config,
            feed_rate: schedule.default_feed_rate,
        }
    }

    /// Override the feed rate set at the start of the program
    pub fn with_feed_rate(mut self, feed_rate: f64) -> Self {
        self.feed_rate = feed_rate;
        self
    }

    /// Generate the program on a fresh winder
    pub fn generate(&self) -> WindProgram {
        let mut winder = Winder::new(self.config);
        winder.set_feed_rate(self.feed_rate, true);

        let mut diagnostics: Vec<Diagnostic> = self
            .schedule
            .warnings
            .iter()
            .cloned()
            .map(Diagnostic::from)
            .collect();
        diagnostics.extend(plan_indexed_wind(
            self.schedule.indexed_layers(),
            &mut winder,
        ));

        let gcode = winder.into_gcode();
        tracing::info!(
            "G-code generated: {} lines, {} diagnostics",
            gcode.len(),
            diagnostics.len()
        );

        WindProgram { gcode, diagnostics }
    }
}

/// Generate a program for `schedule` on the machine described by `config`
pub fn generate_program(schedule: &Schedule, config: &MachineConfig) -> WindProgram {
    WindProgramGenerator::new(schedule, config).generate()
}
