//! Winder state tracking and G-code emission
//!
//! Axis conventions:
//! - `X` is the carriage travelling along the mandrel, in inches, confined
//!   to `[0, x_limit]`.
//! - `Z` is the mandrel rotation, in degrees. It is never bounded and never
//!   wrapped; it accumulates across the whole program.
//!
//! The winder keeps full-precision positions. Values are only rounded when
//! a command is rendered.

use crate::error::MotionError;
use windkit_core::units::{format_coordinate, INCH_UNITS_CODE};
use windkit_settings::MachineConfig;

/// Logical state of a two-axis winder plus the program emitted so far
#[derive(Debug, Clone)]
pub struct Winder {
    x: f64,
    z: f64,
    mandrel_diameter: f64,
    mandrel_length: f64,
    x_limit: f64,
    /// `None` until the first feed rate is emitted
    current_feed_rate: Option<f64>,
    gcode: Vec<String>,
}

impl Winder {
    /// Create a winder for the given machine; the program opens with `G20`.
    pub fn new(config: &MachineConfig) -> Self {
        Self {
            x: 0.0,
            z: 0.0,
            mandrel_diameter: config.mandrel_diameter,
            mandrel_length: config.mandrel_length,
            x_limit: config.x_limit,
            current_feed_rate: None,
            gcode: vec![INCH_UNITS_CODE.to_string()],
        }
    }

    /// Send all axes to their reference position (`G28`).
    ///
    /// The tracked position is left as is; the next `zero`, `set_axes` or
    /// move establishes it again.
    pub fn move_home(&mut self) {
        self.gcode.push("G28".to_string());
    }

    /// Define the current position as `X0 Z0`.
    pub fn zero(&mut self) {
        self.set_axes(0.0, 0.0);
    }

    /// Redefine the current position without moving (`G92`).
    ///
    /// No bounds check applies: nothing is commanded to move.
    pub fn set_axes(&mut self, x: f64, z: f64) {
        self.x = x;
        self.z = z;
        self.gcode.push(format!(
            "G92 X{} Z{}",
            format_coordinate(x),
            format_coordinate(z)
        ));
    }

    /// Move each axis by the given amount.
    pub fn move_by(&mut self, dx: f64, dz: f64) -> Result<(), MotionError> {
        self.move_to(self.x + dx, self.z + dz)
    }

    /// Move to an absolute position.
    ///
    /// A target carriage position outside `[0, x_limit]` is rejected: the
    /// tracked position and the program are left untouched.
    pub fn move_to(&mut self, x: f64, z: f64) -> Result<(), MotionError> {
        self.check_bounds(x)?;

        self.x = x;
        self.z = z;
        self.gcode.push(format!(
            "G01 X{} Z{}",
            format_coordinate(self.x),
            format_coordinate(self.z)
        ));
        Ok(())
    }

    /// Set the feed rate.
    ///
    /// Emits `G01 F<f>` when forced, when no feed rate has been emitted yet,
    /// or when `f` differs from the current one. Returns whether a command
    /// was emitted.
    pub fn set_feed_rate(&mut self, f: f64, force: bool) -> bool {
        if !force && self.current_feed_rate == Some(f) {
            return false;
        }

        self.gcode.push(format!("G01 F{}", format_coordinate(f)));
        self.current_feed_rate = Some(f);
        true
    }

    /// Append a comment line.
    pub fn push_comment(&mut self, comment: impl AsRef<str>) {
        self.gcode.push(format!("({})", comment.as_ref()));
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn diameter(&self) -> f64 {
        self.mandrel_diameter
    }

    pub fn length(&self) -> f64 {
        self.mandrel_length
    }

    pub fn x_limit(&self) -> f64 {
        self.x_limit
    }

    /// The machine geometry this winder was built from
    pub fn properties(&self) -> MachineConfig {
        MachineConfig::new(self.mandrel_diameter, self.mandrel_length, self.x_limit)
    }

    /// Last emitted feed rate, if any
    pub fn feed_rate(&self) -> Option<f64> {
        self.current_feed_rate
    }

    pub fn gcode(&self) -> &[String] {
        &self.gcode
    }

    /// Consume the winder and take its program
    pub fn into_gcode(self) -> Vec<String> {
        self.gcode
    }

    fn check_bounds(&self, x: f64) -> Result<(), MotionError> {
        // NaN fails both comparisons, so test for containment
        if (0.0..=self.x_limit).contains(&x) {
            return Ok(());
        }

        tracing::warn!("Location is out of bounds: X{} (limit {})", x, self.x_limit);
        Err(MotionError::OutOfBounds {
            target: x,
            limit: self.x_limit,
        })
    }
}
