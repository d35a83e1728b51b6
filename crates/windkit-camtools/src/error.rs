//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for winder motion, layer
//! planning, and calculator parameter validation.

use std::io;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// Invalid parameters were provided to a CAM tool.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// A commanded move was rejected.
    #[error("Motion error: {0}")]
    Motion(#[from] MotionError),

    /// A layer could not be planned.
    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),
}

/// Errors related to CAM tool parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// A move the winder refused to command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// The carriage target lies outside its travel.
    #[error("Location is out of bounds: X{target} outside 0..{limit}")]
    OutOfBounds { target: f64, limit: f64 },
}

/// Reasons a layer is skipped by the planner.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// The circuits cannot be split evenly between the starts.
    #[error(
        "Invalid combination of {num_circuits} circuits and {num_starts} starts; \
         use the calculator to find valid start counts for this wind angle and tow"
    )]
    InvalidStartCount { num_circuits: i64, num_starts: i64 },

    /// The tow and angle do not give a finite, positive circuit count.
    #[error("Invalid wind geometry: tow width {tow_width} at {wind_angle} degrees")]
    InvalidGeometry { tow_width: f64, wind_angle: f64 },
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_error_display() {
        let err = MotionError::OutOfBounds {
            target: 13.0,
            limit: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "Location is out of bounds: X13 outside 0..10"
        );
    }

    #[test]
    fn test_plan_error_display() {
        let err = PlanError::InvalidStartCount {
            num_circuits: 18,
            num_starts: 5,
        };
        assert!(err
            .to_string()
            .starts_with("Invalid combination of 18 circuits and 5 starts"));
    }

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::OutOfRange {
            name: "wind_angle".to_string(),
            value: 95.0,
            min: 0.0,
            max: 90.0,
        };
        assert_eq!(
            err.to_string(),
            "Parameter 'wind_angle' out of range: 95 (valid: 0..90)"
        );
    }

    #[test]
    fn test_error_conversion() {
        let cam_err: CamToolError = MotionError::OutOfBounds {
            target: -1.0,
            limit: 10.0,
        }
        .into();
        assert!(matches!(cam_err, CamToolError::Motion(_)));

        let cam_err: CamToolError = PlanError::InvalidStartCount {
            num_circuits: 7,
            num_starts: 2,
        }
        .into();
        assert!(matches!(cam_err, CamToolError::Plan(_)));

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let cam_err: CamToolError = io_err.into();
        assert!(matches!(cam_err, CamToolError::IoError(_)));
    }
}
