//! Wind parameter calculator
//!
//! For a mandrel, tow and wind angle, finds how many circuits cover the
//! mandrel and which start counts divide them evenly. Any of those start
//! counts gives a helical layer the planner accepts.

use crate::error::{CamToolError, CamToolResult, ParameterError};
use crate::planner::circuit_count;

/// Result of a wind parameter calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindCalculation {
    /// Circuits needed to cover the mandrel
    pub num_circuits: i64,
    /// Start counts that divide the circuits evenly, ascending
    pub valid_start_counts: Vec<i64>,
}

/// Calculator for valid helical wind settings
#[derive(Debug, Clone, Copy, Default)]
pub struct WindCalculator;

impl WindCalculator {
    /// Compute the circuit count and valid start counts.
    ///
    /// `mandrel_diameter` and `tow_width` share one length unit;
    /// `wind_angle` is in degrees and must lie in `[0, 90)`.
    pub fn calculate(
        mandrel_diameter: f64,
        tow_width: f64,
        wind_angle: f64,
    ) -> CamToolResult<WindCalculation> {
        check_positive("mandrel_diameter", mandrel_diameter)?;
        check_positive("tow_width", tow_width)?;
        if !(0.0..90.0).contains(&wind_angle) {
            return Err(ParameterError::OutOfRange {
                name: "wind_angle".to_string(),
                value: wind_angle,
                min: 0.0,
                max: 90.0,
            }
            .into());
        }

        let num_circuits = circuit_count(mandrel_diameter, tow_width, wind_angle).ok_or_else(|| {
            CamToolError::InvalidParameters(format!(
                "no finite circuit count for tow width {} at {} degrees",
                tow_width, wind_angle
            ))
        })?;

        Ok(WindCalculation {
            num_circuits,
            valid_start_counts: divisors(num_circuits),
        })
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange {
            name: name.to_string(),
            value,
            min: 0.0,
            max: f64::INFINITY,
        })
    }
}

/// All positive divisors of `n`, ascending
fn divisors(n: i64) -> Vec<i64> {
    let mut low = Vec::new();
    let mut high = Vec::new();

    let mut i = 1;
    while i * i <= n {
        if n % i == 0 {
            low.push(i);
            if i != n / i {
                high.push(n / i);
            }
        }
        i += 1;
    }

    low.extend(high.into_iter().rev());
    low
}
