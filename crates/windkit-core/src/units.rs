//! Unit and number rendering utilities
//!
//! Handles the unit declaration of an emitted program and the fixed
//! three-decimal rendering of every coordinate and feed rate.

/// Number of decimal places used when rendering G-code values
pub const COORDINATE_PLACES: u32 = 3;

/// Unit select word opening every program; all lengths are in inches
pub const INCH_UNITS_CODE: &str = "G20";

/// Round `value` to `places` decimal places (half away from zero).
///
/// A result of negative zero is normalised to positive zero.
pub fn round_to_places(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale + 0.0
}

/// Render a coordinate or feed rate for a G-code word.
///
/// The value is rounded to [`COORDINATE_PLACES`] and always printed with
/// exactly that many decimals. Rendering is display-only; callers keep the
/// unrounded value for any further arithmetic.
pub fn format_coordinate(value: f64) -> String {
    format!(
        "{:.*}",
        COORDINATE_PLACES as usize,
        round_to_places(value, COORDINATE_PLACES)
    )
}
