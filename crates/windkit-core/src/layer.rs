//! Layer model of a winding schedule
//!
//! A schedule is an ordered list of [`Layer`] records. Each record is an
//! immutable value: every field is coerced to its declared kind when the
//! record is built and is only readable afterwards.
//!
//! Raw schedule entries use the camelCase keys of the wind file format:
//!
//! ```json
//! { "windType": "helical", "towWidth": 0.5, "towThickness": 0.01,
//!   "windAngle": 45, "numStarts": 2, "skipIndex": 0, "lockAngle": 720,
//!   "leadInLength": 0, "leadOutLength": 0, "skipInitialLock": false }
//! ```

use crate::error::LayerError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Kind of wind a layer performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindType {
    /// Circumferential wind, tow nearly perpendicular to the mandrel axis
    Hoop,
    /// Helical wind at a fixed angle to the mandrel axis
    Helical,
}

impl fmt::Display for WindType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hoop => write!(f, "hoop"),
            Self::Helical => write!(f, "helical"),
        }
    }
}

impl FromStr for WindType {
    type Err = LayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hoop" => Ok(Self::Hoop),
            "helical" => Ok(Self::Helical),
            other => Err(LayerError::UnknownWindType {
                wind_type: other.to_string(),
            }),
        }
    }
}

/// Hoop wind layer
#[derive(Debug, Clone, PartialEq)]
pub struct HoopWind {
    wind_length: f64,
    tow_width: f64,
    tow_thickness: f64,
    is_single_pass: bool,
}

impl HoopWind {
    /// Create a hoop layer from already-typed values
    pub fn new(wind_length: f64, tow_width: f64, tow_thickness: f64, is_single_pass: bool) -> Self {
        Self {
            wind_length,
            tow_width,
            tow_thickness,
            is_single_pass,
        }
    }

    fn from_object(wind_length: f64, obj: &Map<String, Value>) -> Result<Self, LayerError> {
        Ok(Self::new(
            wind_length,
            coerce_f64("towWidth", field(obj, "towWidth")?)?,
            coerce_f64("towThickness", field(obj, "towThickness")?)?,
            coerce_bool("terminal", field(obj, "terminal")?)?,
        ))
    }

    pub fn wind_length(&self) -> f64 {
        self.wind_length
    }

    pub fn tow_width(&self) -> f64 {
        self.tow_width
    }

    pub fn tow_thickness(&self) -> f64 {
        self.tow_thickness
    }

    /// Whether the layer is laid in a single pass, as when taping
    pub fn is_single_pass(&self) -> bool {
        self.is_single_pass
    }
}

/// Typed inputs for a helical layer
///
/// `wind_length` is not part of the parameters: it is supplied once per
/// schedule and shared by all of its layers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HelicalWindParams {
    /// Tow band width (in)
    pub tow_width: f64,
    /// Tow band thickness (in)
    pub tow_thickness: f64,
    /// Angle between the mandrel axis and the tow (degrees)
    pub wind_angle: f64,
    /// Number of circumferential start positions per pattern
    pub num_starts: i64,
    /// Start positions skipped to reach the next start (stored, not used)
    pub skip_index: i64,
    /// Mandrel rotation at each end of a pass to anchor the tow (degrees)
    pub lock_angle: i64,
    /// Lead-in length (stored, not used)
    pub lead_in_length: f64,
    /// Lead-out length (stored, not used)
    pub lead_out_length: f64,
    /// Suppress the first lock rotation when continuing a previous helical layer
    pub skip_initial_lock: bool,
}

/// Helical wind layer
///
/// Each circuit winds down the mandrel and back. Successive circuits start
/// at `num_starts` staggered positions; once every start has been wound a
/// pattern is complete, and patterns repeat until the tow covers the whole
/// circumference.
#[derive(Debug, Clone, PartialEq)]
pub struct HelicalWind {
    wind_length: f64,
    tow_width: f64,
    tow_thickness: f64,
    wind_angle: f64,
    num_starts: i64,
    skip_index: i64,
    lock_angle: i64,
    lead_in_length: f64,
    lead_out_length: f64,
    skip_initial_lock: bool,
}

impl HelicalWind {
    /// Create a helical layer from already-typed values
    pub fn new(wind_length: f64, params: HelicalWindParams) -> Self {
        Self {
            wind_length,
            tow_width: params.tow_width,
            tow_thickness: params.tow_thickness,
            wind_angle: params.wind_angle,
            num_starts: params.num_starts,
            skip_index: params.skip_index,
            lock_angle: params.lock_angle,
            lead_in_length: params.lead_in_length,
            lead_out_length: params.lead_out_length,
            skip_initial_lock: params.skip_initial_lock,
        }
    }

    fn from_object(wind_length: f64, obj: &Map<String, Value>) -> Result<Self, LayerError> {
        let params = HelicalWindParams {
            tow_width: coerce_f64("towWidth", field(obj, "towWidth")?)?,
            tow_thickness: coerce_f64("towThickness", field(obj, "towThickness")?)?,
            wind_angle: coerce_f64("windAngle", field(obj, "windAngle")?)?,
            num_starts: coerce_i64("numStarts", field(obj, "numStarts")?)?,
            skip_index: coerce_i64("skipIndex", field(obj, "skipIndex")?)?,
            lock_angle: coerce_i64("lockAngle", field(obj, "lockAngle")?)?,
            lead_in_length: coerce_f64("leadInLength", field(obj, "leadInLength")?)?,
            lead_out_length: coerce_f64("leadOutLength", field(obj, "leadOutLength")?)?,
            skip_initial_lock: coerce_bool("skipInitialLock", field(obj, "skipInitialLock")?)?,
        };
        Ok(Self::new(wind_length, params))
    }

    pub fn wind_length(&self) -> f64 {
        self.wind_length
    }

    pub fn tow_width(&self) -> f64 {
        self.tow_width
    }

    pub fn tow_thickness(&self) -> f64 {
        self.tow_thickness
    }

    /// Wind angle in degrees
    pub fn wind_angle(&self) -> f64 {
        self.wind_angle
    }

    pub fn num_starts(&self) -> i64 {
        self.num_starts
    }

    pub fn skip_index(&self) -> i64 {
        self.skip_index
    }

    /// Lock rotation in degrees
    pub fn lock_angle(&self) -> i64 {
        self.lock_angle
    }

    pub fn lead_in_length(&self) -> f64 {
        self.lead_in_length
    }

    pub fn lead_out_length(&self) -> f64 {
        self.lead_out_length
    }

    pub fn skip_initial_lock(&self) -> bool {
        self.skip_initial_lock
    }
}

/// One ply of a winding schedule
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// Hoop wind
    Hoop(HoopWind),
    /// Helical wind
    Helical(HelicalWind),
}

impl Layer {
    /// Build a layer from a raw schedule entry.
    ///
    /// `wind_length` is the schedule-wide axial length. The entry's
    /// `windType` selects the variant; all other fields are coerced to
    /// their declared kind.
    pub fn from_json(wind_length: f64, entry: &Value) -> Result<Self, LayerError> {
        let obj = entry.as_object().ok_or_else(|| LayerError::NotAnObject {
            found: entry.to_string(),
        })?;

        let tag = field(obj, "windType")?;
        let wind_type: WindType = tag
            .as_str()
            .ok_or_else(|| LayerError::UnknownWindType {
                wind_type: tag.to_string(),
            })?
            .parse()?;

        match wind_type {
            WindType::Hoop => HoopWind::from_object(wind_length, obj).map(Layer::Hoop),
            WindType::Helical => HelicalWind::from_object(wind_length, obj).map(Layer::Helical),
        }
    }

    pub fn wind_type(&self) -> WindType {
        match self {
            Layer::Hoop(_) => WindType::Hoop,
            Layer::Helical(_) => WindType::Helical,
        }
    }

    pub fn wind_length(&self) -> f64 {
        match self {
            Layer::Hoop(l) => l.wind_length(),
            Layer::Helical(l) => l.wind_length(),
        }
    }

    pub fn tow_width(&self) -> f64 {
        match self {
            Layer::Hoop(l) => l.tow_width(),
            Layer::Helical(l) => l.tow_width(),
        }
    }

    pub fn tow_thickness(&self) -> f64 {
        match self {
            Layer::Hoop(l) => l.tow_thickness(),
            Layer::Helical(l) => l.tow_thickness(),
        }
    }
}

impl From<HoopWind> for Layer {
    fn from(layer: HoopWind) -> Self {
        Layer::Hoop(layer)
    }
}

impl From<HelicalWind> for Layer {
    fn from(layer: HelicalWind) -> Self {
        Layer::Helical(layer)
    }
}

fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> Result<&'a Value, LayerError> {
    obj.get(name).ok_or_else(|| LayerError::MissingField {
        field: name.to_string(),
    })
}

fn conversion_error(field: &str, value: &Value, expected: &'static str) -> LayerError {
    LayerError::TypeConversion {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    }
}

/// Coerce a raw value to a float: numbers as-is, numeric strings parsed.
pub fn coerce_f64(field: &str, value: &Value) -> Result<f64, LayerError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| conversion_error(field, value, "float")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| conversion_error(field, value, "float")),
        _ => Err(conversion_error(field, value, "float")),
    }
}

/// Coerce a raw value to an integer.
///
/// Integral numbers pass through, fractional numbers truncate toward zero,
/// and strings must spell an integer.
pub fn coerce_i64(field: &str, value: &Value) -> Result<i64, LayerError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Ok(f.trunc() as i64),
                _ => Err(conversion_error(field, value, "integer")),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| conversion_error(field, value, "integer")),
        _ => Err(conversion_error(field, value, "integer")),
    }
}

/// Coerce a raw value to a boolean.
///
/// Accepts booleans, numbers (non-zero is true) and the words
/// `true/false/yes/no/1/0` in any case.
pub fn coerce_bool(field: &str, value: &Value) -> Result<bool, LayerError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => n
            .as_f64()
            .map(|f| f != 0.0)
            .ok_or_else(|| conversion_error(field, value, "boolean")),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            _ => Err(conversion_error(field, value, "boolean")),
        },
        _ => Err(conversion_error(field, value, "boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wind_type_round_trip() {
        assert_eq!("hoop".parse::<WindType>(), Ok(WindType::Hoop));
        assert_eq!("helical".parse::<WindType>(), Ok(WindType::Helical));
        assert_eq!(WindType::Helical.to_string(), "helical");
        assert!(matches!(
            "polar".parse::<WindType>(),
            Err(LayerError::UnknownWindType { .. })
        ));
    }

    #[test]
    fn test_coerce_float_from_string() {
        assert_eq!(coerce_f64("towWidth", &json!(" 0.25 ")), Ok(0.25));
        assert_eq!(coerce_f64("towWidth", &json!(3)), Ok(3.0));
        assert!(coerce_f64("towWidth", &json!("wide")).is_err());
        assert!(coerce_f64("towWidth", &json!(null)).is_err());
    }

    #[test]
    fn test_coerce_int_truncates() {
        assert_eq!(coerce_i64("numStarts", &json!(4)), Ok(4));
        assert_eq!(coerce_i64("numStarts", &json!(4.9)), Ok(4));
        assert_eq!(coerce_i64("numStarts", &json!(-2.5)), Ok(-2));
        assert_eq!(coerce_i64("numStarts", &json!("7")), Ok(7));
        assert!(coerce_i64("numStarts", &json!("7.5")).is_err());
        assert!(coerce_i64("numStarts", &json!([1])).is_err());
    }

    #[test]
    fn test_coerce_bool() {
        assert_eq!(coerce_bool("terminal", &json!(true)), Ok(true));
        assert_eq!(coerce_bool("terminal", &json!(0)), Ok(false));
        assert_eq!(coerce_bool("terminal", &json!("Yes")), Ok(true));
        assert_eq!(coerce_bool("terminal", &json!("false")), Ok(false));
        assert!(coerce_bool("terminal", &json!("maybe")).is_err());
    }

    #[test]
    fn test_missing_field() {
        let entry = json!({ "windType": "hoop", "towWidth": 0.5, "towThickness": 0.01 });
        let err = Layer::from_json(10.0, &entry).unwrap_err();
        assert_eq!(
            err,
            LayerError::MissingField {
                field: "terminal".to_string()
            }
        );
    }

    #[test]
    fn test_non_object_entry() {
        let err = Layer::from_json(10.0, &json!([1, 2])).unwrap_err();
        assert!(matches!(err, LayerError::NotAnObject { .. }));
    }
}
