//! Wind schedule loading
//!
//! A wind file is a JSON document describing the layup:
//!
//! ```json
//! { "length": 24, "defaultFeedRate": 0.005,
//!   "layers": [ { "windType": "hoop", ... }, { "windType": "helical", ... } ] }
//! ```
//!
//! Every layer shares the top-level `length` as its wind length. Entries
//! with an unknown `windType` are skipped with a warning; any other field
//! that cannot be coerced aborts the whole load.

use crate::error::{SettingsError, SettingsResult};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use windkit_core::layer::{coerce_f64, Layer};
use windkit_core::LayerError;

/// Non-fatal problem found while loading a schedule
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleWarning {
    /// The entry at `index` names a wind type with no layer model
    UnknownWindType { index: usize, wind_type: String },
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownWindType { index, wind_type } => {
                write!(f, "layer {}: invalid wind type {}, skipped", index, wind_type)
            }
        }
    }
}

/// A loaded layer and its position among the wind file's entries
///
/// Entries skipped during loading leave gaps, so `index` is not the
/// layer's position in [`Schedule::layers`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleLayer {
    /// Index of the entry in the wind file
    pub index: usize,
    pub layer: Layer,
}

/// An ordered layup schedule
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schedule {
    /// Axial wind length shared by every layer (in)
    pub length: f64,
    /// Feed rate applied at the start of the program
    pub default_feed_rate: f64,
    /// Layers in winding order
    pub layers: Vec<ScheduleLayer>,
    /// Entries skipped during loading
    pub warnings: Vec<ScheduleWarning>,
}

impl Schedule {
    /// Create a schedule from already-built layers, numbered in order
    pub fn new(length: f64, default_feed_rate: f64, layers: Vec<Layer>) -> Self {
        Self {
            length,
            default_feed_rate,
            layers: layers
                .into_iter()
                .enumerate()
                .map(|(index, layer)| ScheduleLayer { index, layer })
                .collect(),
            warnings: Vec::new(),
        }
    }

    /// Parse a schedule from wind file text
    pub fn from_json_str(content: &str) -> SettingsResult<Self> {
        let data: Value = serde_json::from_str(content)?;
        Self::from_value(&data)
    }

    /// Build a schedule from a parsed wind file
    pub fn from_value(data: &Value) -> SettingsResult<Self> {
        let length = coerce_f64("length", required(data, "length")?)
            .map_err(|source| SettingsError::InvalidSetting {
                key: "length".to_string(),
                reason: source.to_string(),
            })?;
        let default_feed_rate = coerce_f64("defaultFeedRate", required(data, "defaultFeedRate")?)
            .map_err(|source| SettingsError::InvalidSetting {
                key: "defaultFeedRate".to_string(),
                reason: source.to_string(),
            })?;

        let entries = required(data, "layers")?
            .as_array()
            .ok_or_else(|| SettingsError::InvalidSetting {
                key: "layers".to_string(),
                reason: "must be an array".to_string(),
            })?;

        let mut schedule = Self::new(length, default_feed_rate, Vec::with_capacity(entries.len()));

        for (index, entry) in entries.iter().enumerate() {
            match Layer::from_json(length, entry) {
                Ok(layer) => schedule.layers.push(ScheduleLayer { index, layer }),
                Err(LayerError::UnknownWindType { wind_type }) => {
                    tracing::warn!("Invalid wind type {} at layer {}, skipping", wind_type, index);
                    schedule
                        .warnings
                        .push(ScheduleWarning::UnknownWindType { index, wind_type });
                }
                Err(source) => return Err(SettingsError::Layer { index, source }),
            }
        }

        tracing::info!(
            "Schedule loaded: {} layers, length {}, default feed rate {}",
            schedule.layers.len(),
            schedule.length,
            schedule.default_feed_rate
        );
        Ok(schedule)
    }

    /// Load a schedule from a `.json` or `.wind` file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        tracing::info!("Loading schedule from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// Layers paired with their wind file index, in winding order
    pub fn indexed_layers(&self) -> impl Iterator<Item = (usize, &Layer)> + '_ {
        self.layers.iter().map(|entry| (entry.index, &entry.layer))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

fn required<'a>(data: &'a Value, key: &str) -> SettingsResult<&'a Value> {
    data.get(key)
        .ok_or_else(|| SettingsError::InvalidSetting {
            key: key.to_string(),
            reason: "missing".to_string(),
        })
}
