//! # WindKit Core
//!
//! Core types and utilities for WindKit.
//! Provides the layer model of a winding schedule, the number rendering
//! shared by every G-code emitter, and the error types of the core layer.

pub mod error;
pub mod layer;
pub mod units;

pub use error::LayerError;
pub use layer::{HelicalWind, HelicalWindParams, HoopWind, Layer, WindType};
pub use units::{format_coordinate, round_to_places, COORDINATE_PLACES, INCH_UNITS_CODE};
