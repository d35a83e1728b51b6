//! # WindKit CAM Tools
//!
//! This crate turns a winding schedule into a G-code program for a two-axis
//! filament winder (carriage `X`, mandrel rotation `Z`).
//!
//! ## Tools Included
//!
//! - **Winder**: Tracks axis state, enforces carriage travel, emits commands
//! - **Planner**: Helical toolpath planning with pattern and start indexing
//! - **Wind Calculator**: Circuit count and valid start counts for a tow
//! - **Statistics**: Line counts of an emitted program

pub mod calculator;
pub mod error;
pub mod planner;
pub mod stats;
pub mod winder;

pub use calculator::{WindCalculation, WindCalculator};
pub use error::{CamToolError, CamToolResult, MotionError, ParameterError, PlanError};
pub use planner::{
    circuit_count, generate_program, plan_helical_wind, plan_hoop_wind, plan_indexed_wind,
    plan_wind, Diagnostic, HelicalGeometry, WindProgram, WindProgramGenerator,
};
pub use stats::ProgramSummary;
pub use winder::Winder;
