//! WindKit Settings Crate
//!
//! Handles machine configuration and wind schedule loading.

pub mod config;
pub mod error;
pub mod schedule;

pub use config::MachineConfig;
pub use error::{ConfigError, SettingsError, SettingsResult};
pub use schedule::{Schedule, ScheduleLayer, ScheduleWarning};
