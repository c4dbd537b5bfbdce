//! Infrastructure layer: host catalog adapters, maintenance orchestration, config.

pub mod catalog_store;
pub mod config;
pub mod maintenance;

pub use config::{AppConfig, ConfigError};
pub use maintenance::{CatalogMaintenance, CleanupOutcome, FailedMutation, MaintenanceConfig, MaintenanceError, ReviewOutcome};
