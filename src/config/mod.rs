//! Configuration loading and management for the ACA engine.
//!
//! This module loads the regulation metadata, measurement thresholds and
//! the year-indexed rate tables (penalty amounts, affordability percentage,
//! federal poverty line) from YAML files. Nothing that changes from year to
//! year is hardcoded in the calculation code.
//!
//! # Example
//!
//! ```no_run
//! use aca_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/aca").unwrap();
//! println!("Loaded regulation: {}", config.regulation().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AcaConfig, AffordabilityParameters, MeasurementConfig, PenaltyRates, PovertyLineTable,
    RegulationMetadata, TaxYearConfig,
};
