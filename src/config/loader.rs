//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the
//! regulation metadata and year-indexed rate tables from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{
    AcaConfig, AffordabilityParameters, MeasurementConfig, PenaltyRates, RegulationMetadata,
    TaxYearConfig,
};

/// Loads and provides access to the engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to look up the statutory figures for a year.
///
/// # Directory Structure
///
/// ```text
/// config/aca/
/// ├── regulation.yaml      # Regulation metadata
/// ├── measurement.yaml     # Full-time and ALE thresholds
/// └── tax_years/
///     └── 2025.yaml        # Penalty rates, affordability %, FPL
/// ```
///
/// # Example
///
/// ```no_run
/// use aca_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/aca").unwrap();
/// let rates = loader.get_penalty_rates(2025).unwrap();
/// println!("4980H(a) per employee: ${}", rates.rate_a);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AcaConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The `tax_years` directory holds no tables
    /// - Two tables name the same tax year
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RegulationMetadata>(&path.join("regulation.yaml"))?;
        let measurement = Self::load_yaml::<MeasurementConfig>(&path.join("measurement.yaml"))?;
        let tax_years = Self::load_tax_years(&path.join("tax_years"))?;

        debug!(
            regulation = %metadata.code,
            years = tax_years.len(),
            "Loaded ACA configuration"
        );

        Ok(Self {
            config: AcaConfig::new(metadata, measurement, tax_years),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: AcaConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every tax year table from the `tax_years` directory.
    fn load_tax_years(dir: &Path) -> EngineResult<Vec<TaxYearConfig>> {
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        // read_dir order is platform dependent
        paths.sort();

        let mut sources: HashMap<i32, PathBuf> = HashMap::new();
        let mut tables = Vec::with_capacity(paths.len());
        for path in paths {
            let table = Self::load_yaml::<TaxYearConfig>(&path)?;
            if let Some(first) = sources.get(&table.tax_year) {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!(
                        "tax year {} is already defined in {}",
                        table.tax_year,
                        first.display()
                    ),
                });
            }
            sources.insert(table.tax_year, path);
            tables.push(table);
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no tax year files found)", dir_str),
            });
        }

        Ok(tables)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AcaConfig {
        &self.config
    }

    /// Returns the regulation metadata.
    pub fn regulation(&self) -> &RegulationMetadata {
        self.config.regulation()
    }

    /// Returns the full-time and ALE thresholds.
    pub fn measurement(&self) -> &MeasurementConfig {
        self.config.measurement()
    }

    /// Gets the 4980H(a)/(b) amounts for a tax year.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aca_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/aca")?;
    /// let rates = loader.get_penalty_rates(2025)?;
    /// println!("4980H(b) per employee: ${}", rates.rate_b);
    /// # Ok::<(), aca_engine::error::EngineError>(())
    /// ```
    pub fn get_penalty_rates(&self, tax_year: i32) -> EngineResult<PenaltyRates> {
        self.tax_year(tax_year).map(|table| table.penalty_rates)
    }

    /// Gets the affordability percentage and poverty line figures for a
    /// plan year.
    pub fn get_affordability_parameters(
        &self,
        plan_year: i32,
    ) -> EngineResult<AffordabilityParameters> {
        self.tax_year(plan_year).map(TaxYearConfig::affordability)
    }

    fn tax_year(&self, year: i32) -> EngineResult<&TaxYearConfig> {
        self.config
            .tax_year(year)
            .ok_or(EngineError::UnsupportedTaxYear { year })
    }
}
