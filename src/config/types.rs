//! Configuration types for penalty and affordability calculations.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::PovertyLineRegion;

/// Metadata about the regulation the rate tables implement.
#[derive(Debug, Clone, Deserialize)]
pub struct RegulationMetadata {
    /// The statutory reference (e.g., "IRC-4980H").
    pub code: String,
    /// The human-readable name of the regulation.
    pub name: String,
    /// The version or effective date of the configuration set.
    pub version: String,
    /// URL to the official guidance.
    pub source_url: String,
}

/// Hour and headcount thresholds used for full-time and ALE measurement.
///
/// These are fixed by statute rather than indexed annually, so they live
/// in a single file next to the regulation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementConfig {
    /// Average weekly hours at or above which an employee is full-time.
    pub full_time_weekly_hours: Decimal,
    /// Monthly hours of service at or above which an employee is full-time.
    pub full_time_monthly_hours: Decimal,
    /// Monthly hours that make up one full-time equivalent.
    pub fte_monthly_hours: Decimal,
    /// Average full-time plus FTE headcount at which an employer is an ALE.
    pub ale_employee_threshold: u32,
}

/// Annual penalty amounts for a tax year.
///
/// Both amounts are annual; the monthly amount is one twelfth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyRates {
    /// The 4980H(a) amount per full-time employee beyond the first 30.
    pub rate_a: Decimal,
    /// The 4980H(b) amount per affected full-time employee.
    pub rate_b: Decimal,
}

/// Single-individual federal poverty line amounts by region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PovertyLineTable {
    /// The 48 contiguous states and the District of Columbia.
    pub contiguous: Decimal,
    /// Alaska.
    pub alaska: Decimal,
    /// Hawaii.
    pub hawaii: Decimal,
}

impl PovertyLineTable {
    /// Returns the annual poverty line for a single individual in `region`.
    pub fn single_individual(&self, region: PovertyLineRegion) -> Decimal {
        match region {
            PovertyLineRegion::Contiguous => self.contiguous,
            PovertyLineRegion::Alaska => self.alaska,
            PovertyLineRegion::Hawaii => self.hawaii,
        }
    }
}

/// The inputs every affordability safe harbor needs for one plan year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffordabilityParameters {
    /// The plan year these parameters apply to.
    pub plan_year: i32,
    /// The indexed required contribution percentage (e.g., 0.0902).
    pub affordability_percentage: Decimal,
    /// The poverty line figures usable for the FPL safe harbor.
    pub federal_poverty_line: PovertyLineTable,
}

/// Rate table for a single tax year, from `tax_years/<year>.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxYearConfig {
    /// The tax year the table covers.
    pub tax_year: i32,
    /// 4980H(a) and 4980H(b) annual amounts.
    pub penalty_rates: PenaltyRates,
    /// The indexed required contribution percentage.
    pub affordability_percentage: Decimal,
    /// Poverty line figures for the FPL safe harbor.
    pub federal_poverty_line: PovertyLineTable,
}

impl TaxYearConfig {
    /// Returns the affordability parameters carried by this table.
    pub fn affordability(&self) -> AffordabilityParameters {
        AffordabilityParameters {
            plan_year: self.tax_year,
            affordability_percentage: self.affordability_percentage,
            federal_poverty_line: self.federal_poverty_line,
        }
    }
}

/// The complete engine configuration loaded from YAML files.
///
/// This struct aggregates the regulation metadata, the measurement
/// thresholds and every tax year table found in a configuration directory.
/// It can also be built directly when the rate table comes from somewhere
/// other than the filesystem.
#[derive(Debug, Clone)]
pub struct AcaConfig {
    /// Regulation metadata.
    metadata: RegulationMetadata,
    /// Full-time and ALE thresholds.
    measurement: MeasurementConfig,
    /// Rate tables keyed by tax year.
    tax_years: BTreeMap<i32, TaxYearConfig>,
}

impl AcaConfig {
    /// Creates a new AcaConfig from its component parts.
    ///
    /// When two tables name the same year, the later one wins.
    /// [`ConfigLoader::load`](super::ConfigLoader::load) rejects such
    /// duplicates before they reach this point.
    pub fn new(
        metadata: RegulationMetadata,
        measurement: MeasurementConfig,
        tax_years: Vec<TaxYearConfig>,
    ) -> Self {
        let tax_years = tax_years
            .into_iter()
            .map(|table| (table.tax_year, table))
            .collect();
        Self {
            metadata,
            measurement,
            tax_years,
        }
    }

    /// Returns the regulation metadata.
    pub fn regulation(&self) -> &RegulationMetadata {
        &self.metadata
    }

    /// Returns the measurement thresholds.
    pub fn measurement(&self) -> &MeasurementConfig {
        &self.measurement
    }

    /// Returns the table for `year`, if one was loaded.
    pub fn tax_year(&self, year: i32) -> Option<&TaxYearConfig> {
        self.tax_years.get(&year)
    }

    /// Returns every loaded year, oldest first.
    pub fn supported_years(&self) -> Vec<i32> {
        self.tax_years.keys().copied().collect()
    }
}
