//! Safe harbor recommendation across an employee population.
//!
//! The advisor tests every employee against every safe harbor and hands
//! the per-method tallies to a [`RecommendationStrategy`], which picks the
//! method to report on Form 1095-C.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AffordabilityParameters;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeCompensation, SafeHarborMethod};

use super::affordability::evaluate_affordability;

/// Pass/fail tally for one safe harbor across a population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodEvaluation {
    /// The safe harbor evaluated.
    pub method: SafeHarborMethod,
    /// Employees whose offer is affordable under the method.
    pub passed: u32,
    /// Employees whose offer is unaffordable or who lack the data the
    /// method needs.
    pub failed: u32,
    /// The part of `failed` caused by missing data.
    pub insufficient_data: u32,
}

/// The advisor's recommended method and the tallies behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeHarborRecommendation {
    /// The recommended safe harbor.
    pub method: SafeHarborMethod,
    /// Its Form 1095-C line 16 code.
    pub line_16_code: String,
    /// One tally per method, simplest first.
    pub evaluations: Vec<MethodEvaluation>,
}

/// Chooses a safe harbor from per-method tallies.
///
/// `evaluations` always holds one entry per [`SafeHarborMethod`], ordered
/// as [`SafeHarborMethod::ALL`].
pub trait RecommendationStrategy {
    /// Returns the method to recommend.
    fn select(&self, evaluations: &[MethodEvaluation]) -> SafeHarborMethod;
}

/// Recommends the method with the fewest failures.
///
/// Ties go to the simpler method: W-2, then FPL, then rate of pay.
#[derive(Debug, Clone, Copy, Default)]
pub struct FewestFailures;

impl RecommendationStrategy for FewestFailures {
    fn select(&self, evaluations: &[MethodEvaluation]) -> SafeHarborMethod {
        evaluations
            .iter()
            .min_by_key(|evaluation| (evaluation.failed, evaluation.method.simplicity_rank()))
            .map(|evaluation| evaluation.method)
            .unwrap_or(SafeHarborMethod::W2)
    }
}

/// Tests offers for affordability and recommends a safe harbor.
///
/// # Example
///
/// ```
/// use aca_engine::calculation::SafeHarborAdvisor;
/// use aca_engine::config::{AffordabilityParameters, PovertyLineTable};
/// use aca_engine::models::SafeHarborMethod;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let params = AffordabilityParameters {
///     plan_year: 2025,
///     affordability_percentage: Decimal::from_str("0.0902").unwrap(),
///     federal_poverty_line: PovertyLineTable {
///         contiguous: Decimal::from(15060),
///         alaska: Decimal::from(18810),
///         hawaii: Decimal::from(17310),
///     },
/// };
///
/// let recommendation = SafeHarborAdvisor::new().recommend(&[], &params)?;
/// assert_eq!(recommendation.method, SafeHarborMethod::W2);
/// # Ok::<(), aca_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SafeHarborAdvisor<S = FewestFailures> {
    strategy: S,
}

impl SafeHarborAdvisor<FewestFailures> {
    /// Creates an advisor using [`FewestFailures`].
    pub fn new() -> Self {
        Self {
            strategy: FewestFailures,
        }
    }
}

impl<S: RecommendationStrategy> SafeHarborAdvisor<S> {
    /// Creates an advisor using a custom strategy.
    pub fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    /// Returns whether one employee's offer is affordable under `method`.
    pub fn is_affordable(
        &self,
        method: SafeHarborMethod,
        employee: &EmployeeCompensation,
        params: &AffordabilityParameters,
    ) -> EngineResult<bool> {
        super::affordability::is_affordable(method, employee, params)
    }

    /// Evaluates every method for every employee and recommends one.
    ///
    /// An employee missing the data a method needs counts as a failure for
    /// that method. An empty population recommends W-2.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if any employee has a negative amount.
    pub fn recommend(
        &self,
        population: &[EmployeeCompensation],
        params: &AffordabilityParameters,
    ) -> EngineResult<SafeHarborRecommendation> {
        let mut evaluations: Vec<MethodEvaluation> = SafeHarborMethod::ALL
            .iter()
            .map(|&method| MethodEvaluation {
                method,
                passed: 0,
                failed: 0,
                insufficient_data: 0,
            })
            .collect();

        for employee in population {
            for evaluation in evaluations.iter_mut() {
                match evaluate_affordability(evaluation.method, employee, params) {
                    Ok(outcome) if outcome.is_affordable => evaluation.passed += 1,
                    Ok(_) => evaluation.failed += 1,
                    Err(EngineError::InsufficientData { .. }) => {
                        evaluation.failed += 1;
                        evaluation.insufficient_data += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        let method = self.strategy.select(&evaluations);

        debug!(
            plan_year = params.plan_year,
            population = population.len(),
            method = %method,
            "Safe harbor recommended"
        );

        Ok(SafeHarborRecommendation {
            method,
            line_16_code: method.code().to_string(),
            evaluations,
        })
    }
}
