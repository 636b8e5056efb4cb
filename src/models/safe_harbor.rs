//! Affordability safe harbor methods.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An IRS affordability safe harbor.
///
/// Each method has a Form 1095-C line 16 code and a simplicity rank used
/// to break ties when recommending a method.
///
/// # Example
///
/// ```
/// use aca_engine::models::SafeHarborMethod;
///
/// assert_eq!(SafeHarborMethod::RateOfPay.code(), "2H");
/// assert_eq!(
///     serde_json::to_string(&SafeHarborMethod::FederalPovertyLine).unwrap(),
///     "\"federal_poverty_line\""
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafeHarborMethod {
    /// Form W-2 Box 1 wages.
    W2,
    /// Hourly rate × 130, or monthly salary.
    RateOfPay,
    /// Federal poverty line for a single individual.
    FederalPovertyLine,
}

impl SafeHarborMethod {
    /// Every method, simplest first.
    pub const ALL: [SafeHarborMethod; 3] = [
        SafeHarborMethod::W2,
        SafeHarborMethod::FederalPovertyLine,
        SafeHarborMethod::RateOfPay,
    ];

    /// Returns the Form 1095-C line 16 code for this method.
    pub fn code(self) -> &'static str {
        match self {
            SafeHarborMethod::W2 => "2F",
            SafeHarborMethod::FederalPovertyLine => "2G",
            SafeHarborMethod::RateOfPay => "2H",
        }
    }

    /// Returns the tie-break rank; lower is simpler.
    pub fn simplicity_rank(self) -> u8 {
        match self {
            SafeHarborMethod::W2 => 0,
            SafeHarborMethod::FederalPovertyLine => 1,
            SafeHarborMethod::RateOfPay => 2,
        }
    }

    /// Returns the identifier used in JSON and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            SafeHarborMethod::W2 => "w2",
            SafeHarborMethod::RateOfPay => "rate_of_pay",
            SafeHarborMethod::FederalPovertyLine => "federal_poverty_line",
        }
    }
}

impl fmt::Display for SafeHarborMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_16_codes() {
        assert_eq!(SafeHarborMethod::W2.code(), "2F");
        assert_eq!(SafeHarborMethod::FederalPovertyLine.code(), "2G");
        assert_eq!(SafeHarborMethod::RateOfPay.code(), "2H");
    }

    #[test]
    fn test_all_is_ordered_by_simplicity() {
        let ranks: Vec<u8> = SafeHarborMethod::ALL
            .iter()
            .map(|m| m.simplicity_rank())
            .collect();
        assert_eq!(ranks, vec![0, 1, 2]);
    }

    #[test]
    fn test_serde_names_match_display() {
        for method in SafeHarborMethod::ALL {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method));
        }
    }

    #[test]
    fn test_deserialize_rate_of_pay() {
        let method: SafeHarborMethod = serde_json::from_str("\"rate_of_pay\"").unwrap();
        assert_eq!(method, SafeHarborMethod::RateOfPay);
    }
}
