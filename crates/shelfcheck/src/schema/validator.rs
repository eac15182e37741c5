//! Per-column cell validators.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::types::{AGE_GROUPS, CorrectionHint, GENDERS};

static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static PLAIN_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").unwrap());
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_\-./]*$").unwrap());

/// A rule applied to every cell of one canonical column.
///
/// One variant per rule family; each knows its predicate, failure message,
/// repair hint, and whether any repair is possible at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    /// ISO calendar date, `YYYY-MM-DD`.
    DateFormat,
    /// Plain decimal number with no currency or grouping.
    NumberFormat,
    /// A retailer / chain name.
    RetailerName,
    /// One of the canonical age-group buckets.
    AgeGroup,
    /// One of the canonical gender values.
    Gender,
    /// Any non-blank text.
    NonEmpty,
    /// A record identifier; cannot be repaired from the data.
    Identifier,
}

impl Validator {
    /// Check a cell value.
    pub fn check(&self, value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return false;
        }
        match self {
            Validator::DateFormat => {
                ISO_DATE.is_match(trimmed)
                    && NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok()
            }
            Validator::NumberFormat => PLAIN_NUMBER.is_match(trimmed),
            Validator::RetailerName => trimmed.chars().any(|c| c.is_alphabetic()),
            Validator::AgeGroup => AGE_GROUPS.contains(&trimmed),
            Validator::Gender => GENDERS.contains(&trimmed),
            Validator::NonEmpty => true,
            Validator::Identifier => IDENTIFIER.is_match(trimmed),
        }
    }

    /// Failure message shown to the user.
    pub fn describe(&self) -> &'static str {
        match self {
            Validator::DateFormat => "Invalid date format (expected YYYY-MM-DD)",
            Validator::NumberFormat => "Invalid number (expected a plain decimal value)",
            Validator::RetailerName => "Retailer name is missing or unrecognisable",
            Validator::AgeGroup => {
                "Invalid age group (expected Under 18, 16-24, 25-34, 35-44, 45-54, 55-64 or 65+)"
            }
            Validator::Gender => "Invalid gender (expected Male, Female or Other)",
            Validator::NonEmpty => "Value is required",
            Validator::Identifier => "Identifier is missing or contains invalid characters",
        }
    }

    /// Which heuristic family applies to failures.
    pub fn hint(&self) -> CorrectionHint {
        match self {
            Validator::DateFormat => CorrectionHint::DateFormat,
            Validator::NumberFormat => CorrectionHint::NumberFormat,
            Validator::RetailerName => CorrectionHint::RetailerMapping,
            Validator::AgeGroup => CorrectionHint::AgeGroupMapping,
            Validator::Gender => CorrectionHint::GenderMapping,
            Validator::NonEmpty | Validator::Identifier => CorrectionHint::ManualInput,
        }
    }

    /// Whether a failing value can be corrected at all.
    pub fn is_correctable(&self) -> bool {
        !matches!(self, Validator::Identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_check() {
        assert!(Validator::DateFormat.check("2025-02-24"));
        assert!(!Validator::DateFormat.check("2025-02-30"));
        assert!(!Validator::DateFormat.check("02/24/2025"));
        assert!(!Validator::DateFormat.check("not-a-date"));
        assert!(!Validator::DateFormat.check(""));
    }

    #[test]
    fn test_number_check() {
        assert!(Validator::NumberFormat.check("12"));
        assert!(Validator::NumberFormat.check("-3.50"));
        assert!(Validator::NumberFormat.check(".5"));
        assert!(!Validator::NumberFormat.check("£3.50"));
        assert!(!Validator::NumberFormat.check("1,200"));
        assert!(!Validator::NumberFormat.check("NaN"));
        assert!(!Validator::NumberFormat.check("inf"));
    }

    #[test]
    fn test_categorical_checks() {
        assert!(Validator::AgeGroup.check("25-34"));
        assert!(Validator::AgeGroup.check("65+"));
        assert!(!Validator::AgeGroup.check("27"));
        assert!(Validator::Gender.check("Female"));
        assert!(!Validator::Gender.check("f"));
        assert!(Validator::RetailerName.check("Tesco"));
        assert!(!Validator::RetailerName.check("1234"));
    }

    #[test]
    fn test_identifier_is_not_correctable() {
        assert!(Validator::Identifier.check("RCPT-0001"));
        assert!(!Validator::Identifier.check("#bad id"));
        assert!(!Validator::Identifier.is_correctable());
        assert!(Validator::NonEmpty.is_correctable());
        assert_eq!(Validator::Identifier.hint(), CorrectionHint::ManualInput);
    }
}
