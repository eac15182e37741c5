//! Rule-based correction candidates for failing or suspicious cells.
//!
//! Each family is a small pure function from a value to an optional
//! replacement. Families run in a fixed order and a family only contributes
//! when its output differs from the input, so the first candidate is the
//! most specific fix and the rest are alternatives.

use tracing::trace;

use crate::normalize::{
    clean_number, format_iso, parse_alternate_date, standardize_age_group, standardize_gender,
};
use crate::schema::{DatasetType, DomainSchema, Validator};
use crate::text::title_case;

use super::correction::{CorrectionCandidate, CorrectionFamily, CorrectionTier};
use super::families::{ColumnKind, column_kinds};
use super::retailers::canonical_retailer;

/// Generates tiered correction candidates for one dataset type.
pub struct CorrectionSuggestionEngine {
    schema: Option<DomainSchema>,
}

impl CorrectionSuggestionEngine {
    /// Create an engine for a dataset type.
    ///
    /// `Unknown` has no schema; suggestions then rely on column keywords only.
    pub fn new(dataset_type: DatasetType) -> Self {
        Self {
            schema: DomainSchema::for_type(dataset_type).ok(),
        }
    }

    /// Candidate corrections for a cell, best first.
    pub fn suggest(&self, column: &str, value: &str) -> Vec<CorrectionCandidate> {
        if value.trim().is_empty() {
            return vec![CorrectionCandidate::new(
                "",
                CorrectionTier::Manual,
                0.0,
                CorrectionFamily::ManualInput,
                format!("Enter a value for '{}'", column),
            )];
        }

        let validator = self.validator_for(column);
        if let Some(v) = validator.filter(|v| !v.is_correctable()) {
            return vec![CorrectionCandidate::new(
                value,
                CorrectionTier::Critical,
                0.0,
                CorrectionFamily::Unfixable,
                format!("{}; fix at the source", v.describe()),
            )];
        }

        let kinds = column_kinds(column, validator);
        let mut candidates: Vec<CorrectionCandidate> = Vec::new();
        let mut offer = |candidate: Option<CorrectionCandidate>| {
            if let Some(c) = candidate {
                let duplicate = candidates
                    .iter()
                    .any(|existing| existing.corrected_value == c.corrected_value);
                if c.corrected_value != value && !duplicate {
                    candidates.push(c);
                }
            }
        };

        if kinds.contains(&ColumnKind::Date) {
            offer(date_candidate(value));
        }
        if kinds.contains(&ColumnKind::Numeric) {
            offer(number_candidate(value));
        }
        if kinds.contains(&ColumnKind::Retailer) {
            offer(retailer_candidate(value));
        }
        if kinds.contains(&ColumnKind::AgeGroup) {
            offer(age_group_candidate(value));
        }
        if kinds.contains(&ColumnKind::Gender) {
            offer(gender_candidate(value));
        }
        if kinds.contains(&ColumnKind::Product) {
            offer(product_candidate(value));
        }
        offer(Some(trim_candidate(value)));

        trace!(column, candidates = candidates.len(), "suggested corrections");
        candidates
    }

    /// The whitespace-only fix, used for advisory corrections.
    pub fn trim(&self, value: &str) -> Option<CorrectionCandidate> {
        let candidate = trim_candidate(value);
        (candidate.corrected_value != value).then_some(candidate)
    }

    fn validator_for(&self, column: &str) -> Option<Validator> {
        self.schema.as_ref().and_then(|s| s.validator_for(column))
    }
}

fn date_candidate(value: &str) -> Option<CorrectionCandidate> {
    let date = parse_alternate_date(value)?;
    Some(CorrectionCandidate::new(
        format_iso(date),
        CorrectionTier::Auto,
        0.9,
        CorrectionFamily::DateFormat,
        "Reformat date as YYYY-MM-DD",
    ))
}

fn number_candidate(value: &str) -> Option<CorrectionCandidate> {
    let cleaned = clean_number(value)?;
    Some(CorrectionCandidate::new(
        cleaned,
        CorrectionTier::Auto,
        0.8,
        CorrectionFamily::NumberFormat,
        "Remove currency symbols and separators",
    ))
}

fn retailer_candidate(value: &str) -> Option<CorrectionCandidate> {
    let canonical = canonical_retailer(value)?;
    Some(CorrectionCandidate::new(
        canonical,
        CorrectionTier::Suggested,
        0.7,
        CorrectionFamily::RetailerMapping,
        format!("Map to known retailer '{}'", canonical),
    ))
}

fn age_group_candidate(value: &str) -> Option<CorrectionCandidate> {
    let bucket = standardize_age_group(value)?;
    Some(CorrectionCandidate::new(
        bucket.clone(),
        CorrectionTier::Auto,
        0.9,
        CorrectionFamily::AgeGroup,
        format!("Standardize age group to '{}'", bucket),
    ))
}

fn gender_candidate(value: &str) -> Option<CorrectionCandidate> {
    let gender = standardize_gender(value)?;
    Some(CorrectionCandidate::new(
        gender.clone(),
        CorrectionTier::Suggested,
        0.8,
        CorrectionFamily::Gender,
        format!("Standardize gender to '{}'", gender),
    ))
}

fn product_candidate(value: &str) -> Option<CorrectionCandidate> {
    let titled = title_case(value);
    if titled.is_empty() {
        return None;
    }
    Some(CorrectionCandidate::new(
        titled,
        CorrectionTier::Suggested,
        0.6,
        CorrectionFamily::ProductName,
        "Title-case product name",
    ))
}

fn trim_candidate(value: &str) -> CorrectionCandidate {
    CorrectionCandidate::new(
        value.trim(),
        CorrectionTier::Auto,
        0.95,
        CorrectionFamily::Whitespace,
        "Trim surrounding whitespace",
    )
}
