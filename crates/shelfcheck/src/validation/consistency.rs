//! Cross-row consistency checks.

use indexmap::IndexMap;
use tracing::warn;

use crate::input::Row;
use crate::normalize::DateFormat;
use crate::schema::{DomainSchema, Validator};
use crate::suggestion::{
    CorrectionCandidate, CorrectionFamily, CorrectionTier, is_canonical_retailer,
};
use crate::text::{collapse_whitespace, levenshtein_distance};

use super::engine::ValidationConfig;
use super::issue::{IssueCategory, ValidationIssue};
use super::result::ResultBuilder;

/// Flag rows whose column count differs from the first row's.
pub(super) fn check_column_drift(rows: &[Row], builder: &mut ResultBuilder) {
    let Some(expected) = rows.first().map(|r| r.len()) else {
        return;
    };

    for (idx, row) in rows.iter().enumerate().skip(1) {
        if row.len() != expected {
            builder.push_issue(
                ValidationIssue::warning(
                    IssueCategory::Consistency,
                    format!(
                        "Row {} has {} columns, expected {}",
                        idx + 1,
                        row.len(),
                        expected
                    ),
                )
                .with_row(idx + 1),
            );
        }
    }
}

/// Flag date columns whose values use more than one format.
///
/// `census_rows` should be the rows as uploaded; after normalization every
/// parseable date is ISO and mixing is no longer visible.
pub(super) fn check_date_formats(
    census_rows: &[Row],
    schema: &DomainSchema,
    builder: &mut ResultBuilder,
) {
    for column in schema
        .columns
        .iter()
        .filter(|c| c.validator == Some(Validator::DateFormat))
    {
        let mut format_counts: IndexMap<DateFormat, (usize, String)> = IndexMap::new();
        for value in census_rows.iter().filter_map(|r| r.get(column.name)) {
            if let Some(format) = DateFormat::detect(value) {
                let entry = format_counts
                    .entry(format)
                    .or_insert_with(|| (0, value.trim().to_string()));
                entry.0 += 1;
            }
        }

        if format_counts.len() < 2 {
            continue;
        }

        let summary: Vec<String> = format_counts
            .iter()
            .map(|(format, (count, example))| {
                format!(
                    "{}: {} ({} value{})",
                    format.description(),
                    example,
                    count,
                    if *count == 1 { "" } else { "s" }
                )
            })
            .collect();

        builder.push_issue(
            ValidationIssue::warning(
                IssueCategory::Consistency,
                format!(
                    "Mixed date formats in '{}' ({}). Standardize to ISO (YYYY-MM-DD)",
                    column.name,
                    summary.join("; ")
                ),
            )
            .with_column(column.name),
        );
    }
}

/// Flag retailer spellings that are probably the same chain.
///
/// Each near-duplicate pair gets one column-level warning; every row holding
/// the non-canonical spelling gets a suggested correction unless that cell
/// already has one.
pub(super) fn check_duplicate_spellings(
    rows: &[Row],
    schema: &DomainSchema,
    config: &ValidationConfig,
    builder: &mut ResultBuilder,
) {
    for column in schema
        .columns
        .iter()
        .filter(|c| c.validator == Some(Validator::RetailerName))
    {
        // Distinct cleaned values → rows holding them
        let mut distinct: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (idx, row) in rows.iter().enumerate() {
            let Some(value) = row.get(column.name) else {
                continue;
            };
            let cleaned = collapse_whitespace(value);
            if cleaned.is_empty() {
                continue;
            }
            distinct.entry(cleaned).or_default().push(idx + 1);
        }

        if distinct.len() > config.max_distinct_for_duplicate_scan {
            warn!(
                column = column.name,
                distinct = distinct.len(),
                cap = config.max_distinct_for_duplicate_scan,
                "too many distinct values, skipping duplicate spelling scan"
            );
            continue;
        }

        let values: Vec<&str> = distinct.keys().map(String::as_str).collect();
        for i in 0..values.len() {
            for j in (i + 1)..values.len() {
                let (a, b) = (values[i], values[j]);
                // Two distinct known chains, e.g. Asda and Aldi
                if is_canonical_retailer(a) && is_canonical_retailer(b) {
                    continue;
                }
                if !is_near_duplicate(a, b, config) {
                    continue;
                }

                let (canonical, variant) = pick_canonical(a, b);
                let issue_id = builder.push_issue(
                    ValidationIssue::warning(
                        IssueCategory::Consistency,
                        format!(
                            "Possible duplicate spellings in '{}': '{}' and '{}' (suggest '{}')",
                            column.name, a, b, canonical
                        ),
                    )
                    .with_column(column.name)
                    .with_value(variant),
                );

                let variant_rows = distinct.get(variant).cloned().unwrap_or_default();
                for row in variant_rows {
                    if builder.has_correction(row, column.name) {
                        continue;
                    }
                    let original = rows[row - 1].get(column.name).cloned().unwrap_or_default();
                    builder.push_correction_for(
                        Some(&issue_id),
                        row,
                        column.name,
                        &original,
                        CorrectionCandidate::new(
                            canonical,
                            CorrectionTier::Suggested,
                            0.7,
                            CorrectionFamily::DuplicateSpelling,
                            format!("Merge '{}' into '{}'", variant, canonical),
                        ),
                    );
                }
            }
        }
    }
}

/// Case-insensitive edit distance and length difference both within bounds.
pub fn is_near_duplicate(a: &str, b: &str, config: &ValidationConfig) -> bool {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let a_len = a_lower.chars().count();
    let b_len = b_lower.chars().count();

    if a_len.abs_diff(b_len) > config.duplicate_max_length_delta {
        return false;
    }
    let distance = levenshtein_distance(&a_lower, &b_lower);
    distance <= config.duplicate_max_distance
}

/// Choose which of two spellings to keep.
///
/// A known retailer's canonical name wins, then the shorter value, then the
/// alphabetically first. How often each spelling occurs does not matter.
fn pick_canonical<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    let a_wins = match (is_canonical_retailer(a), is_canonical_retailer(b)) {
        (true, false) => true,
        (false, true) => false,
        _ => (a.chars().count(), a) < (b.chars().count(), b),
    };

    if a_wins { (a, b) } else { (b, a) }
}
