//! The validation engine: structure, required columns, cells, then cross-row.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::{Row, first_row_headers};
use crate::schema::{ColumnSpec, DomainSchema, Validator};
use crate::suggestion::{CorrectionSuggestionEngine, canonical_retailer};
use crate::text::{is_blank, normalize_header};

use super::consistency::{check_column_drift, check_date_formats, check_duplicate_spellings};
use super::issue::{IssueCategory, ValidationIssue};
use super::result::{ResultBuilder, ValidationResult};

/// Thresholds for the validation passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Cells longer than this many characters get a warning.
    pub long_value_threshold: usize,
    /// Largest edit distance between two retailer spellings treated as one.
    pub duplicate_max_distance: usize,
    /// Largest length difference between two such spellings.
    pub duplicate_max_length_delta: usize,
    /// Above this many distinct values the duplicate scan is skipped.
    pub max_distinct_for_duplicate_scan: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            long_value_threshold: 500,
            duplicate_max_distance: 2,
            duplicate_max_length_delta: 2,
            max_distinct_for_duplicate_scan: 500,
        }
    }
}

/// Validates rows against one domain schema.
pub struct ValidationEngine<'a> {
    schema: &'a DomainSchema,
    config: ValidationConfig,
    suggester: CorrectionSuggestionEngine,
}

impl<'a> ValidationEngine<'a> {
    /// Create an engine with default thresholds.
    pub fn new(schema: &'a DomainSchema) -> Self {
        Self::with_config(schema, ValidationConfig::default())
    }

    /// Create an engine with custom thresholds.
    pub fn with_config(schema: &'a DomainSchema, config: ValidationConfig) -> Self {
        Self {
            schema,
            config,
            suggester: CorrectionSuggestionEngine::new(schema.dataset_type),
        }
    }

    /// Validate rows. The date-format census is taken from the rows themselves.
    pub fn validate(&self, rows: &[Row]) -> ValidationResult {
        self.validate_with_census(rows, rows)
    }

    /// Validate rows, taking the date-format census from `census_rows`.
    ///
    /// The pipeline passes the mapped but unnormalized rows here.
    pub fn validate_with_census(&self, rows: &[Row], census_rows: &[Row]) -> ValidationResult {
        let mut builder = ResultBuilder::new(rows.len());

        if rows.is_empty() {
            builder.push_issue(ValidationIssue::error(
                IssueCategory::Structure,
                "No data rows found",
            ));
            return builder.finish();
        }

        let headers = first_row_headers(rows);
        if headers.is_empty() {
            builder.push_issue(ValidationIssue::error(
                IssueCategory::Structure,
                "First row has no columns",
            ));
            return builder.finish();
        }

        self.check_required_columns(&headers, &mut builder);

        let header_columns: HashSet<String> = headers.iter().map(|h| normalize_header(h)).collect();
        for (idx, row) in rows.iter().enumerate() {
            self.validate_row(idx + 1, row, &header_columns, &mut builder);
        }

        check_column_drift(rows, &mut builder);
        check_date_formats(census_rows, self.schema, &mut builder);
        check_duplicate_spellings(rows, self.schema, &self.config, &mut builder);

        let result = builder.finish();
        debug!(
            dataset_type = %self.schema.dataset_type,
            rows = result.stats.total_rows,
            errors = result.stats.errors_count,
            warnings = result.stats.warnings_count,
            corrections = result.corrections.len(),
            score = result.data_quality_score,
            "validated rows"
        );
        result
    }

    fn check_required_columns(&self, headers: &[String], builder: &mut ResultBuilder) {
        let present: HashSet<String> = headers.iter().map(|h| normalize_header(h)).collect();

        for required in self.schema.required_columns() {
            if !present.contains(required) {
                builder.push_issue(
                    ValidationIssue::error(
                        IssueCategory::Columns,
                        format!(
                            "Missing required column '{}' (critical: add the column and re-upload)",
                            required
                        ),
                    )
                    .with_column(required),
                );
            }
        }
    }

    fn validate_row(
        &self,
        row_number: usize,
        row: &Row,
        header_columns: &HashSet<String>,
        builder: &mut ResultBuilder,
    ) {
        if row.values().all(|v| is_blank(v)) {
            builder.empty_rows += 1;
            builder.push_issue(
                ValidationIssue::warning(IssueCategory::Data, format!("Row {} is empty", row_number))
                    .with_row(row_number),
            );
            return;
        }

        let mut failures = 0;
        let mut recognized = false;
        let mut seen: HashSet<&str> = HashSet::new();

        for (column, value) in row {
            let Some(spec) = self.schema.column(column) else {
                continue;
            };
            seen.insert(spec.name);
            if !is_blank(value) {
                recognized = true;
            }
            if !self.check_cell(row_number, column, value, spec, builder) {
                failures += 1;
            }
        }

        // Header columns this row does not carry are checked as blank cells
        for spec in &self.schema.columns {
            if !seen.contains(spec.name)
                && header_columns.contains(spec.name)
                && !self.check_cell(row_number, spec.name, "", spec, builder)
            {
                failures += 1;
            }
        }

        for (column, value) in row {
            let length = value.chars().count();
            if length > self.config.long_value_threshold {
                builder.push_issue(
                    ValidationIssue::warning(
                        IssueCategory::Consistency,
                        format!(
                            "Row {}: value in '{}' is {} characters long (limit {})",
                            row_number, column, length, self.config.long_value_threshold
                        ),
                    )
                    .with_row(row_number)
                    .with_column(column),
                );
            }

            if !is_blank(value) && !builder.has_correction(row_number, column) {
                if let Some(candidate) = self.suggester.trim(value) {
                    builder.push_correction_for(None, row_number, column, value, candidate);
                }
            }
        }

        if failures > 0 {
            builder.invalid_rows += 1;
        } else if recognized {
            builder.valid_rows += 1;
        }
    }

    /// Run the column's validator over one cell. Returns false on failure.
    fn check_cell(
        &self,
        row_number: usize,
        column: &str,
        value: &str,
        spec: &ColumnSpec,
        builder: &mut ResultBuilder,
    ) -> bool {
        if spec.allow_empty && is_blank(value) {
            return true;
        }
        let Some(validator) = spec.validator else {
            return true;
        };

        if !validator.check(value) {
            builder.push_cell_issue(
                ValidationIssue::error(
                    IssueCategory::Data,
                    format!(
                        "Row {}: {} in '{}' (got '{}')",
                        row_number,
                        validator.describe(),
                        column,
                        value
                    ),
                )
                .with_row(row_number)
                .with_column(column)
                .with_value(value),
                row_number,
                column,
                value,
                self.suggester.suggest(column, value),
            );
            return false;
        }
        if validator == Validator::RetailerName {
            self.check_retailer_spelling(row_number, column, value, builder);
        }
        true
    }

    /// Warn on a known misspelling of a canonical retailer.
    fn check_retailer_spelling(
        &self,
        row_number: usize,
        column: &str,
        value: &str,
        builder: &mut ResultBuilder,
    ) {
        let Some(canonical) = canonical_retailer(value) else {
            return;
        };
        if canonical == value.trim() {
            return;
        }

        builder.push_cell_issue(
            ValidationIssue::warning(
                IssueCategory::Data,
                format!(
                    "Row {}: '{}' in '{}' looks like a variant of '{}'",
                    row_number, value, column, canonical
                ),
            )
            .with_row(row_number)
            .with_column(column)
            .with_value(value),
            row_number,
            column,
            value,
            self.suggester.suggest(column, value),
        );
    }
}
