//! The pipeline façade: detection, mapping, normalization, validation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::curation::DecisionMap;
use crate::error::{Result, ShelfcheckError};
use crate::input::{Row, union_headers};
use crate::mapping::{ColumnMapper, MappingReport};
use crate::normalize::ValueNormalizer;
use crate::quality::{QualityDelta, QualityScorer};
use crate::schema::{DatasetType, DomainSchema, TypeDetector};
use crate::transform::{ApplyResult, CorrectionApplier};
use crate::validation::{IssueCategory, ValidationConfig, ValidationEngine, ValidationIssue, ValidationResult};

/// Configuration for a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Skip detection and use this type.
    pub dataset_type: Option<DatasetType>,
    /// Run the value normalizer before validating.
    pub normalize_values: bool,
    /// Cells longer than this many characters get a warning.
    pub long_value_threshold: usize,
    /// Largest edit distance between retailer spellings treated as one.
    pub duplicate_max_distance: usize,
    /// Largest length difference between such spellings.
    pub duplicate_max_length_delta: usize,
    /// Above this many distinct retailer values the duplicate scan is skipped.
    pub max_distinct_for_duplicate_scan: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let validation = ValidationConfig::default();
        Self {
            dataset_type: None,
            normalize_values: true,
            long_value_threshold: validation.long_value_threshold,
            duplicate_max_distance: validation.duplicate_max_distance,
            duplicate_max_length_delta: validation.duplicate_max_length_delta,
            max_distinct_for_duplicate_scan: validation.max_distinct_for_duplicate_scan,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ShelfcheckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PipelineConfig = serde_json::from_str(&text)?;
        config.check()?;
        Ok(config)
    }

    /// Reject settings that would make a pass meaningless.
    pub fn check(&self) -> Result<()> {
        if self.dataset_type == Some(DatasetType::Unknown) {
            return Err(ShelfcheckError::Config(
                "dataset_type cannot be 'unknown'".to_string(),
            ));
        }
        if self.long_value_threshold == 0 {
            return Err(ShelfcheckError::Config(
                "long_value_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Thresholds for the validation engine.
    pub fn validation_config(&self) -> ValidationConfig {
        ValidationConfig {
            long_value_threshold: self.long_value_threshold,
            duplicate_max_distance: self.duplicate_max_distance,
            duplicate_max_length_delta: self.duplicate_max_length_delta,
            max_distinct_for_duplicate_scan: self.max_distinct_for_duplicate_scan,
        }
    }
}

/// Everything one pipeline run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutcome {
    /// Detected or overridden type.
    pub dataset_type: DatasetType,
    /// Column renames.
    pub mapping: MappingReport,
    /// Rows after column mapping, before value normalization.
    pub mapped_rows: Vec<Row>,
    /// Rows as validated; corrections refer to these.
    pub rows: Vec<Row>,
    /// Validation result.
    pub result: ValidationResult,
}

impl PipelineOutcome {
    fn structural(dataset_type: DatasetType, rows: &[Row], message: String) -> Self {
        Self {
            dataset_type,
            mapping: MappingReport::default(),
            mapped_rows: rows.to_vec(),
            rows: rows.to_vec(),
            result: ValidationResult::structural_failure(
                rows.len(),
                ValidationIssue::error(IssueCategory::Structure, message),
            ),
        }
    }

    /// Apply the corrections a reviewer approved.
    pub fn apply(&self, decisions: &DecisionMap) -> ApplyResult {
        CorrectionApplier::apply_decisions(&self.rows, &self.result, decisions)
    }
}

/// Runs uploaded rows through every stage.
///
/// # Example
///
/// ```
/// use shelfcheck::{Pipeline, row_from_pairs};
///
/// let rows = vec![row_from_pairs([
///     ("receipt_date", "02/24/2025"),
///     ("product_name", "Widget"),
///     ("chain", "Tesco"),
/// ])];
///
/// let outcome = Pipeline::new().run(&rows);
/// assert_eq!(outcome.dataset_type.as_str(), "sales");
/// assert_eq!(outcome.rows[0]["receipt_date"], "2025-02-24");
/// assert!(outcome.result.is_valid);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Detect, map, normalize and validate.
    pub fn run(&self, rows: &[Row]) -> PipelineOutcome {
        if rows.is_empty() {
            return PipelineOutcome::structural(
                DatasetType::Unknown,
                rows,
                "No data rows found".to_string(),
            );
        }

        let dataset_type = match self.config.dataset_type {
            Some(dataset_type) => dataset_type,
            None => TypeDetector::detect(&union_headers(rows)),
        };
        info!(dataset_type = %dataset_type, rows = rows.len(), "running pipeline");

        let schema = match DomainSchema::for_type(dataset_type) {
            Ok(schema) => schema,
            Err(e) => {
                warn!(error = %e, "no schema for dataset");
                return PipelineOutcome::structural(
                    dataset_type,
                    rows,
                    "Could not determine the dataset type from the column headers \
                     (expected sales, offers, or demographics columns)"
                        .to_string(),
                );
            }
        };

        let (mapped_rows, mapping) = ColumnMapper::map_rows(rows, dataset_type);
        let normalized = if self.config.normalize_values {
            ValueNormalizer::new(&schema).normalize(&mapped_rows)
        } else {
            mapped_rows.clone()
        };

        let engine = ValidationEngine::with_config(&schema, self.config.validation_config());
        let result = engine.validate_with_census(&normalized, &mapped_rows);

        info!(
            errors = result.stats.errors_count,
            warnings = result.stats.warnings_count,
            corrections = result.corrections.len(),
            score = result.data_quality_score,
            "pipeline finished"
        );

        PipelineOutcome {
            dataset_type,
            mapping,
            mapped_rows,
            rows: normalized,
            result,
        }
    }

    /// Run with an explicit type named by the caller.
    ///
    /// A name that is not a known type yields a single structure error.
    pub fn run_with_override(&self, rows: &[Row], type_name: &str) -> PipelineOutcome {
        match type_name.parse::<DatasetType>() {
            Ok(dataset_type) => {
                let config = PipelineConfig {
                    dataset_type: Some(dataset_type),
                    ..self.config.clone()
                };
                Pipeline::with_config(config).run(rows)
            }
            Err(e) => {
                warn!(error = %e, "rejected dataset type override");
                PipelineOutcome::structural(DatasetType::Unknown, rows, e.to_string())
            }
        }
    }

    /// Validate rows that are already mapped, such as the output of the applier.
    ///
    /// Columns are not remapped; values are normalized again when configured,
    /// which leaves already-normalized values unchanged.
    pub fn revalidate(&self, dataset_type: DatasetType, rows: &[Row]) -> ValidationResult {
        let schema = match DomainSchema::for_type(dataset_type) {
            Ok(schema) => schema,
            Err(e) => {
                return ValidationResult::structural_failure(
                    rows.len(),
                    ValidationIssue::error(IssueCategory::Structure, e.to_string()),
                );
            }
        };

        let normalized = if self.config.normalize_values {
            ValueNormalizer::new(&schema).normalize(rows)
        } else {
            rows.to_vec()
        };
        let result = ValidationEngine::with_config(&schema, self.config.validation_config())
            .validate(&normalized);
        debug!(
            errors = result.stats.errors_count,
            warnings = result.stats.warnings_count,
            "revalidated corrected rows"
        );
        result
    }

    /// Apply approved corrections, revalidate, and report the score change.
    pub fn correct(
        &self,
        outcome: &PipelineOutcome,
        decisions: &DecisionMap,
    ) -> (ApplyResult, ValidationResult, QualityDelta) {
        let applied = outcome.apply(decisions);
        let after = self.revalidate(outcome.dataset_type, &applied.rows);
        let delta = QualityScorer::delta(&outcome.result.stats, &after.stats);
        (applied, after, delta)
    }
}
