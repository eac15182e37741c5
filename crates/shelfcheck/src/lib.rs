//! Shelfcheck: ingestion and data-quality checks for retail sales uploads.
//!
//! Uploaded rows are classified as sales, offers or demographics data, their
//! columns renamed to canonical names, their values normalized, and then
//! validated. Every problem becomes an error or warning with row and column
//! provenance, and most come with a proposed correction in one of four tiers:
//!
//! - **auto**: safe to bulk-apply
//! - **suggested**: a confident guess that needs approval
//! - **manual**: needs a value from a person
//! - **critical**: cannot be fixed from the data
//!
//! The original rows are never modified. Approved corrections are written into
//! a copy, which can be validated again to show the score change.
//!
//! # Example
//!
//! ```
//! use shelfcheck::{CorrectionTier, DecisionMap, Pipeline, row_from_pairs};
//!
//! let rows = vec![row_from_pairs([
//!     ("Purchase Date", "24/02/2025"),
//!     ("Product", "Widget"),
//!     ("Retailer", "Tesco"),
//! ])];
//!
//! let pipeline = Pipeline::new();
//! let outcome = pipeline.run(&rows);
//! assert_eq!(outcome.result.errors.len(), 1);
//!
//! let mut decisions = DecisionMap::new();
//! decisions.accept_tier(&outcome.result, CorrectionTier::Auto);
//!
//! let (applied, after, delta) = pipeline.correct(&outcome, &decisions);
//! assert_eq!(applied.rows[0]["receipt_date"], "2025-02-24");
//! assert!(after.is_valid);
//! println!("Quality: {}", delta);
//! ```

pub mod curation;
pub mod error;
pub mod input;
pub mod mapping;
pub mod normalize;
pub mod quality;
pub mod schema;
pub mod suggestion;
pub mod text;
pub mod transform;
pub mod validation;

mod pipeline;

pub use crate::pipeline::{Pipeline, PipelineConfig, PipelineOutcome};
pub use curation::{Decision, DecisionMap, DecisionStatus, ReviewSession};
pub use error::{Result, ShelfcheckError};
pub use input::{Parser, ParserConfig, Row, SourceMetadata, row_from_pairs, rows_from_json};
pub use mapping::{ColumnMapper, MappingReport};
pub use normalize::ValueNormalizer;
pub use quality::{QualityDelta, QualityScorer};
pub use schema::{DatasetType, DomainSchema, TypeDetector, Validator};
pub use suggestion::{Correction, CorrectionSuggestionEngine, CorrectionTier};
pub use transform::{ApplyResult, CorrectionApplier};
pub use validation::{
    IssueCategory, Severity, ValidationEngine, ValidationIssue, ValidationResult, ValidationStats,
};
