//! Results of applying corrections to rows.

use serde::{Deserialize, Serialize};

use crate::input::Row;
use crate::suggestion::CorrectionTier;

/// Result of applying corrections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyResult {
    /// The corrected rows. Same length and order as the input.
    pub rows: Vec<Row>,

    /// One entry per cell write, in application order.
    pub audit: Vec<RowAudit>,

    /// Corrections that could not be written.
    pub skipped: Vec<SkippedCorrection>,
}

impl ApplyResult {
    /// Number of cell writes.
    pub fn applied_count(&self) -> usize {
        self.audit.len()
    }

    /// Number of distinct rows touched.
    pub fn rows_modified(&self) -> usize {
        let mut rows: Vec<usize> = self.audit.iter().map(|a| a.row).collect();
        rows.sort_unstable();
        rows.dedup();
        rows.len()
    }
}

/// Audit information for a single cell write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowAudit {
    /// Correction that produced the write.
    pub correction_id: String,

    /// Row number (1-based).
    pub row: usize,

    /// Column that was changed.
    pub column: String,

    /// Value before this write.
    pub original_value: String,

    /// Value after this write.
    pub new_value: String,

    /// Tier of the correction.
    pub tier: CorrectionTier,
}

/// Why a correction was not written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Critical corrections are never written.
    NotApplicable,
    /// The row number is outside the row set.
    RowOutOfRange,
    /// The row has no such column.
    ColumnMissing,
}

impl SkipReason {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::NotApplicable => "not applicable",
            SkipReason::RowOutOfRange => "row out of range",
            SkipReason::ColumnMissing => "column missing",
        }
    }
}

/// A correction the applier passed over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCorrection {
    pub correction_id: String,
    pub reason: SkipReason,
}
