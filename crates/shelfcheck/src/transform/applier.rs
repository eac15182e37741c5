//! Writes selected corrections into a copy of the rows.

use tracing::debug;

use crate::curation::DecisionMap;
use crate::input::Row;
use crate::suggestion::Correction;
use crate::validation::ValidationResult;

use super::operations::{ApplyResult, RowAudit, SkipReason, SkippedCorrection};

/// Applies corrections to rows.
///
/// The input rows are never modified; a new row set is returned. Nothing is
/// re-validated here.
pub struct CorrectionApplier;

impl CorrectionApplier {
    /// Apply every given correction, in order.
    ///
    /// Corrections are matched by 1-based row number and column name. When
    /// several target the same cell the last one wins.
    pub fn apply<'c>(
        rows: &[Row],
        corrections: impl IntoIterator<Item = &'c Correction>,
    ) -> ApplyResult {
        let mut result = ApplyResult {
            rows: rows.to_vec(),
            ..ApplyResult::default()
        };

        for correction in corrections {
            if !correction.is_applicable() {
                result.skipped.push(skip(correction, SkipReason::NotApplicable));
                continue;
            }

            let Some(row) = correction
                .row
                .checked_sub(1)
                .and_then(|idx| result.rows.get_mut(idx))
            else {
                result.skipped.push(skip(correction, SkipReason::RowOutOfRange));
                continue;
            };

            let Some(cell) = row.get_mut(&correction.column) else {
                result.skipped.push(skip(correction, SkipReason::ColumnMissing));
                continue;
            };

            let previous = std::mem::replace(cell, correction.corrected_value.clone());
            result.audit.push(RowAudit {
                correction_id: correction.id.clone(),
                row: correction.row,
                column: correction.column.clone(),
                original_value: previous,
                new_value: correction.corrected_value.clone(),
                tier: correction.tier,
            });
        }

        debug!(
            applied = result.audit.len(),
            skipped = result.skipped.len(),
            rows_modified = result.rows_modified(),
            "applied corrections"
        );

        result
    }

    /// Apply the corrections a reviewer approved, with their values.
    pub fn apply_decisions(
        rows: &[Row],
        result: &ValidationResult,
        decisions: &DecisionMap,
    ) -> ApplyResult {
        let approved = decisions.accepted(&result.corrections);
        Self::apply(rows, &approved)
    }
}

fn skip(correction: &Correction, reason: SkipReason) -> SkippedCorrection {
    SkippedCorrection {
        correction_id: correction.id.clone(),
        reason,
    }
}
