//! Data-quality score: a 0-100 summary of error and warning density.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationStats;

/// Computes quality scores from validation statistics.
pub struct QualityScorer;

impl QualityScorer {
    /// Score from raw counts.
    ///
    /// Errors weigh twice as much as warnings. An empty dataset scores 100.
    pub fn score_counts(errors: usize, warnings: usize, total_rows: usize) -> f64 {
        if total_rows == 0 {
            return 100.0;
        }
        let penalty = (errors as f64 * 2.0 + warnings as f64) / total_rows as f64 * 10.0;
        (100.0 - penalty).clamp(0.0, 100.0)
    }

    /// Score a validation result's statistics.
    pub fn score(stats: &ValidationStats) -> f64 {
        Self::score_counts(stats.errors_count, stats.warnings_count, stats.total_rows)
    }

    /// Compare scores before and after corrections.
    pub fn delta(before: &ValidationStats, after: &ValidationStats) -> QualityDelta {
        QualityDelta::new(Self::score(before), Self::score(after))
    }
}

/// Score change across a correction pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityDelta {
    /// Score of the uncorrected data.
    pub before: f64,
    /// Score after applying corrections.
    pub after: f64,
    /// `after - before`.
    pub change: f64,
}

impl QualityDelta {
    /// Create a delta from two scores.
    pub fn new(before: f64, after: f64) -> Self {
        Self {
            before,
            after,
            change: after - before,
        }
    }

    /// Whether the corrections improved the score.
    pub fn improved(&self) -> bool {
        self.change > 0.0
    }
}

impl fmt::Display for QualityDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}% → {:.0}%", self.before, self.after)
    }
}
