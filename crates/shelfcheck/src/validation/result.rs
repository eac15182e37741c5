//! Validation result, statistics, and the builder that assembles them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::quality::QualityScorer;
use crate::suggestion::{Correction, CorrectionCandidate, CorrectionTier};

use super::issue::{Severity, ValidationIssue};

/// Row and issue counts for one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStats {
    pub total_rows: usize,
    /// Rows with no failures and at least one non-empty recognized cell.
    pub valid_rows: usize,
    /// Rows with at least one validator failure.
    pub invalid_rows: usize,
    /// Rows whose cells are all empty or whitespace.
    pub empty_rows: usize,
    pub errors_count: usize,
    pub warnings_count: usize,
    /// Errors and warnings that carry or back at least one correction.
    pub correctable_issues: usize,
    /// Corrections in the `auto` tier.
    pub auto_fixable_issues: usize,
}

/// Everything one validation run found.
///
/// Built in a single pass and never modified afterwards; curation decisions
/// live in a separate [`DecisionMap`](crate::curation::DecisionMap).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when there are no errors.
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    /// Every proposed correction, in emission order.
    pub corrections: Vec<Correction>,
    pub stats: ValidationStats,
    /// 0-100.
    pub data_quality_score: f64,
}

impl ValidationResult {
    /// Errors followed by warnings.
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Look up an issue by id.
    pub fn issue(&self, id: &str) -> Option<&ValidationIssue> {
        self.issues().find(|i| i.id == id)
    }

    /// Look up a correction by id.
    pub fn correction(&self, id: &str) -> Option<&Correction> {
        self.corrections.iter().find(|c| c.id == id)
    }

    /// Corrections linked to an issue.
    pub fn corrections_for_issue(&self, issue_id: &str) -> Vec<&Correction> {
        self.corrections
            .iter()
            .filter(|c| c.issue_id.as_deref() == Some(issue_id))
            .collect()
    }

    /// Corrections of one tier.
    pub fn corrections_by_tier(&self, tier: CorrectionTier) -> Vec<&Correction> {
        self.corrections.iter().filter(|c| c.tier == tier).collect()
    }

    /// A result for input that could not be validated at all.
    pub fn structural_failure(total_rows: usize, issue: ValidationIssue) -> Self {
        let mut builder = ResultBuilder::new(total_rows);
        builder.push_issue(issue);
        builder.finish()
    }
}

/// Accumulates issues and corrections, assigning sequential ids.
pub(crate) struct ResultBuilder {
    issues: Vec<ValidationIssue>,
    corrections: Vec<Correction>,
    corrected_cells: HashSet<(usize, String)>,
    next_issue: usize,
    next_correction: usize,
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    pub empty_rows: usize,
}

impl ResultBuilder {
    pub fn new(total_rows: usize) -> Self {
        Self {
            issues: Vec::new(),
            corrections: Vec::new(),
            corrected_cells: HashSet::new(),
            next_issue: 1,
            next_correction: 1,
            total_rows,
            valid_rows: 0,
            invalid_rows: 0,
            empty_rows: 0,
        }
    }

    /// Record an issue and return its id.
    pub fn push_issue(&mut self, mut issue: ValidationIssue) -> String {
        issue.id = format!("iss_{:03}", self.next_issue);
        self.next_issue += 1;
        let id = issue.id.clone();
        self.issues.push(issue);
        id
    }

    /// Record an issue for one cell, attaching the first candidate as its fix.
    pub fn push_cell_issue(
        &mut self,
        mut issue: ValidationIssue,
        row: usize,
        column: &str,
        original: &str,
        candidates: Vec<CorrectionCandidate>,
    ) -> String {
        issue.id = format!("iss_{:03}", self.next_issue);
        self.next_issue += 1;
        let id = issue.id.clone();

        if !candidates.is_empty() {
            let correction_id = self.next_correction_id();
            if let Some(correction) =
                Correction::from_candidates(correction_id, row, column, original, candidates)
            {
                let correction = correction.with_issue(&id);
                issue.correction = Some(correction.clone());
                self.push_correction(correction);
            }
        }

        self.issues.push(issue);
        id
    }

    /// Record a correction with no issue of its own, or one backed by a
    /// column-level issue.
    pub fn push_correction_for(
        &mut self,
        issue_id: Option<&str>,
        row: usize,
        column: &str,
        original: &str,
        candidate: CorrectionCandidate,
    ) {
        let correction_id = self.next_correction_id();
        if let Some(mut correction) =
            Correction::from_candidates(correction_id, row, column, original, vec![candidate])
        {
            correction.issue_id = issue_id.map(String::from);
            self.push_correction(correction);
        }
    }

    /// Whether a cell already has a correction.
    pub fn has_correction(&self, row: usize, column: &str) -> bool {
        self.corrected_cells.contains(&(row, column.to_string()))
    }

    fn next_correction_id(&mut self) -> String {
        let id = format!("cor_{:03}", self.next_correction);
        self.next_correction += 1;
        id
    }

    fn push_correction(&mut self, correction: Correction) {
        self.corrected_cells
            .insert((correction.row, correction.column.clone()));
        self.corrections.push(correction);
    }

    /// Split issues by severity, compute stats and score.
    pub fn finish(self) -> ValidationResult {
        let backing: HashSet<&str> = self
            .corrections
            .iter()
            .filter_map(|c| c.issue_id.as_deref())
            .collect();
        let correctable_issues = self
            .issues
            .iter()
            .filter(|i| i.correction.is_some() || backing.contains(i.id.as_str()))
            .count();
        let auto_fixable_issues = self
            .corrections
            .iter()
            .filter(|c| c.tier == CorrectionTier::Auto)
            .count();

        let (errors, warnings): (Vec<_>, Vec<_>) = self
            .issues
            .into_iter()
            .partition(|i| i.severity == Severity::Error);

        let stats = ValidationStats {
            total_rows: self.total_rows,
            valid_rows: self.valid_rows,
            invalid_rows: self.invalid_rows,
            empty_rows: self.empty_rows,
            errors_count: errors.len(),
            warnings_count: warnings.len(),
            correctable_issues,
            auto_fixable_issues,
        };
        let data_quality_score = QualityScorer::score(&stats);

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            corrections: self.corrections,
            stats,
            data_quality_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::CorrectionFamily;
    use crate::validation::IssueCategory;

    fn manual() -> CorrectionCandidate {
        CorrectionCandidate::new(
            "",
            CorrectionTier::Manual,
            0.0,
            CorrectionFamily::ManualInput,
            "Enter a value",
        )
    }

    #[test]
    fn test_sequential_ids() {
        let mut builder = ResultBuilder::new(2);
        let first = builder.push_issue(ValidationIssue::warning(IssueCategory::Data, "a"));
        let second = builder.push_cell_issue(
            ValidationIssue::error(IssueCategory::Data, "b"),
            1,
            "product_name",
            "",
            vec![manual()],
        );

        assert_eq!(first, "iss_001");
        assert_eq!(second, "iss_002");

        let result = builder.finish();
        assert_eq!(result.corrections[0].id, "cor_001");
        assert_eq!(result.corrections[0].issue_id.as_deref(), Some("iss_002"));
        assert_eq!(result.errors[0].correction.as_ref().unwrap().id, "cor_001");
    }

    #[test]
    fn test_stats_counts() {
        let mut builder = ResultBuilder::new(4);
        builder.push_cell_issue(
            ValidationIssue::error(IssueCategory::Data, "bad"),
            1,
            "chain",
            "x",
            Vec::new(),
        );
        let warn = builder.push_issue(ValidationIssue::warning(IssueCategory::Consistency, "dup"));
        builder.push_correction_for(
            Some(&warn),
            2,
            "chain",
            "Teso",
            CorrectionCandidate::new(
                "Tesco",
                CorrectionTier::Suggested,
                0.7,
                CorrectionFamily::DuplicateSpelling,
                "Merge spelling",
            ),
        );
        builder.push_correction_for(
            None,
            3,
            "brand",
            " Acme",
            CorrectionCandidate::new(
                "Acme",
                CorrectionTier::Auto,
                0.95,
                CorrectionFamily::Whitespace,
                "Trim",
            ),
        );

        assert!(builder.has_correction(3, "brand"));
        assert!(!builder.has_correction(1, "chain"));

        let result = builder.finish();
        assert!(!result.is_valid);
        assert_eq!(result.stats.errors_count, 1);
        assert_eq!(result.stats.warnings_count, 1);
        assert_eq!(result.stats.correctable_issues, 1);
        assert_eq!(result.stats.auto_fixable_issues, 1);
        assert_eq!(result.corrections_for_issue(&warn).len(), 1);
        // 100 - (2 + 1) / 4 * 10
        assert_eq!(result.data_quality_score, 92.5);
    }

    #[test]
    fn test_camel_case_json() {
        let result = ResultBuilder::new(0).finish();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isValid"], true);
        assert_eq!(json["dataQualityScore"], 100.0);
        assert_eq!(json["stats"]["totalRows"], 0);
    }
}
