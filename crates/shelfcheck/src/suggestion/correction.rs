//! Correction types: tiers, families, candidates, and proposed cell fixes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How much human attention a correction needs before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionTier {
    /// Safe to bulk-apply.
    Auto,
    /// A confident heuristic that still needs approval.
    Suggested,
    /// Needs a value typed in by a person.
    Manual,
    /// No fix is possible from the data.
    Critical,
}

impl CorrectionTier {
    /// All tiers, most automatic first.
    pub const ALL: [CorrectionTier; 4] = [
        CorrectionTier::Auto,
        CorrectionTier::Suggested,
        CorrectionTier::Manual,
        CorrectionTier::Critical,
    ];

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            CorrectionTier::Auto => "Auto",
            CorrectionTier::Suggested => "Suggested",
            CorrectionTier::Manual => "Manual",
            CorrectionTier::Critical => "Critical",
        }
    }

    /// Whether a correction of this tier can ever be written into the data.
    pub fn is_applicable(&self) -> bool {
        !matches!(self, CorrectionTier::Critical)
    }
}

impl fmt::Display for CorrectionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CorrectionTier::Auto => "auto",
            CorrectionTier::Suggested => "suggested",
            CorrectionTier::Manual => "manual",
            CorrectionTier::Critical => "critical",
        })
    }
}

/// The heuristic that produced a correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionFamily {
    DateFormat,
    NumberFormat,
    RetailerMapping,
    AgeGroup,
    Gender,
    ProductName,
    Whitespace,
    DuplicateSpelling,
    ManualInput,
    Unfixable,
}

impl CorrectionFamily {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            CorrectionFamily::DateFormat => "Date format",
            CorrectionFamily::NumberFormat => "Number format",
            CorrectionFamily::RetailerMapping => "Retailer mapping",
            CorrectionFamily::AgeGroup => "Age group",
            CorrectionFamily::Gender => "Gender",
            CorrectionFamily::ProductName => "Product name",
            CorrectionFamily::Whitespace => "Whitespace",
            CorrectionFamily::DuplicateSpelling => "Duplicate spelling",
            CorrectionFamily::ManualInput => "Manual input",
            CorrectionFamily::Unfixable => "Unfixable",
        }
    }
}

/// One proposed replacement value, before it is bound to a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionCandidate {
    /// Proposed value.
    pub corrected_value: String,
    /// Tier of this proposal.
    pub tier: CorrectionTier,
    /// Confidence (0.0-1.0).
    pub confidence: f64,
    /// Heuristic family.
    pub family: CorrectionFamily,
    /// What the change does.
    pub description: String,
}

impl CorrectionCandidate {
    /// Create a new candidate.
    pub fn new(
        corrected_value: impl Into<String>,
        tier: CorrectionTier,
        confidence: f64,
        family: CorrectionFamily,
        description: impl Into<String>,
    ) -> Self {
        Self {
            corrected_value: corrected_value.into(),
            tier,
            confidence,
            family,
            description: description.into(),
        }
    }
}

/// A proposed fix for one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    /// Unique identifier within a validation result.
    pub id: String,
    /// Issue this correction addresses; `None` for advisory fixes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<String>,
    /// Row number (1-based).
    pub row: usize,
    /// Canonical column name.
    pub column: String,
    /// Value currently in the cell.
    pub original_value: String,
    /// Value the correction writes.
    pub corrected_value: String,
    /// Tier of the primary candidate.
    pub tier: CorrectionTier,
    /// Confidence of the primary candidate (0.0-1.0).
    pub confidence: f64,
    /// What the change does.
    pub description: String,
    /// Heuristic family of the primary candidate.
    pub family: CorrectionFamily,
    /// Lower-ranked candidates, in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<CorrectionCandidate>,
}

impl Correction {
    /// Bind the first candidate to a cell, keeping the rest as alternatives.
    ///
    /// Returns `None` when there are no candidates.
    pub fn from_candidates(
        id: impl Into<String>,
        row: usize,
        column: impl Into<String>,
        original_value: impl Into<String>,
        candidates: Vec<CorrectionCandidate>,
    ) -> Option<Self> {
        let mut candidates = candidates.into_iter();
        let primary = candidates.next()?;
        Some(Self {
            id: id.into(),
            issue_id: None,
            row,
            column: column.into(),
            original_value: original_value.into(),
            corrected_value: primary.corrected_value,
            tier: primary.tier,
            confidence: primary.confidence,
            description: primary.description,
            family: primary.family,
            alternatives: candidates.collect(),
        })
    }

    /// Link this correction to the issue it addresses.
    pub fn with_issue(mut self, issue_id: impl Into<String>) -> Self {
        self.issue_id = Some(issue_id.into());
        self
    }

    /// Whether this correction can be written into the data.
    pub fn is_applicable(&self) -> bool {
        self.tier.is_applicable()
    }
}
