//! Decisions on proposed corrections, kept apart from the validation result.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShelfcheckError};
use crate::suggestion::{Correction, CorrectionTier};
use crate::validation::ValidationResult;

/// Status of a decision on a correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    /// Not yet reviewed.
    Pending,
    /// Approved as proposed.
    Accepted,
    /// Approved with a reviewer-supplied value.
    Modified,
    /// Not approved.
    Rejected,
}

impl DecisionStatus {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DecisionStatus::Pending => "Pending",
            DecisionStatus::Accepted => "Accepted",
            DecisionStatus::Modified => "Modified",
            DecisionStatus::Rejected => "Rejected",
        }
    }

    /// Check if this is a terminal decision (not pending).
    pub fn is_decided(&self) -> bool {
        !matches!(self, DecisionStatus::Pending)
    }

    /// Check if the correction should be applied.
    pub fn is_approved(&self) -> bool {
        matches!(self, DecisionStatus::Accepted | DecisionStatus::Modified)
    }
}

/// A reviewer's decision on one correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// The correction this decision addresses.
    pub correction_id: String,

    /// Current status.
    pub status: DecisionStatus,

    /// Replacement value for `Modified` decisions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Who made the decision (e.g., "user:email@example.com").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<String>,

    /// When the decision was made.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,

    /// Optional notes explaining the decision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Decision {
    /// Create a decision stamped with the current time.
    pub fn new(correction_id: &str, status: DecisionStatus) -> Self {
        Self {
            correction_id: correction_id.to_string(),
            status,
            value: None,
            decided_by: None,
            decided_at: Some(Utc::now()),
            notes: None,
        }
    }

    /// Set who made the decision.
    pub fn with_decided_by(mut self, by: impl Into<String>) -> Self {
        self.decided_by = Some(by.into());
        self
    }

    /// Set the replacement value for a modified correction.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the decision notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Counts of corrections by decision status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionCounts {
    pub pending: usize,
    pub accepted: usize,
    pub modified: usize,
    pub rejected: usize,
}

impl DecisionCounts {
    /// Total number of corrections.
    pub fn total(&self) -> usize {
        self.pending + self.accepted + self.modified + self.rejected
    }

    /// Number of corrections that will be applied.
    pub fn approved(&self) -> usize {
        self.accepted + self.modified
    }
}

/// Caller-owned decisions, keyed by correction id.
///
/// A correction with no entry is pending. Deciding again replaces the
/// previous decision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionMap {
    decisions: IndexMap<String, Decision>,
}

impl DecisionMap {
    /// Create an empty map; everything is pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a correction as proposed.
    ///
    /// Critical corrections cannot be accepted, and manual ones need a value
    /// via [`modify`](Self::modify).
    pub fn accept(&mut self, result: &ValidationResult, correction_id: &str) -> Result<&Decision> {
        let correction = find(result, correction_id)?;
        match correction.tier {
            CorrectionTier::Critical => {
                return Err(ShelfcheckError::NotApplicable {
                    id: correction_id.to_string(),
                    tier: correction.tier,
                });
            }
            CorrectionTier::Manual => {
                return Err(ShelfcheckError::ValueRequired(correction_id.to_string()));
            }
            CorrectionTier::Auto | CorrectionTier::Suggested => {}
        }
        Ok(self.insert(Decision::new(correction_id, DecisionStatus::Accepted)))
    }

    /// Accept a correction with a reviewer-supplied value.
    pub fn modify(
        &mut self,
        result: &ValidationResult,
        correction_id: &str,
        value: impl Into<String>,
    ) -> Result<&Decision> {
        let correction = find(result, correction_id)?;
        if !correction.is_applicable() {
            return Err(ShelfcheckError::NotApplicable {
                id: correction_id.to_string(),
                tier: correction.tier,
            });
        }
        let mut decision = Decision::new(correction_id, DecisionStatus::Modified);
        decision.value = Some(value.into());
        Ok(self.insert(decision))
    }

    /// Reject a correction.
    pub fn reject(
        &mut self,
        result: &ValidationResult,
        correction_id: &str,
        notes: Option<&str>,
    ) -> Result<&Decision> {
        find(result, correction_id)?;
        let mut decision = Decision::new(correction_id, DecisionStatus::Rejected);
        decision.notes = notes.map(String::from);
        Ok(self.insert(decision))
    }

    /// Record a prepared decision (e.g. with attribution), checking it first.
    pub fn record(&mut self, result: &ValidationResult, decision: Decision) -> Result<&Decision> {
        let correction = find(result, &decision.correction_id)?;
        if decision.status.is_approved() && !correction.is_applicable() {
            return Err(ShelfcheckError::NotApplicable {
                id: decision.correction_id.clone(),
                tier: correction.tier,
            });
        }
        let needs_value = match decision.status {
            DecisionStatus::Accepted => correction.tier == CorrectionTier::Manual,
            DecisionStatus::Modified => decision.value.is_none(),
            _ => false,
        };
        if needs_value {
            return Err(ShelfcheckError::ValueRequired(decision.correction_id.clone()));
        }
        Ok(self.insert(decision))
    }

    /// Accept every pending correction of a tier; returns how many were accepted.
    ///
    /// Only `auto` and `suggested` tiers can be bulk-accepted.
    pub fn accept_tier(&mut self, result: &ValidationResult, tier: CorrectionTier) -> usize {
        if !matches!(tier, CorrectionTier::Auto | CorrectionTier::Suggested) {
            return 0;
        }
        let ids: Vec<String> = result
            .corrections
            .iter()
            .filter(|c| c.tier == tier && !self.is_decided(&c.id))
            .map(|c| c.id.clone())
            .collect();
        for id in &ids {
            self.insert(Decision::new(id, DecisionStatus::Accepted));
        }
        ids.len()
    }

    /// Forget a decision; the correction becomes pending again.
    pub fn undo(&mut self, correction_id: &str) -> Option<Decision> {
        self.decisions.shift_remove(correction_id)
    }

    /// The decision for a correction, if any.
    pub fn get(&self, correction_id: &str) -> Option<&Decision> {
        self.decisions.get(correction_id)
    }

    /// Status of a correction (pending when undecided).
    pub fn status(&self, correction_id: &str) -> DecisionStatus {
        self.get(correction_id)
            .map(|d| d.status)
            .unwrap_or(DecisionStatus::Pending)
    }

    /// Whether a correction has a non-pending decision.
    pub fn is_decided(&self, correction_id: &str) -> bool {
        self.status(correction_id).is_decided()
    }

    /// Whether a correction is approved for application.
    pub fn is_accepted(&self, correction_id: &str) -> bool {
        self.status(correction_id).is_approved()
    }

    /// The value to write for a correction: the reviewer's value if modified.
    pub fn value_for<'a>(&'a self, correction: &'a Correction) -> &'a str {
        self.get(&correction.id)
            .and_then(|d| d.value.as_deref())
            .unwrap_or(correction.corrected_value.as_str())
    }

    /// Approved corrections, in their original order, with reviewer values
    /// substituted.
    pub fn accepted(&self, corrections: &[Correction]) -> Vec<Correction> {
        corrections
            .iter()
            .filter(|c| c.is_applicable() && self.is_accepted(&c.id))
            .map(|c| {
                let mut approved = c.clone();
                approved.corrected_value = self.value_for(c).to_string();
                approved
            })
            .collect()
    }

    /// Count corrections by status.
    pub fn counts(&self, corrections: &[Correction]) -> DecisionCounts {
        let mut counts = DecisionCounts::default();
        for correction in corrections {
            match self.status(&correction.id) {
                DecisionStatus::Pending => counts.pending += 1,
                DecisionStatus::Accepted => counts.accepted += 1,
                DecisionStatus::Modified => counts.modified += 1,
                DecisionStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }

    /// Number of recorded decisions.
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    /// Whether nothing has been decided.
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Iterate over recorded decisions in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = &Decision> {
        self.decisions.values()
    }

    fn insert(&mut self, decision: Decision) -> &Decision {
        let id = decision.correction_id.clone();
        self.decisions.shift_remove(&id);
        self.decisions.entry(id).or_insert(decision)
    }
}

fn find<'a>(result: &'a ValidationResult, correction_id: &str) -> Result<&'a Correction> {
    result
        .correction(correction_id)
        .ok_or_else(|| ShelfcheckError::CorrectionNotFound(correction_id.to_string()))
}
