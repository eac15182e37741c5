//! Validation issue types.

use serde::{Deserialize, Serialize};

use crate::suggestion::Correction;

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Should be reviewed; does not make a row invalid.
    Warning,
    /// Definite problem that should be fixed.
    Error,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// Which pass of validation raised an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    /// The row set as a whole is unusable.
    Structure,
    /// Required columns are missing.
    Columns,
    /// A cell failed its column's validator.
    Data,
    /// Cross-row disagreement or an out-of-pattern value.
    Consistency,
}

impl IssueCategory {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::Structure => "Structure",
            IssueCategory::Columns => "Columns",
            IssueCategory::Data => "Data",
            IssueCategory::Consistency => "Consistency",
        }
    }
}

/// One error or warning, with row and column provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Unique identifier within a validation result.
    pub id: String,
    /// Severity level.
    pub severity: Severity,
    /// Category of issue.
    pub category: IssueCategory,
    /// Human-readable message.
    pub message: String,
    /// Row number (1-based); `None` for file- or column-level issues.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    /// Affected column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Offending raw value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Primary proposed fix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction: Option<Correction>,
}

impl ValidationIssue {
    /// Create a new issue. The id is assigned when it joins a result.
    pub fn new(severity: Severity, category: IssueCategory, message: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            severity,
            category,
            message: message.into(),
            row: None,
            column: None,
            value: None,
            correction: None,
        }
    }

    /// Shorthand for an error.
    pub fn error(category: IssueCategory, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, category, message)
    }

    /// Shorthand for a warning.
    pub fn warning(category: IssueCategory, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, category, message)
    }

    /// Set the row (1-based).
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Set the column.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Set the offending value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Whether this is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_builder() {
        let issue = ValidationIssue::error(IssueCategory::Data, "Value is required")
            .with_row(2)
            .with_column("product_name")
            .with_value("");

        assert!(issue.is_error());
        assert_eq!(issue.row, Some(2));
        assert_eq!(issue.column.as_deref(), Some("product_name"));
        assert!(issue.correction.is_none());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn test_serialized_shape() {
        let issue = ValidationIssue::warning(IssueCategory::Consistency, "Mixed date formats")
            .with_column("receipt_date");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["category"], "consistency");
        assert!(json.get("row").is_none());
    }
}
