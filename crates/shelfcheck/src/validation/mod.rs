//! Validation: issues, results, the cell/row engine, and cross-row checks.

mod consistency;
mod engine;
mod issue;
mod result;

pub use consistency::is_near_duplicate;
pub use engine::{ValidationConfig, ValidationEngine};
pub use issue::{IssueCategory, Severity, ValidationIssue};
pub use result::{ValidationResult, ValidationStats};
