//! Applying approved corrections to data.

mod applier;
mod operations;

pub use applier::CorrectionApplier;
pub use operations::{ApplyResult, RowAudit, SkipReason, SkippedCorrection};
