//! Correction proposals: tiers, candidate families, and the suggestion engine.

mod correction;
mod families;
mod generator;
mod retailers;

pub use correction::{Correction, CorrectionCandidate, CorrectionFamily, CorrectionTier};
pub use families::{ColumnKind, column_kinds};
pub use generator::CorrectionSuggestionEngine;
pub use retailers::{canonical_retailer, is_canonical_retailer};
