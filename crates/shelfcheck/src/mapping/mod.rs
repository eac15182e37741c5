//! Column mapping: alias tables and the header rewriter.

mod aliases;
mod mapper;

pub use aliases::aliases_for;
pub use mapper::{ColumnMapper, ColumnMapping, MappingReport, MatchKind};
