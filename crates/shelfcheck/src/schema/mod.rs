//! Dataset types, domain schemas, and type detection.

mod detect;
mod table;
mod types;
mod validator;

pub use detect::TypeDetector;
pub use table::{ColumnSpec, DomainSchema};
pub use types::{AGE_GROUPS, CorrectionHint, DatasetType, GENDERS};
pub use validator::Validator;
