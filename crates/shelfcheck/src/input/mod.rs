//! Row types and the file-to-rows reader.

mod parser;
mod row;
mod source;

pub use parser::{Parser, ParserConfig};
pub use row::{Row, first_row_headers, row_from_pairs, rows_from_json, union_headers};
pub use source::{SourceMetadata, content_hash};
