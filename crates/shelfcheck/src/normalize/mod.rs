//! Value normalization: transformers, date parsing, and the row normalizer.

mod dates;
mod normalizer;
mod transformers;

pub use dates::{DateFormat, format_iso, parse_alternate_date, parse_date};
pub use normalizer::ValueNormalizer;
pub use transformers::{
    Transformer, age_bucket, clean_number, clean_text, standardize_age_group,
    standardize_gender,
};
