//! Column-name keyword table deciding which correction families apply.

use crate::schema::Validator;
use crate::text::{header_tokens, normalize_header};

/// What kind of values a column holds, as far as corrections care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Date,
    Numeric,
    Retailer,
    AgeGroup,
    Gender,
    Product,
}

/// How a keyword is compared against a normalized column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchMode {
    /// The whole name equals the keyword.
    Exact,
    /// One underscore-separated token equals the keyword.
    Token,
}

const KEYWORDS: &[(ColumnKind, MatchMode, &[&str])] = &[
    (ColumnKind::Date, MatchMode::Token, &["date", "day", "dob"]),
    (
        ColumnKind::Numeric,
        MatchMode::Token,
        &[
            "value", "amount", "price", "quantity", "qty", "hits", "total", "count", "size",
            "discount", "spend", "revenue", "units", "cost",
        ],
    ),
    (
        ColumnKind::Retailer,
        MatchMode::Exact,
        &["chain", "store_name", "banner", "shop", "supermarket"],
    ),
    (ColumnKind::Retailer, MatchMode::Token, &["retailer"]),
    (ColumnKind::AgeGroup, MatchMode::Token, &["age"]),
    (ColumnKind::Gender, MatchMode::Token, &["gender", "sex"]),
    (ColumnKind::Product, MatchMode::Token, &["product"]),
    (
        ColumnKind::Product,
        MatchMode::Exact,
        &["item", "item_name", "offer_name", "description"],
    ),
];

/// Column kinds for a column name, in table order without repeats.
///
/// The column's validator, when the schema has one, contributes its kind too,
/// so canonical columns are never missed by the keyword table.
pub fn column_kinds(column: &str, validator: Option<Validator>) -> Vec<ColumnKind> {
    let name = normalize_header(column);
    let tokens: Vec<&str> = header_tokens(&name).collect();

    let mut kinds: Vec<ColumnKind> = Vec::new();
    let mut push = |kind: ColumnKind| {
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    };

    if let Some(kind) = validator.and_then(kind_for_validator) {
        push(kind);
    }

    for (kind, mode, keywords) in KEYWORDS {
        let hit = match mode {
            MatchMode::Exact => keywords.contains(&name.as_str()),
            MatchMode::Token => tokens.iter().any(|t| keywords.contains(t)),
        };
        if hit {
            push(*kind);
        }
    }

    kinds
}

fn kind_for_validator(validator: Validator) -> Option<ColumnKind> {
    match validator {
        Validator::DateFormat => Some(ColumnKind::Date),
        Validator::NumberFormat => Some(ColumnKind::Numeric),
        Validator::RetailerName => Some(ColumnKind::Retailer),
        Validator::AgeGroup => Some(ColumnKind::AgeGroup),
        Validator::Gender => Some(ColumnKind::Gender),
        Validator::NonEmpty | Validator::Identifier => None,
    }
}
