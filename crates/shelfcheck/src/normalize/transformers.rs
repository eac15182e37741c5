//! Per-column value transformers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::schema::{AGE_GROUPS, GENDERS};
use crate::text::collapse_whitespace;

use super::dates::{format_iso, parse_date};

static PLAIN_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").unwrap());
static GROUPED_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d*)?$").unwrap());
static CURRENCY_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(gbp|usd|eur)\b").unwrap());
static WHOLE_AGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,3}$").unwrap());
static AGE_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d{1,2})\s*(?:-|–|to)\s*(\d{1,2})$").unwrap());
static AGE_PLUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d{1,2})\s*(?:\+|plus|and over|and older|or over)$").unwrap());
static AGE_UNDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:under|<|less than|below)\s*(\d{1,2})$").unwrap());

const CURRENCY_SYMBOLS: &[char] = &['£', '$', '€', '¥'];
const QUOTES: &[char] = &['"', '\'', '“', '”', '‘', '’'];

/// A value rewrite applied to one canonical column during normalization.
///
/// Each transform is best-effort: `None` means the value could not be
/// interpreted and the caller keeps the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transformer {
    /// Any recognised date format to `YYYY-MM-DD`.
    Date,
    /// Currency and grouping stripped to a plain number.
    Number,
    /// Trimmed, whitespace-collapsed, unquoted text.
    Text,
    /// Ages and range spellings to a canonical bucket.
    AgeGroup,
    /// Gender spellings to `Male`, `Female` or `Other`.
    Gender,
}

impl Transformer {
    /// Transform a single cell value.
    pub fn apply(&self, value: &str) -> Option<String> {
        match self {
            Transformer::Date => parse_date(value).map(format_iso),
            Transformer::Number => clean_number(value),
            Transformer::Text => Some(clean_text(value)),
            Transformer::AgeGroup => standardize_age_group(value),
            Transformer::Gender => standardize_gender(value),
        }
    }
}

/// Strip currency symbols, currency codes, thousands separators, and spaces.
///
/// A comma is only dropped when it separates groups of three digits ahead of
/// the decimal point. Decimal commas such as `1.200,50` are left alone.
/// Returns `None` unless what remains is a plain decimal number.
pub fn clean_number(value: &str) -> Option<String> {
    let without_codes = CURRENCY_CODE.replace_all(value, "");
    let stripped: String = without_codes
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && !c.is_whitespace())
        .collect();
    let stripped = stripped.strip_prefix('+').unwrap_or(&stripped);

    let cleaned = if stripped.contains(',') {
        if !GROUPED_NUMBER.is_match(stripped) {
            return None;
        }
        stripped.replace(',', "")
    } else {
        stripped.to_string()
    };

    if PLAIN_NUMBER.is_match(&cleaned) {
        Some(cleaned)
    } else {
        None
    }
}

/// Trim, collapse internal whitespace, and remove surrounding quote marks.
pub fn clean_text(value: &str) -> String {
    let collapsed = collapse_whitespace(value);
    let unquoted = collapsed.trim_matches(|c: char| QUOTES.contains(&c) || c.is_whitespace());
    collapse_whitespace(unquoted)
}

/// The canonical bucket for a whole age in years.
pub fn age_bucket(age: u32) -> &'static str {
    match age {
        0..=17 => "Under 18",
        18..=24 => "16-24",
        25..=34 => "25-34",
        35..=44 => "35-44",
        45..=54 => "45-54",
        55..=64 => "55-64",
        _ => "65+",
    }
}

/// Map an age or an age-range spelling to a canonical bucket.
pub fn standardize_age_group(value: &str) -> Option<String> {
    let trimmed = collapse_whitespace(value);
    if trimmed.is_empty() {
        return None;
    }

    if let Some(canonical) = AGE_GROUPS
        .iter()
        .find(|g| g.eq_ignore_ascii_case(&trimmed))
    {
        return Some(canonical.to_string());
    }

    if WHOLE_AGE.is_match(&trimmed) {
        let age: u32 = trimmed.parse().ok()?;
        return (age <= 120).then(|| age_bucket(age).to_string());
    }

    let compact = trimmed.to_lowercase().replace(' ', "");
    if compact == "under18" || compact == "<18" {
        return Some("Under 18".to_string());
    }

    if let Some(caps) = AGE_UNDER.captures(&trimmed) {
        let bound: u32 = caps[1].parse().ok()?;
        return (bound <= 18).then(|| "Under 18".to_string());
    }

    if let Some(caps) = AGE_PLUS.captures(&trimmed) {
        let lower: u32 = caps[1].parse().ok()?;
        return (lower >= 65).then(|| "65+".to_string());
    }

    if let Some(caps) = AGE_RANGE.captures(&trimmed) {
        let lower: u32 = caps[1].parse().ok()?;
        let upper: u32 = caps[2].parse().ok()?;
        let spelled = format!("{}-{}", lower, upper);
        if let Some(canonical) = AGE_GROUPS.iter().find(|g| **g == spelled) {
            return Some(canonical.to_string());
        }
        // A narrower range that sits inside one bucket
        if lower <= upper && age_bucket(lower) == age_bucket(upper) {
            return Some(age_bucket(lower).to_string());
        }
    }

    None
}

/// Map a gender spelling to `Male`, `Female` or `Other`.
///
/// Case-insensitive; accepts prefixes of the canonical names (`m`, `fem`)
/// and a few common synonyms.
pub fn standardize_gender(value: &str) -> Option<String> {
    let lower = value.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    let synonym = match lower.as_str() {
        "man" | "men" | "boy" => Some("Male"),
        "woman" | "women" | "girl" => Some("Female"),
        "non-binary" | "nonbinary" | "nb" | "x" => Some("Other"),
        _ => None,
    };
    if let Some(canonical) = synonym {
        return Some(canonical.to_string());
    }

    GENDERS
        .iter()
        .find(|g| g.to_lowercase().starts_with(&lower))
        .map(|g| g.to_string())
}
