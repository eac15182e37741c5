//! Date parsing and date-format census.
//!
//! Two tiers of parsing: [`parse_date`] covers the formats the normalizer
//! rewrites unconditionally, and [`parse_alternate_date`] adds the ambiguous
//! day-first and short-year forms that are only ever offered as corrections.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::collapse_whitespace;

static ISO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").unwrap());
static YEAR_SLASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})/(\d{1,2})/(\d{1,2})$").unwrap());
static SLASH_YEAR_LAST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap());
static DASH_YEAR_LAST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})-(\d{1,2})-(\d{4})$").unwrap());
static DOT_YEAR_LAST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{4})$").unwrap());
static COMPACT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").unwrap());
static SHORT_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2})$").unwrap());
static TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}").unwrap());
static MONTH_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\b").unwrap()
});

const MONTH_NAME_FORMATS: &[&str] = &["%B %d %Y", "%d %B %Y", "%Y %B %d"];

/// Shape of a date string, used to spot columns that mix conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// 2025-02-24
    Iso,
    /// 2025-02-24T10:30:00Z or 2025-02-24 10:30:00
    Timestamp,
    /// 2025/02/24
    YearSlash,
    /// 02/24/2025
    UsSlash,
    /// 24/02/2025 (first field above 12)
    DayFirstSlash,
    /// 02-24-2025
    UsDash,
    /// 24.02.2025
    DotSeparated,
    /// 20250224
    Compact,
    /// 02/24/25
    ShortYear,
    /// Feb 24 2025, 24 February 2025
    MonthName,
}

impl DateFormat {
    /// Detect the shape of a date string without checking calendar validity.
    pub fn detect(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        if ISO.is_match(trimmed) {
            Some(DateFormat::Iso)
        } else if TIMESTAMP.is_match(trimmed) {
            Some(DateFormat::Timestamp)
        } else if YEAR_SLASH.is_match(trimmed) {
            Some(DateFormat::YearSlash)
        } else if let Some(caps) = SLASH_YEAR_LAST.captures(trimmed) {
            let first: u32 = caps[1].parse().unwrap_or(0);
            if first > 12 {
                Some(DateFormat::DayFirstSlash)
            } else {
                Some(DateFormat::UsSlash)
            }
        } else if DASH_YEAR_LAST.is_match(trimmed) {
            Some(DateFormat::UsDash)
        } else if DOT_YEAR_LAST.is_match(trimmed) {
            Some(DateFormat::DotSeparated)
        } else if COMPACT.is_match(trimmed) {
            Some(DateFormat::Compact)
        } else if SHORT_YEAR.is_match(trimmed) {
            Some(DateFormat::ShortYear)
        } else if MONTH_NAME.is_match(trimmed) && trimmed.chars().any(|c| c.is_ascii_digit()) {
            Some(DateFormat::MonthName)
        } else {
            None
        }
    }

    /// Human-readable description with an example pattern.
    pub fn description(&self) -> &'static str {
        match self {
            DateFormat::Iso => "ISO (YYYY-MM-DD)",
            DateFormat::Timestamp => "Timestamp (YYYY-MM-DD HH:MM:SS)",
            DateFormat::YearSlash => "Year first (YYYY/MM/DD)",
            DateFormat::UsSlash => "US (MM/DD/YYYY)",
            DateFormat::DayFirstSlash => "Day first (DD/MM/YYYY)",
            DateFormat::UsDash => "US (MM-DD-YYYY)",
            DateFormat::DotSeparated => "Dotted (DD.MM.YYYY)",
            DateFormat::Compact => "Compact (YYYYMMDD)",
            DateFormat::ShortYear => "Short year (MM/DD/YY)",
            DateFormat::MonthName => "Month name (Mon DD YYYY)",
        }
    }
}

/// Parse a date in any format the normalizer accepts.
///
/// Accepted: `YYYY-MM-DD`, `YYYY/MM/DD`, `MM/DD/YYYY`, `MM-DD-YYYY`, RFC 3339
/// and `YYYY-MM-DD HH:MM:SS` timestamps, and month-name forms such as
/// `February 24, 2025`, `24 Feb 2025`, or `Feb 24 2025`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = ISO.captures(trimmed).or_else(|| YEAR_SLASH.captures(trimmed)) {
        return ymd(&caps[1], &caps[2], &caps[3]);
    }
    if let Some(caps) = SLASH_YEAR_LAST
        .captures(trimmed)
        .or_else(|| DASH_YEAR_LAST.captures(trimmed))
    {
        return ymd(&caps[3], &caps[1], &caps[2]);
    }
    if TIMESTAMP.is_match(trimmed) {
        return parse_timestamp(trimmed);
    }
    if MONTH_NAME.is_match(trimmed) {
        return parse_month_name(trimmed);
    }

    None
}

/// Parse a date, falling back to the ambiguous formats the normalizer skips.
///
/// Adds `DD/MM/YYYY`, `DD-MM-YYYY`, `DD.MM.YYYY`, `YYYYMMDD`, and `MM/DD/YY`
/// (years 00-99 map to 2000-2099).
pub fn parse_alternate_date(value: &str) -> Option<NaiveDate> {
    if let Some(date) = parse_date(value) {
        return Some(date);
    }

    let trimmed = value.trim();
    if let Some(caps) = SLASH_YEAR_LAST
        .captures(trimmed)
        .or_else(|| DASH_YEAR_LAST.captures(trimmed))
        .or_else(|| DOT_YEAR_LAST.captures(trimmed))
    {
        return ymd(&caps[3], &caps[2], &caps[1]);
    }
    if let Some(caps) = COMPACT.captures(trimmed) {
        return ymd(&caps[1], &caps[2], &caps[3]);
    }
    if let Some(caps) = SHORT_YEAR.captures(trimmed) {
        let year: i32 = caps[3].parse().ok()?;
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(2000 + year, month, day);
    }

    None
}

/// Render a date in the canonical `YYYY-MM-DD` form.
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn parse_timestamp(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}

fn parse_month_name(value: &str) -> Option<NaiveDate> {
    let cleaned = collapse_whitespace(&value.replace(',', " "));
    MONTH_NAME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok())
}
