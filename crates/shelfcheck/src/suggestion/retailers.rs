//! Known retailer names and their common misspellings.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::text::collapse_whitespace;

/// Canonical retailer → lowercase variants seen in uploads.
const KNOWN_RETAILERS: &[(&str, &[&str])] = &[
    (
        "Tesco",
        &[
            "tesco", "tescos", "tesco's", "teso", "tesko", "tescoe", "tesco stores",
            "tesco extra", "tesco express", "tesco metro",
        ],
    ),
    (
        "Sainsbury's",
        &[
            "sainsbury's", "sainsburys", "sainsbury", "sainsburies", "sainsbrys",
            "sainsburys local", "js sainsbury",
        ],
    ),
    ("Asda", &["asda", "adsa", "asda stores", "asdaa"]),
    (
        "Morrisons",
        &["morrisons", "morrison", "morrisions", "morrisons daily", "wm morrison"],
    ),
    (
        "Waitrose",
        &["waitrose", "waitroses", "waitrose & partners", "waitrose and partners"],
    ),
    ("Aldi", &["aldi", "aldis", "aldi uk"]),
    ("Lidl", &["lidl", "lidls", "lidel", "lidl gb"]),
    (
        "Co-op",
        &["co-op", "coop", "co op", "the co-operative", "co-operative", "cooperative"],
    ),
    ("Iceland", &["iceland", "icelands", "iceland foods"]),
    (
        "M&S",
        &[
            "m&s", "m & s", "m and s", "marks & spencer", "marks and spencer",
            "marks & spencers",
        ],
    ),
    ("Boots", &["boots", "boot's", "boots uk"]),
    ("Ocado", &["ocado", "ocardo"]),
];

static VARIANTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    KNOWN_RETAILERS
        .iter()
        .flat_map(|(canonical, variants)| variants.iter().map(move |v| (*v, *canonical)))
        .collect()
});

/// Look up the canonical name for a retailer spelling (case-insensitive).
pub fn canonical_retailer(value: &str) -> Option<&'static str> {
    let key = collapse_whitespace(value).to_lowercase();
    VARIANTS.get(key.as_str()).copied()
}

/// Whether a value is itself one of the canonical retailer names.
pub fn is_canonical_retailer(value: &str) -> bool {
    KNOWN_RETAILERS.iter().any(|(canonical, _)| *canonical == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_variants() {
        assert_eq!(canonical_retailer("Teso"), Some("Tesco"));
        assert_eq!(canonical_retailer("  TESCOS "), Some("Tesco"));
        assert_eq!(canonical_retailer("adsa"), Some("Asda"));
        assert_eq!(canonical_retailer("Marks and Spencer"), Some("M&S"));
        assert_eq!(canonical_retailer("Corner Shop"), None);
    }

    #[test]
    fn test_canonical_names_map_to_themselves() {
        for (canonical, _) in KNOWN_RETAILERS {
            assert_eq!(canonical_retailer(canonical), Some(*canonical));
            assert!(is_canonical_retailer(canonical));
        }
        assert!(!is_canonical_retailer("tesco"));
    }
}
