//! Small string helpers shared by the mapper, normalizer, and validators.

/// Normalize a column header for case- and whitespace-insensitive comparison.
///
/// Trims, lowercases, and collapses runs of whitespace, hyphens, and dots into
/// a single underscore: `" Receipt  Date "` and `"receipt-date"` both become
/// `"receipt_date"`.
pub fn normalize_header(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    let mut pending_sep = false;

    for ch in header.trim().chars() {
        if ch.is_whitespace() || ch == '-' || ch == '.' || ch == '_' {
            pending_sep = !out.is_empty();
            continue;
        }
        if pending_sep {
            out.push('_');
            pending_sep = false;
        }
        out.extend(ch.to_lowercase());
    }

    out
}

/// Split a normalized header into its underscore-separated tokens.
pub fn header_tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split('_').filter(|t| !t.is_empty())
}

/// Check whether a cell is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Collapse internal runs of whitespace to a single space and trim the ends.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Capitalize the first letter of every word, lowercasing the rest.
///
/// Words that are entirely uppercase and short (e.g. "XL", "TV") are kept as-is.
pub fn title_case(value: &str) -> String {
    collapse_whitespace(value)
        .split(' ')
        .map(|word| {
            let is_acronym = word.chars().count() <= 3
                && word.chars().any(|c| c.is_alphabetic())
                && word.chars().all(|c| !c.is_alphabetic() || c.is_uppercase());
            if is_acronym {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Calculate Levenshtein (edit) distance between two strings.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    // Two-row variant of the full matrix
    let mut prev: Vec<usize> = (0..=len2).collect();
    let mut curr = vec![0; len2 + 1];

    for i in 1..=len1 {
        curr[0] = i;
        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[len2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Receipt Date"), "receipt_date");
        assert_eq!(normalize_header("  receipt-date "), "receipt_date");
        assert_eq!(normalize_header("RECEIPT__DATE"), "receipt_date");
        assert_eq!(normalize_header("store.name"), "store_name");
        assert_eq!(normalize_header("_chain_"), "chain");
        assert_eq!(normalize_header(""), "");
    }

    #[test]
    fn test_header_tokens() {
        let tokens: Vec<_> = header_tokens("customer_age_group").collect();
        assert_eq!(tokens, vec!["customer", "age", "group"]);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Big   Widget \t Pro "), "Big Widget Pro");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("organic  whole milk"), "Organic Whole Milk");
        assert_eq!(title_case("BAKED BEANS"), "Baked Beans");
        assert_eq!(title_case("55 inch TV"), "55 Inch TV");
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("tesco", "teso"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("same", "same"), 0);
    }
}
