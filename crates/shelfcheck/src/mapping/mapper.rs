//! Rewrites aliased column names to canonical schema names.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::{Row, union_headers};
use crate::schema::DatasetType;
use crate::text::normalize_header;

use super::aliases::aliases_for;

/// How an original header was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Normalized header equals a known alias.
    Exact,
    /// Normalized header contains a multi-word alias on token boundaries.
    Substring,
}

/// One resolved header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Header as it appeared in the upload.
    pub original: String,
    /// Canonical schema name.
    pub canonical: String,
    /// How it was matched.
    pub kind: MatchKind,
}

/// Audit trail of a mapping pass, for display in the review UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingReport {
    /// Headers renamed to a canonical name.
    pub mappings: Vec<ColumnMapping>,
    /// Headers kept as-is because no alias matched.
    pub unmapped: Vec<String>,
    /// Headers kept as-is because their canonical name was already taken.
    pub conflicts: Vec<ColumnMapping>,
}

impl MappingReport {
    /// Canonical name for an original header, if it was renamed.
    pub fn canonical_for(&self, original: &str) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| m.original == original)
            .map(|m| m.canonical.as_str())
    }
}

/// Maps heterogeneous column names onto a dataset type's canonical names.
pub struct ColumnMapper;

impl ColumnMapper {
    /// Resolve a header list against the alias table of `dataset_type`.
    ///
    /// Returns original → output name for every header (identity for
    /// unmapped and conflicting headers) plus the audit report.
    pub fn plan<S: AsRef<str>>(
        headers: &[S],
        dataset_type: DatasetType,
    ) -> (IndexMap<String, String>, MappingReport) {
        let table = aliases_for(dataset_type);
        let mut report = MappingReport::default();
        let mut renames: IndexMap<String, String> = IndexMap::new();

        // Canonical names already present verbatim claim their slot first
        let mut claimed: HashSet<String> = headers
            .iter()
            .map(|h| h.as_ref())
            .filter(|h| table.get(h.trim()).is_some_and(|c| c == h))
            .map(|h| h.to_string())
            .collect();

        for header in headers {
            let original = header.as_ref();
            let resolved = Self::resolve(original, table);

            match resolved {
                Some((canonical, _)) if canonical == original => {
                    renames.insert(original.to_string(), original.to_string());
                }
                Some((canonical, kind)) => {
                    let mapping = ColumnMapping {
                        original: original.to_string(),
                        canonical: canonical.to_string(),
                        kind,
                    };
                    if claimed.insert(canonical.to_string()) {
                        renames.insert(original.to_string(), canonical.to_string());
                        report.mappings.push(mapping);
                    } else {
                        renames.insert(original.to_string(), original.to_string());
                        report.conflicts.push(mapping);
                    }
                }
                None => {
                    renames.insert(original.to_string(), original.to_string());
                    report.unmapped.push(original.to_string());
                }
            }
        }

        (renames, report)
    }

    /// Rewrite every row's keys to canonical names.
    ///
    /// Values are untouched and no column is ever dropped.
    pub fn map_rows(rows: &[Row], dataset_type: DatasetType) -> (Vec<Row>, MappingReport) {
        let headers = union_headers(rows);
        let (renames, report) = Self::plan(&headers, dataset_type);

        let mapped = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|(key, value)| {
                        let name = renames.get(key).cloned().unwrap_or_else(|| key.clone());
                        (name, value.clone())
                    })
                    .collect()
            })
            .collect();

        debug!(
            dataset_type = %dataset_type,
            mapped = report.mappings.len(),
            unmapped = report.unmapped.len(),
            conflicts = report.conflicts.len(),
            "mapped columns"
        );

        (mapped, report)
    }

    /// Find the canonical name for a single header.
    fn resolve(
        header: &str,
        table: &std::collections::HashMap<&'static str, &'static str>,
    ) -> Option<(&'static str, MatchKind)> {
        let key = normalize_header(header);
        if key.is_empty() {
            return None;
        }

        if let Some(canonical) = table.get(key.as_str()) {
            return Some((canonical, MatchKind::Exact));
        }

        // Only multi-word aliases are specific enough for containment
        let padded = format!("_{}_", key);
        table
            .iter()
            .filter(|(alias, _)| alias.contains('_'))
            .filter(|(alias, _)| padded.contains(&format!("_{}_", alias)))
            .max_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| b.cmp(a)))
            .map(|(_, canonical)| (*canonical, MatchKind::Substring))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::row_from_pairs;

    #[test]
    fn test_exact_aliases_are_renamed() {
        let rows = vec![row_from_pairs([
            ("Purchase Date", "02/24/2025"),
            ("Product", "Widget"),
            ("Retailer", "Tesco"),
        ])];

        let (mapped, report) = ColumnMapper::map_rows(&rows, DatasetType::Sales);

        assert_eq!(mapped[0]["receipt_date"], "02/24/2025");
        assert_eq!(mapped[0]["product_name"], "Widget");
        assert_eq!(mapped[0]["chain"], "Tesco");
        assert_eq!(report.mappings.len(), 3);
        assert_eq!(report.canonical_for("Retailer"), Some("chain"));
    }

    #[test]
    fn test_unmapped_columns_pass_through() {
        let rows = vec![row_from_pairs([("chain", "Tesco"), ("loyalty_card", "yes")])];

        let (mapped, report) = ColumnMapper::map_rows(&rows, DatasetType::Sales);

        assert_eq!(mapped[0]["loyalty_card"], "yes");
        assert_eq!(report.unmapped, vec!["loyalty_card"]);
        assert!(report.mappings.is_empty());
    }

    #[test]
    fn test_substring_match_on_token_boundary() {
        let rows = vec![row_from_pairs([
            ("Customer Age Group", "25-34"),
            ("Gender", "Male"),
        ])];

        let (mapped, report) = ColumnMapper::map_rows(&rows, DatasetType::Demographics);

        assert_eq!(mapped[0]["age_group"], "25-34");
        assert_eq!(report.mappings[0].kind, MatchKind::Substring);
        assert_eq!(report.mappings[1].kind, MatchKind::Exact);
    }

    #[test]
    fn test_single_word_alias_needs_exact_match() {
        let (renames, _) = ColumnMapper::plan(&["store_number"], DatasetType::Offers);
        assert_eq!(renames["store_number"], "store_number");
    }

    #[test]
    fn test_conflicting_aliases_keep_both_columns() {
        let rows = vec![row_from_pairs([
            ("chain", "Tesco"),
            ("retailer", "Asda"),
        ])];

        let (mapped, report) = ColumnMapper::map_rows(&rows, DatasetType::Sales);

        assert_eq!(mapped[0].len(), 2);
        assert_eq!(mapped[0]["chain"], "Tesco");
        assert_eq!(mapped[0]["retailer"], "Asda");
        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].original, "retailer");
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let headers = ["Sale Date", "Item Name", "Store Name", "Qty"];
        let first = ColumnMapper::plan(&headers, DatasetType::Sales);
        let second = ColumnMapper::plan(&headers, DatasetType::Sales);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_type_maps_nothing() {
        let rows = vec![row_from_pairs([("date", "x")])];
        let (mapped, report) = ColumnMapper::map_rows(&rows, DatasetType::Unknown);
        assert_eq!(mapped, rows);
        assert_eq!(report.unmapped, vec!["date"]);
    }
}
