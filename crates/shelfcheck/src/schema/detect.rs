//! Dataset type detection from column headers.

use std::collections::HashSet;

use crate::text::normalize_header;

use super::types::DatasetType;

/// Marker columns per type, tested in priority order; first hit wins.
const MARKERS: &[(DatasetType, &[&str])] = &[
    (
        DatasetType::Sales,
        &[
            "receipt_date",
            "purchase_date",
            "transaction_date",
            "sale_date",
            "sales_value",
            "sale_amount",
            "receipt_id",
        ],
    ),
    (
        DatasetType::Offers,
        &[
            "offer_id",
            "offer_name",
            "offer_hits",
            "hits",
            "promotion_id",
            "promo_code",
            "redemptions",
        ],
    ),
    (
        DatasetType::Demographics,
        &[
            "age_group",
            "age_range",
            "age_band",
            "age",
            "gender",
            "sex",
            "income_band",
        ],
    ),
];

/// Classifies a row set by its headers.
pub struct TypeDetector;

impl TypeDetector {
    /// Detect the dataset type from a header list.
    ///
    /// Never fails: headers without any marker column yield `Unknown`.
    pub fn detect<S: AsRef<str>>(headers: &[S]) -> DatasetType {
        let normalized: HashSet<String> = headers
            .iter()
            .map(|h| normalize_header(h.as_ref()))
            .collect();

        MARKERS
            .iter()
            .find(|(_, markers)| markers.iter().any(|m| normalized.contains(*m)))
            .map(|(dataset_type, _)| *dataset_type)
            .unwrap_or(DatasetType::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_sales() {
        let headers = ["receipt_date", "product_name", "chain"];
        assert_eq!(TypeDetector::detect(&headers), DatasetType::Sales);
    }

    #[test]
    fn test_detect_is_case_and_space_insensitive() {
        let headers = ["Purchase Date", "Product", "Retailer"];
        assert_eq!(TypeDetector::detect(&headers), DatasetType::Sales);
        let headers = ["  OFFER_NAME", "Chain", "Hits"];
        assert_eq!(TypeDetector::detect(&headers), DatasetType::Offers);
    }

    #[test]
    fn test_sales_markers_take_priority() {
        let headers = ["receipt_date", "offer_id", "gender"];
        assert_eq!(TypeDetector::detect(&headers), DatasetType::Sales);
        let headers = ["offer_id", "gender"];
        assert_eq!(TypeDetector::detect(&headers), DatasetType::Offers);
    }

    #[test]
    fn test_detect_demographics() {
        let headers = vec!["Age".to_string(), "Sex".to_string(), "Region".to_string()];
        assert_eq!(TypeDetector::detect(&headers), DatasetType::Demographics);
    }

    #[test]
    fn test_no_markers_is_unknown() {
        let headers = ["foo", "bar"];
        assert_eq!(TypeDetector::detect(&headers), DatasetType::Unknown);
        let empty: [&str; 0] = [];
        assert_eq!(TypeDetector::detect(&empty), DatasetType::Unknown);
    }
}
