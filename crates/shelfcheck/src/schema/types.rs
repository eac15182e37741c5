//! Core schema enums: dataset types, correction hints, and canonical categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShelfcheckError;

/// Canonical age-group buckets, in display order.
pub const AGE_GROUPS: &[&str] = &[
    "Under 18", "16-24", "25-34", "35-44", "45-54", "55-64", "65+",
];

/// Canonical gender values.
pub const GENDERS: &[&str] = &["Male", "Female", "Other"];

/// The fixed set of dataset categories the pipeline recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetType {
    /// Point-of-sale transactions (receipts).
    Sales,
    /// Promotional-offer hits.
    Offers,
    /// Panel demographic records.
    Demographics,
    /// No marker columns found.
    Unknown,
}

impl DatasetType {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DatasetType::Sales => "Sales",
            DatasetType::Offers => "Offers",
            DatasetType::Demographics => "Demographics",
            DatasetType::Unknown => "Unknown",
        }
    }

    /// Lowercase identifier used in overrides and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetType::Sales => "sales",
            DatasetType::Offers => "offers",
            DatasetType::Demographics => "demographics",
            DatasetType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DatasetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetType {
    type Err = ShelfcheckError;

    /// Parse an explicit override. `unknown` is not a valid override.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sales" => Ok(DatasetType::Sales),
            "offers" => Ok(DatasetType::Offers),
            "demographics" => Ok(DatasetType::Demographics),
            _ => Err(ShelfcheckError::UnknownDatasetType(s.to_string())),
        }
    }
}

/// Which heuristic family can repair a failing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionHint {
    DateFormat,
    NumberFormat,
    RetailerMapping,
    AgeGroupMapping,
    GenderMapping,
    ManualInput,
}

impl CorrectionHint {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            CorrectionHint::DateFormat => "Date format",
            CorrectionHint::NumberFormat => "Number format",
            CorrectionHint::RetailerMapping => "Retailer mapping",
            CorrectionHint::AgeGroupMapping => "Age group mapping",
            CorrectionHint::GenderMapping => "Gender mapping",
            CorrectionHint::ManualInput => "Manual input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_override() {
        assert_eq!("sales".parse::<DatasetType>().unwrap(), DatasetType::Sales);
        assert_eq!(" Offers ".parse::<DatasetType>().unwrap(), DatasetType::Offers);
        assert_eq!(
            "DEMOGRAPHICS".parse::<DatasetType>().unwrap(),
            DatasetType::Demographics
        );
        assert!("unknown".parse::<DatasetType>().is_err());
        assert!("inventory".parse::<DatasetType>().is_err());
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_string(&DatasetType::Sales).unwrap(), "\"sales\"");
        assert_eq!(
            serde_json::to_string(&CorrectionHint::AgeGroupMapping).unwrap(),
            "\"age_group_mapping\""
        );
    }
}
