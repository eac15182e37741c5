//! Domain schemas: required/optional columns with validators and transformers.

use serde::Serialize;

use crate::error::{Result, ShelfcheckError};
use crate::normalize::Transformer;
use crate::text::normalize_header;

use super::types::DatasetType;
use super::validator::Validator;

/// Definition of one canonical column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSpec {
    /// Canonical column name.
    pub name: &'static str,
    /// Whether the column must be present in the upload.
    pub required: bool,
    /// Whether blank cells are acceptable (skips the validator).
    pub allow_empty: bool,
    /// Cell validator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validator: Option<Validator>,
    /// Value transformer applied during normalization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformer: Option<Transformer>,
}

impl ColumnSpec {
    fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            allow_empty: false,
            validator: None,
            transformer: None,
        }
    }

    fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            allow_empty: true,
            validator: None,
            transformer: None,
        }
    }

    fn validate(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    fn transform(mut self, transformer: Transformer) -> Self {
        self.transformer = Some(transformer);
        self
    }
}

/// Schema for one dataset type.
#[derive(Debug, Clone, Serialize)]
pub struct DomainSchema {
    /// The dataset type this schema describes.
    pub dataset_type: DatasetType,
    /// Canonical columns in display order.
    pub columns: Vec<ColumnSpec>,
}

impl DomainSchema {
    /// Look up the schema for a dataset type.
    ///
    /// `Unknown` has no schema; callers surface this as a structural issue.
    pub fn for_type(dataset_type: DatasetType) -> Result<Self> {
        let columns = match dataset_type {
            DatasetType::Sales => sales_columns(),
            DatasetType::Offers => offers_columns(),
            DatasetType::Demographics => demographics_columns(),
            DatasetType::Unknown => return Err(ShelfcheckError::NoSchema(dataset_type)),
        };
        Ok(Self {
            dataset_type,
            columns,
        })
    }

    /// Names of the required columns.
    pub fn required_columns(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| c.required)
            .map(|c| c.name)
            .collect()
    }

    /// Names of the optional columns.
    pub fn optional_columns(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| !c.required)
            .map(|c| c.name)
            .collect()
    }

    /// Get a column by name (case- and whitespace-insensitive).
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        let wanted = normalize_header(name);
        self.columns.iter().find(|c| c.name == wanted)
    }

    /// Get the validator for a column, if one is configured.
    pub fn validator_for(&self, name: &str) -> Option<Validator> {
        self.column(name).and_then(|c| c.validator)
    }

    /// Get the transformer for a column, if one is configured.
    pub fn transformer_for(&self, name: &str) -> Option<Transformer> {
        self.column(name).and_then(|c| c.transformer)
    }

    /// Whether the column belongs to this schema.
    pub fn is_recognized(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}

fn sales_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::required("receipt_date")
            .validate(Validator::DateFormat)
            .transform(Transformer::Date),
        ColumnSpec::required("product_name")
            .validate(Validator::NonEmpty)
            .transform(Transformer::Text),
        ColumnSpec::required("chain")
            .validate(Validator::RetailerName)
            .transform(Transformer::Text),
        ColumnSpec::optional("sales_value")
            .validate(Validator::NumberFormat)
            .transform(Transformer::Number),
        ColumnSpec::optional("quantity")
            .validate(Validator::NumberFormat)
            .transform(Transformer::Number),
        ColumnSpec::optional("category").transform(Transformer::Text),
        ColumnSpec::optional("brand").transform(Transformer::Text),
        ColumnSpec::optional("store_id").transform(Transformer::Text),
        ColumnSpec::optional("receipt_id")
            .validate(Validator::Identifier)
            .transform(Transformer::Text),
    ]
}

fn offers_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::required("offer_name")
            .validate(Validator::NonEmpty)
            .transform(Transformer::Text),
        ColumnSpec::required("chain")
            .validate(Validator::RetailerName)
            .transform(Transformer::Text),
        ColumnSpec::required("hits")
            .validate(Validator::NumberFormat)
            .transform(Transformer::Number),
        ColumnSpec::optional("offer_id")
            .validate(Validator::Identifier)
            .transform(Transformer::Text),
        ColumnSpec::optional("offer_date")
            .validate(Validator::DateFormat)
            .transform(Transformer::Date),
        ColumnSpec::optional("start_date")
            .validate(Validator::DateFormat)
            .transform(Transformer::Date),
        ColumnSpec::optional("end_date")
            .validate(Validator::DateFormat)
            .transform(Transformer::Date),
        ColumnSpec::optional("discount_value")
            .validate(Validator::NumberFormat)
            .transform(Transformer::Number),
        ColumnSpec::optional("category").transform(Transformer::Text),
        ColumnSpec::optional("product_name").transform(Transformer::Text),
    ]
}

fn demographics_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::required("age_group")
            .validate(Validator::AgeGroup)
            .transform(Transformer::AgeGroup),
        ColumnSpec::required("gender")
            .validate(Validator::Gender)
            .transform(Transformer::Gender),
        ColumnSpec::optional("region").transform(Transformer::Text),
        ColumnSpec::optional("household_size")
            .validate(Validator::NumberFormat)
            .transform(Transformer::Number),
        ColumnSpec::optional("income_band").transform(Transformer::Text),
        ColumnSpec::optional("respondent_id")
            .validate(Validator::Identifier)
            .transform(Transformer::Text),
        ColumnSpec::optional("chain")
            .validate(Validator::RetailerName)
            .transform(Transformer::Text),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_schema_columns() {
        let schema = DomainSchema::for_type(DatasetType::Sales).unwrap();
        assert_eq!(
            schema.required_columns(),
            vec!["receipt_date", "product_name", "chain"]
        );
        assert!(schema.optional_columns().contains(&"sales_value"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let schema = DomainSchema::for_type(DatasetType::Sales).unwrap();
        assert_eq!(
            schema.validator_for(" Receipt Date "),
            Some(Validator::DateFormat)
        );
        assert_eq!(schema.transformer_for("CHAIN"), Some(Transformer::Text));
        assert!(schema.validator_for("category").is_none());
        assert!(!schema.is_recognized("loyalty_card"));
    }

    #[test]
    fn test_unknown_has_no_schema() {
        assert!(matches!(
            DomainSchema::for_type(DatasetType::Unknown),
            Err(ShelfcheckError::NoSchema(DatasetType::Unknown))
        ));
    }

    #[test]
    fn test_every_schema_has_required_columns() {
        for t in [DatasetType::Sales, DatasetType::Offers, DatasetType::Demographics] {
            let schema = DomainSchema::for_type(t).unwrap();
            assert!(!schema.required_columns().is_empty());
            for col in &schema.columns {
                if col.required {
                    assert!(col.validator.is_some(), "{} lacks a validator", col.name);
                }
            }
        }
    }
}
