//! Applies schema transformers to every cell of a row set.

use tracing::debug;

use crate::input::Row;
use crate::schema::DomainSchema;
use crate::text::is_blank;

/// Rewrites cell values into canonical form, column by column.
pub struct ValueNormalizer<'a> {
    schema: &'a DomainSchema,
}

impl<'a> ValueNormalizer<'a> {
    /// Create a normalizer for a domain schema.
    pub fn new(schema: &'a DomainSchema) -> Self {
        Self { schema }
    }

    /// Normalize one row.
    ///
    /// Only columns with a configured transformer are touched. Blank cells
    /// and values a transformer cannot interpret are kept verbatim.
    pub fn normalize_row(&self, row: &Row) -> Row {
        row.iter()
            .map(|(column, value)| {
                let normalized = match self.schema.transformer_for(column) {
                    Some(transformer) if !is_blank(value) => {
                        transformer.apply(value).unwrap_or_else(|| value.clone())
                    }
                    _ => value.clone(),
                };
                (column.clone(), normalized)
            })
            .collect()
    }

    /// Normalize every row, returning new rows.
    pub fn normalize(&self, rows: &[Row]) -> Vec<Row> {
        let normalized: Vec<Row> = rows.iter().map(|row| self.normalize_row(row)).collect();

        let changed = rows
            .iter()
            .zip(&normalized)
            .map(|(before, after)| {
                before
                    .values()
                    .zip(after.values())
                    .filter(|(a, b)| a != b)
                    .count()
            })
            .sum::<usize>();
        debug!(
            dataset_type = %self.schema.dataset_type,
            rows = rows.len(),
            changed_cells = changed,
            "normalized values"
        );

        normalized
    }
}
