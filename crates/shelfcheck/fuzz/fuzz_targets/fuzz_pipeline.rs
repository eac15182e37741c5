//! Fuzz target for the full pipeline.
//!
//! Feeds fuzzed cell values under each dataset type's headers and checks the
//! row totals and score bounds hold.

#![no_main]

use libfuzzer_sys::fuzz_target;
use shelfcheck::{Pipeline, row_from_pairs};

const HEADER_SETS: &[&[&str]] = &[
    &["receipt_date", "product_name", "chain", "sales_value"],
    &["offer_name", "chain", "hits", "offer_date"],
    &["age_group", "gender", "household_size"],
];

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    for headers in HEADER_SETS {
        let rows: Vec<_> = content
            .lines()
            .take(50)
            .map(|line| {
                let mut cells = line.split(',');
                row_from_pairs(
                    headers
                        .iter()
                        .map(|h| (*h, cells.next().unwrap_or_default())),
                )
            })
            .collect();

        let result = Pipeline::new().run(&rows).result;
        let stats = &result.stats;
        assert_eq!(stats.total_rows, rows.len());
        assert!(stats.valid_rows + stats.invalid_rows + stats.empty_rows <= stats.total_rows);
        assert!((0.0..=100.0).contains(&result.data_quality_score));
    }
});
