//! Integration tests for the shelfcheck pipeline.

use std::io::Write;
use tempfile::NamedTempFile;

use shelfcheck::normalize::DateFormat;
use shelfcheck::{
    CorrectionSuggestionEngine, CorrectionTier, DatasetType, IssueCategory, Parser, Pipeline,
    PipelineConfig, row_from_pairs, rows_from_json,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_clean_sales_row_is_valid() {
    let rows = vec![row_from_pairs([
        ("receipt_date", "02/24/2025"),
        ("product_name", "Widget"),
        ("chain", "Tesco"),
    ])];

    let outcome = Pipeline::new().run(&rows);

    assert_eq!(outcome.dataset_type, DatasetType::Sales);
    assert_eq!(outcome.rows[0]["receipt_date"], "2025-02-24");
    assert!(outcome.result.is_valid);
    assert!(outcome.result.errors.is_empty());
    assert_eq!(outcome.result.stats.valid_rows, 1);
    assert_eq!(outcome.result.data_quality_score, 100.0);
}

#[test]
fn test_bad_date_and_missing_product() {
    let rows = vec![row_from_pairs([
        ("receipt_date", "not-a-date"),
        ("product_name", ""),
        ("chain", "Tesco"),
    ])];

    let result = Pipeline::new().run(&rows).result;

    assert_eq!(result.errors.len(), 2);
    assert!(result.errors.iter().all(|e| e.category == IssueCategory::Data));

    let date_error = &result.errors[0];
    assert_eq!(date_error.column.as_deref(), Some("receipt_date"));
    assert!(date_error.correction.is_none());

    let product_error = &result.errors[1];
    assert_eq!(product_error.column.as_deref(), Some("product_name"));
    let fix = product_error.correction.as_ref().expect("manual correction");
    assert_eq!(fix.tier, CorrectionTier::Manual);

    assert_eq!(result.stats.invalid_rows, 1);
    assert_eq!(result.stats.correctable_issues, 1);
}

#[test]
fn test_day_first_date_gets_auto_fix() {
    let rows = vec![row_from_pairs([
        ("receipt_date", "24/02/2025"),
        ("product_name", "Widget"),
        ("chain", "Tesco"),
    ])];

    let result = Pipeline::new().run(&rows).result;

    assert_eq!(result.errors.len(), 1);
    let fix = result.errors[0].correction.as_ref().unwrap();
    assert_eq!(fix.corrected_value, "2025-02-24");
    assert_eq!(fix.tier, CorrectionTier::Auto);
    assert_eq!(fix.confidence, 0.9);
    assert_eq!(result.stats.auto_fixable_issues, 1);
}

#[test]
fn test_near_duplicate_retailers() {
    let rows = vec![
        row_from_pairs([
            ("receipt_date", "2025-02-24"),
            ("product_name", "Widget"),
            ("chain", "Tesco"),
        ]),
        row_from_pairs([
            ("receipt_date", "2025-02-25"),
            ("product_name", "Gadget"),
            ("chain", "Teso"),
        ]),
    ];

    let result = Pipeline::new().run(&rows).result;

    assert!(result.is_valid);
    let duplicate = result
        .warnings
        .iter()
        .find(|w| w.category == IssueCategory::Consistency)
        .expect("duplicate spelling warning");
    assert!(duplicate.message.contains("'Tesco'"));
    assert!(duplicate.message.contains("suggest 'Tesco'"));

    let fix = result
        .corrections
        .iter()
        .find(|c| c.row == 2 && c.column == "chain")
        .expect("chain correction");
    assert_eq!(fix.corrected_value, "Tesco");
    assert_eq!(fix.tier, CorrectionTier::Suggested);
}

#[test]
fn test_duplicate_spelling_of_unknown_chain() {
    let rows: Vec<_> = ["Fresh Mart", "Fresh Mart", "Fresh Marts"]
        .iter()
        .enumerate()
        .map(|(i, chain)| {
            row_from_pairs([
                ("receipt_date", format!("2025-02-2{}", i + 1)),
                ("product_name", "Widget".to_string()),
                ("chain", chain.to_string()),
            ])
        })
        .collect();

    let result = Pipeline::new().run(&rows).result;

    assert_eq!(result.warnings.len(), 1);
    let warning = &result.warnings[0];
    assert_eq!(warning.value.as_deref(), Some("Fresh Marts"));

    let linked = result.corrections_for_issue(&warning.id);
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].row, 3);
    assert_eq!(linked[0].corrected_value, "Fresh Mart");
}

#[test]
fn test_age_number_to_bucket() {
    let engine = CorrectionSuggestionEngine::new(DatasetType::Demographics);
    let candidates = engine.suggest("age_group", "27");
    assert_eq!(candidates[0].corrected_value, "25-34");
    assert_eq!(candidates[0].tier, CorrectionTier::Auto);
    assert_eq!(candidates[0].confidence, 0.9);

    let rows = vec![row_from_pairs([("age_group", "27"), ("gender", "Male")])];

    let normalized = Pipeline::new().run(&rows);
    assert_eq!(normalized.rows[0]["age_group"], "25-34");
    assert!(normalized.result.is_valid);

    let raw = Pipeline::with_config(PipelineConfig {
        normalize_values: false,
        ..PipelineConfig::default()
    })
    .run(&rows);
    let fix = raw.result.errors[0].correction.as_ref().unwrap();
    assert_eq!(fix.corrected_value, "25-34");
    assert_eq!(fix.tier, CorrectionTier::Auto);
}

#[test]
fn test_missing_required_column_continues() {
    let rows = vec![row_from_pairs([
        ("product_name", "Widget"),
        ("chain", "Tesco"),
        ("sales_value", "twelve"),
    ])];

    let result = Pipeline::new().run(&rows).result;

    let missing: Vec<_> = result
        .errors
        .iter()
        .filter(|e| e.category == IssueCategory::Columns)
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].column.as_deref(), Some("receipt_date"));
    assert!(missing[0].message.contains("receipt_date"));

    assert!(
        result
            .errors
            .iter()
            .any(|e| e.category == IssueCategory::Data && e.column.as_deref() == Some("sales_value"))
    );
}

// =============================================================================
// File Input Tests
// =============================================================================

#[test]
fn test_messy_csv_end_to_end() {
    let content = "Purchase Date,Product,Retailer,Sales Value\n\
                   02/24/2025,Widget,Tesco,£12.50\n\
                   24/02/2025,  Gadget  ,Tesco,3.00\n\
                   2025-02-26,,Tesco,abc\n";
    let file = create_test_file(content);

    let (rows, source) = Parser::new().parse_file(file.path()).expect("Parse failed");
    assert_eq!(source.format, "csv");
    assert_eq!(source.row_count, 3);
    assert_eq!(source.column_count, 4);
    assert!(source.hash.starts_with("sha256:"));

    let outcome = Pipeline::new().run(&rows);
    assert_eq!(outcome.dataset_type, DatasetType::Sales);
    assert_eq!(outcome.mapping.canonical_for("Purchase Date"), Some("receipt_date"));
    assert_eq!(outcome.mapping.canonical_for("Retailer"), Some("chain"));

    assert_eq!(outcome.rows[0]["receipt_date"], "2025-02-24");
    assert_eq!(outcome.rows[0]["sales_value"], "12.50");
    assert_eq!(outcome.rows[1]["product_name"], "Gadget");
    assert_eq!(outcome.mapped_rows[1]["receipt_date"], "24/02/2025");

    let result = &outcome.result;
    assert_eq!(result.stats.total_rows, 3);
    assert!(
        result
            .warnings
            .iter()
            .any(|w| w.message.starts_with("Mixed date formats in 'receipt_date'"))
    );
    assert!(
        result
            .corrections
            .iter()
            .any(|c| c.row == 3 && c.column == "product_name" && c.tier == CorrectionTier::Manual)
    );
    assert!(
        result
            .errors
            .iter()
            .any(|e| e.row == Some(3) && e.column.as_deref() == Some("sales_value"))
    );
}

#[test]
fn test_tsv_with_short_row() {
    let content = "offer_name\tchain\thits\n\
                   Meal Deal\tTesco\t120\n\
                   2 for 1\tAsda\n";
    let file = create_test_file(content);

    let (rows, source) = Parser::new().parse_file(file.path()).unwrap();
    assert_eq!(source.format, "tsv");

    let result = Pipeline::new().run(&rows).result;
    assert!(
        result
            .warnings
            .iter()
            .any(|w| w.row == Some(2) && w.message.contains("has 2 columns, expected 3"))
    );
}

#[test]
fn test_json_records_input() {
    let value = serde_json::json!([
        {"offer_name": "Meal Deal", "chain": "Tesco", "hits": 120},
        {"offer_name": "2 for 1", "chain": "asda", "hits": null}
    ]);
    let rows = rows_from_json(&value).unwrap();

    let outcome = Pipeline::new().run(&rows);
    assert_eq!(outcome.dataset_type, DatasetType::Offers);
    assert_eq!(outcome.rows[0]["hits"], "120");

    let hits_error = outcome
        .result
        .errors
        .iter()
        .find(|e| e.column.as_deref() == Some("hits"))
        .expect("empty hits is an error");
    assert_eq!(hits_error.row, Some(2));
}

#[test]
fn test_json_record_missing_required_key() {
    let value = serde_json::json!([
        {"Receipt Date": "2025-02-24", "Product Name": "Widget", "Chain": "Tesco"},
        {"Receipt Date": "2025-02-25", "Chain": "Tesco"}
    ]);
    let rows = rows_from_json(&value).unwrap();

    let outcome = Pipeline::new().run(&rows);
    assert_eq!(outcome.dataset_type, DatasetType::Sales);

    let result = outcome.result;
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].category, IssueCategory::Data);
    assert_eq!(result.errors[0].row, Some(2));
    assert_eq!(result.errors[0].column.as_deref(), Some("product_name"));
    assert_eq!(result.stats.valid_rows, 1);
    assert_eq!(result.stats.invalid_rows, 1);
    assert!(
        result
            .warnings
            .iter()
            .any(|w| w.message == "Row 2 has 2 columns, expected 3")
    );
}

#[test]
fn test_result_serializes_camel_case() {
    let rows = vec![row_from_pairs([("receipt_date", "24/02/2025"), ("chain", "Tesco")])];
    let result = Pipeline::new().run(&rows).result;

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["isValid"], false);
    assert!(json["stats"]["autoFixableIssues"].as_u64().unwrap() >= 1);
    assert_eq!(json["corrections"][0]["tier"], "auto");
    assert_eq!(json["corrections"][0]["originalValue"], "24/02/2025");
}

#[test]
fn test_date_format_census_labels() {
    assert_eq!(DateFormat::detect("02/24/2025"), Some(DateFormat::UsSlash));
    assert_eq!(DateFormat::detect("24/02/2025"), Some(DateFormat::DayFirstSlash));
    assert_eq!(DateFormat::detect("2025-02-24"), Some(DateFormat::Iso));
}
