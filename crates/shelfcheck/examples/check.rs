//! Example: Check a sales, offers, or demographics upload.
//!
//! Usage:
//!   cargo run --example check -- <file_path>
//!
//! Example:
//!   cargo run --example check -- uploads/february_sales.csv

use std::env;
use std::path::Path;

use shelfcheck::{CorrectionTier, DecisionMap, Parser, Pipeline, Severity};

fn main() -> shelfcheck::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example check -- <file_path>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example check -- uploads/february_sales.csv");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Shelfcheck: {}", file_path);
    println!("{}", separator);
    println!();

    let (rows, source) = Parser::new().parse_file(path)?;

    println!("## Source");
    println!("  File: {}", source.file);
    println!("  Format: {}", source.format);
    println!("  Rows: {}", source.row_count);
    println!("  Columns: {}", source.column_count);
    println!();

    let pipeline = Pipeline::new();
    let outcome = pipeline.run(&rows);

    println!("## Dataset type: {}", outcome.dataset_type.label());
    for mapping in &outcome.mapping.mappings {
        println!("  {:25} → {}", mapping.original, mapping.canonical);
    }
    println!();

    let result = &outcome.result;
    println!(
        "## Issues ({} errors, {} warnings)",
        result.stats.errors_count, result.stats.warnings_count
    );
    println!();
    for issue in result.issues() {
        let marker = match issue.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        println!("  [{}] {} {}", marker, issue.id, issue.message);
        if let Some(fix) = &issue.correction {
            println!(
                "          fix ({}, {:.0}%): '{}'",
                fix.tier,
                fix.confidence * 100.0,
                fix.corrected_value
            );
        }
    }
    println!();

    // Accept the safe fixes and show what they buy
    let mut decisions = DecisionMap::new();
    let accepted = decisions.accept_tier(result, CorrectionTier::Auto);
    let (applied, after, delta) = pipeline.correct(&outcome, &decisions);

    println!("## After accepting {} auto fixes", accepted);
    println!("  Cells changed: {}", applied.applied_count());
    println!("  Errors: {} → {}", result.stats.errors_count, after.stats.errors_count);
    println!("  Quality: {}", delta);
    println!();
    println!("{}", separator);

    Ok(())
}
