//! Check command - run the pipeline over a data file and save a review session.

use std::path::PathBuf;

use colored::Colorize;
use shelfcheck::curation::session_path;
use shelfcheck::{
    CorrectionTier, Parser, Pipeline, PipelineConfig, PipelineOutcome, ReviewSession, Severity,
};
use tracing::info;

use super::{colored_score, colored_tier};

/// Issues listed before the rest are summarized.
const MAX_LISTED_ISSUES: usize = 25;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    dataset_type: Option<String>,
    no_normalize: bool,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut config = match config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    if no_normalize {
        config.normalize_values = false;
    }

    println!(
        "{} {}",
        "Checking".cyan().bold(),
        file.display().to_string().white()
    );

    let (rows, source) = Parser::new().parse_file(&file)?;
    println!(
        "  {} rows, {} columns ({})",
        source.row_count, source.column_count, source.format
    );
    if source.short_rows + source.long_rows > 0 {
        println!(
            "  {}",
            format!(
                "{} short and {} long rows against the header",
                source.short_rows, source.long_rows
            )
            .yellow()
        );
    }
    println!();

    let pipeline = Pipeline::with_config(config.clone());
    let outcome = match dataset_type.as_deref() {
        Some(name) => pipeline.run_with_override(&rows, name),
        None => pipeline.run(&rows),
    };

    print_outcome(&outcome);

    let session = ReviewSession::from_outcome(outcome, Some(source)).with_config(config);
    let session_file = output.unwrap_or_else(|| session_path(&file));
    session.save_with_history(&session_file)?;
    info!(path = %session_file.display(), "session written");

    println!(
        "{} {}",
        "Session saved to".green().bold(),
        session_file.display().to_string().white()
    );

    if session.result.corrections.is_empty() {
        return Ok(());
    }
    println!();
    println!(
        "Run {} to accept the safe fixes,",
        format!("shelfcheck decide {} --tier auto", session_file.display())
            .cyan()
            .bold()
    );
    println!(
        "then {} to preview the changes.",
        format!("shelfcheck diff {}", session_file.display())
            .cyan()
            .bold()
    );

    Ok(())
}

fn print_outcome(outcome: &PipelineOutcome) {
    let result = &outcome.result;

    println!(
        "{} {}",
        "Dataset type:".yellow().bold(),
        outcome.dataset_type.label().white().bold()
    );

    if !outcome.mapping.mappings.is_empty() {
        println!("{}", "Columns:".yellow().bold());
        for mapping in &outcome.mapping.mappings {
            println!(
                "  {:25} → {}",
                mapping.original,
                mapping.canonical.green()
            );
        }
        for header in &outcome.mapping.unmapped {
            println!("  {:25}   {}", header, "(kept)".dimmed());
        }
        for conflict in &outcome.mapping.conflicts {
            println!(
                "  {:25}   {}",
                conflict.original,
                format!("(kept, '{}' already mapped)", conflict.canonical).yellow()
            );
        }
    }
    println!();

    println!(
        "{} {} errors, {} warnings",
        "Issues:".yellow().bold(),
        result.stats.errors_count.to_string().red(),
        result.stats.warnings_count.to_string().yellow()
    );
    for issue in result.issues().take(MAX_LISTED_ISSUES) {
        let marker = match issue.severity {
            Severity::Error => "ERROR".red().bold(),
            Severity::Warning => "WARN ".yellow().bold(),
        };
        println!("  {} {} {}", marker, issue.id.dimmed(), issue.message);
        if let Some(fix) = &issue.correction {
            println!(
                "        fix [{}] {} ({:.0}%)",
                colored_tier(fix.tier),
                fix.corrected_value.green(),
                fix.confidence * 100.0
            );
        }
    }
    let total = result.errors.len() + result.warnings.len();
    if total > MAX_LISTED_ISSUES {
        println!(
            "  {}",
            format!("... and {} more", total - MAX_LISTED_ISSUES).dimmed()
        );
    }
    println!();

    if !result.corrections.is_empty() {
        println!("{}", "Corrections:".yellow().bold());
        for tier in CorrectionTier::ALL {
            let count = result.corrections_by_tier(tier).len();
            if count > 0 {
                println!("  {:10} {}", colored_tier(tier), count);
            }
        }
        println!();
    }

    println!(
        "Data quality score: {}%",
        colored_score(result.data_quality_score)
    );
    println!();
}
