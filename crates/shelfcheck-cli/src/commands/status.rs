//! Status command - show review progress and summary.

use std::path::PathBuf;

use colored::Colorize;
use shelfcheck::{CorrectionTier, ReviewSession};

use super::{colored_score, colored_tier, existing_session};

pub fn run(file: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session_file = existing_session(&file)?;
    let session = ReviewSession::load(&session_file)?;
    let history = ReviewSession::list_history(&session_file)?;

    let counts = session.counts();
    let result = &session.result;
    let source = session
        .source
        .as_ref()
        .map(|s| s.file.clone())
        .unwrap_or_else(|| session_file.display().to_string());

    if json_output {
        let by_tier: serde_json::Map<String, serde_json::Value> = CorrectionTier::ALL
            .iter()
            .map(|tier| {
                (
                    tier.label().to_string(),
                    result.corrections_by_tier(*tier).len().into(),
                )
            })
            .collect();

        let status = serde_json::json!({
            "file": source,
            "dataset_type": session.dataset_type,
            "total_corrections": result.corrections.len(),
            "corrections_by_tier": by_tier,
            "decisions": counts,
            "issues": {
                "errors": result.stats.errors_count,
                "warnings": result.stats.warnings_count,
            },
            "data_quality_score": result.data_quality_score,
            "is_complete": session.is_complete(),
            "updated_at": session.updated_at,
            "history": history.len(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {} ({})",
        "Review status for".cyan().bold(),
        source.white(),
        session.dataset_type.label()
    );
    if let Some(source) = &session.source {
        match source.is_unchanged() {
            Ok(true) => {}
            Ok(false) => println!(
                "{} {} has changed since it was checked; run 'shelfcheck check' again.",
                "Warning:".yellow().bold(),
                source.path.display()
            ),
            Err(_) => println!(
                "{}",
                format!("Source file {} is no longer available.", source.path.display()).dimmed()
            ),
        }
    }
    println!();

    // Progress bar over applicable corrections
    let applicable = result
        .corrections
        .iter()
        .filter(|c| c.is_applicable())
        .count();
    let decided = result
        .corrections
        .iter()
        .filter(|c| c.is_applicable() && session.decisions.is_decided(&c.id))
        .count();
    let progress = if applicable == 0 {
        1.0
    } else {
        decided as f64 / applicable as f64
    };
    let bar_width = 30;
    let filled = (progress * bar_width as f64).round() as usize;
    let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);

    println!(
        "Progress: {} {}/{} ({:.0}%)",
        bar.cyan(),
        decided.to_string().white().bold(),
        applicable,
        progress * 100.0
    );
    println!();

    println!("{}", "Corrections:".yellow().bold());
    for tier in CorrectionTier::ALL {
        println!(
            "  {:10} {}",
            colored_tier(tier),
            result.corrections_by_tier(tier).len()
        );
    }
    println!();

    println!("{}", "Decisions:".yellow().bold());
    println!("  Pending:  {}", counts.pending.to_string().white());
    println!("  Accepted: {}", counts.accepted.to_string().green());
    println!("  Modified: {}", counts.modified.to_string().blue());
    println!("  Rejected: {}", counts.rejected.to_string().red());
    println!();

    println!("{}", "Issues:".yellow().bold());
    println!(
        "  Errors:   {}",
        result.stats.errors_count.to_string().red()
    );
    println!(
        "  Warnings: {}",
        result.stats.warnings_count.to_string().yellow()
    );
    println!();

    println!(
        "Data quality score: {}%",
        colored_score(result.data_quality_score)
    );
    if !history.is_empty() {
        println!("Saved versions: {}", history.len());
    }
    println!();

    if session.is_complete() {
        println!(
            "All corrections reviewed. Run {} to export the corrected data.",
            format!("shelfcheck apply {}", session_file.display())
                .cyan()
                .bold()
        );
    } else {
        println!(
            "Run {} to continue reviewing.",
            format!("shelfcheck decide {}", session_file.display())
                .cyan()
                .bold()
        );
    }

    Ok(())
}
