//! Diff command - preview the cell changes approved decisions would make.

use std::path::PathBuf;

use colored::Colorize;
use shelfcheck::{QualityScorer, ReviewSession};

use super::{colored_tier, existing_session};

pub fn run(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let session_file = existing_session(&file)?;
    let session = ReviewSession::load(&session_file)?;

    let applied = session.apply();
    if applied.audit.is_empty() {
        println!("{}", "No changes to preview.".yellow());
        println!(
            "Accept some corrections first using {}.",
            format!("shelfcheck decide {}", session_file.display()).cyan()
        );
        return Ok(());
    }

    println!(
        "{} {} cell changes in {} rows",
        "Previewing".cyan().bold(),
        applied.applied_count().to_string().white().bold(),
        applied.rows_modified()
    );
    println!();

    let mut changes: Vec<_> = applied.audit.iter().collect();
    changes.sort_by_key(|change| change.row);

    let mut current_row = 0;
    for change in changes {
        if change.row != current_row {
            current_row = change.row;
            println!("{}", format!("row {}", change.row).white().bold());
        }
        println!(
            "  {:20} {} {} [{}]",
            change.column,
            format!("- {}", change.original_value).red(),
            format!("+ {}", change.new_value).green(),
            colored_tier(change.tier)
        );
    }

    if !applied.skipped.is_empty() {
        println!();
        println!("{}", "Skipped:".yellow().bold());
        for skipped in &applied.skipped {
            println!(
                "  {} {}",
                skipped.correction_id.dimmed(),
                skipped.reason.label()
            );
        }
    }

    let after = session.revalidate(&applied.rows);
    let delta = QualityScorer::delta(&session.result.stats, &after.stats);
    println!();
    println!(
        "Errors: {} → {}",
        session.result.stats.errors_count.to_string().red(),
        after.stats.errors_count.to_string().green()
    );
    println!("Quality: {}", delta);
    println!();
    println!(
        "Run {} to apply these changes.",
        format!("shelfcheck apply {}", session_file.display())
            .cyan()
            .bold()
    );

    Ok(())
}
