//! Apply command - write approved corrections and export the corrected data.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use shelfcheck::input::union_headers;
use shelfcheck::{QualityScorer, ReviewSession, Row};
use tracing::info;

use crate::cli::OutputFormat;

use super::{colored_score, existing_session};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let session_file = existing_session(&file)?;
    let session = ReviewSession::load(&session_file)?;

    let approved = session.counts().approved();
    if approved == 0 {
        println!(
            "{} No accepted corrections to apply.",
            "Warning:".yellow().bold()
        );
        println!(
            "Run {} to review corrections first.",
            format!("shelfcheck decide {}", session_file.display()).cyan()
        );
        return Ok(());
    }

    println!(
        "{} {} corrections",
        "Applying".cyan().bold(),
        approved.to_string().white().bold()
    );

    let applied = session.apply();
    for skipped in &applied.skipped {
        println!(
            "  {} {} {}",
            "Skipped".yellow(),
            skipped.correction_id,
            skipped.reason.label()
        );
    }

    let output_path = output.unwrap_or_else(|| default_output(&session, &session_file, format));
    write_rows(&applied.rows, &output_path, format)?;
    info!(
        path = %output_path.display(),
        cells = applied.applied_count(),
        "corrected data written"
    );

    let after = session.revalidate(&applied.rows);
    let delta = QualityScorer::delta(&session.result.stats, &after.stats);

    println!(
        "  {} cells changed in {} rows",
        applied.applied_count().to_string().white().bold(),
        applied.rows_modified()
    );
    println!(
        "  Errors: {} → {}",
        session.result.stats.errors_count,
        after.stats.errors_count
    );
    println!(
        "  Quality: {}% → {}%",
        colored_score(delta.before),
        colored_score(delta.after)
    );
    println!();
    println!(
        "{} {}",
        "Corrected data saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}

/// `<source stem>_corrected.<ext>` beside the session file.
fn default_output(session: &ReviewSession, session_file: &Path, format: OutputFormat) -> PathBuf {
    let stem = session
        .source
        .as_ref()
        .and_then(|s| {
            Path::new(&s.file)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "data".to_string());
    session_file.with_file_name(format!("{}_corrected.{}", stem, format.extension()))
}

fn write_rows(
    rows: &[Row],
    path: &Path,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)
        .map_err(|e| format!("Cannot create {}: {}", path.display(), e))?;
    let mut writer = BufWriter::new(file);

    let delimiter = match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, rows)?;
            writeln!(writer)?;
            writer.flush()?;
            return Ok(());
        }
        OutputFormat::Csv => b',',
        OutputFormat::Tsv => b'\t',
    };

    let headers = union_headers(rows);
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    csv_writer.write_record(&headers)?;
    for row in rows {
        csv_writer.write_record(
            headers
                .iter()
                .map(|h| row.get(h).map(String::as_str).unwrap_or("")),
        )?;
    }
    csv_writer.flush()?;

    Ok(())
}
