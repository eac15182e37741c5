//! CLI command implementations.

pub mod apply;
pub mod check;
pub mod decide;
pub mod diff;
pub mod status;

use std::path::{Path, PathBuf};

use colored::{ColoredString, Colorize};
use shelfcheck::CorrectionTier;
use shelfcheck::curation::session_path;

/// Session file for a path that is either a session file or a data file.
pub(crate) fn session_file_for(file: &Path) -> PathBuf {
    if file.extension().is_some_and(|e| e == "json") {
        file.to_path_buf()
    } else {
        session_path(file)
    }
}

/// Resolve and check a session path, pointing at `check` if it is missing.
pub(crate) fn existing_session(file: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = session_file_for(file);
    if !path.exists() {
        return Err(format!(
            "Session file not found: {}\nRun 'shelfcheck check <FILE>' first.",
            path.display()
        )
        .into());
    }
    Ok(path)
}

/// Quality score, green at 80 and above, red below 50.
pub(crate) fn colored_score(score: f64) -> ColoredString {
    let text = format!("{:.0}", score);
    if score >= 80.0 {
        text.green()
    } else if score >= 50.0 {
        text.yellow()
    } else {
        text.red()
    }
}

pub(crate) fn colored_tier(tier: CorrectionTier) -> ColoredString {
    match tier {
        CorrectionTier::Auto => tier.label().green(),
        CorrectionTier::Suggested => tier.label().cyan(),
        CorrectionTier::Manual => tier.label().yellow(),
        CorrectionTier::Critical => tier.label().red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_file_for() {
        assert_eq!(
            session_file_for(Path::new("data/sales.csv")),
            PathBuf::from("data/sales.shelfcheck.json")
        );
        assert_eq!(
            session_file_for(Path::new("data/sales.shelfcheck.json")),
            PathBuf::from("data/sales.shelfcheck.json")
        );
    }

    #[test]
    fn test_missing_session_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = existing_session(&dir.path().join("sales.csv")).unwrap_err();
        assert!(err.to_string().contains("shelfcheck check"));
    }
}
