//! CLI argument definitions using clap.

use clap::{ArgAction, Parser, Subcommand};
use shelfcheck::CorrectionTier;
use std::path::PathBuf;

/// Shelfcheck: data-quality checks for retail sales, offers, and demographics uploads
#[derive(Parser)]
#[command(name = "shelfcheck")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a data file and create a review session
    Check {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the session file (default: <file>.shelfcheck.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Dataset type, skipping detection (sales, offers, demographics)
        #[arg(short = 't', long = "type")]
        dataset_type: Option<String>,

        /// Validate values as uploaded, without normalizing them first
        #[arg(long)]
        no_normalize: bool,

        /// Pipeline configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Accept, modify, or reject corrections in a review session
    Decide {
        /// Path to the session file
        #[arg(value_name = "SESSION_FILE")]
        file: PathBuf,

        /// Accept corrections as proposed
        #[arg(long, value_name = "ID", num_args = 1..)]
        accept: Vec<String>,

        /// Reject corrections
        #[arg(long, value_name = "ID", num_args = 1..)]
        reject: Vec<String>,

        /// Replace a correction's value (use with --value)
        #[arg(long, value_name = "ID", requires = "value")]
        modify: Option<String>,

        /// Value to write for --modify
        #[arg(long, requires = "modify")]
        value: Option<String>,

        /// Accept every pending correction of a tier (auto or suggested)
        #[arg(long)]
        tier: Option<TierChoice>,

        /// Return corrections to pending
        #[arg(long, value_name = "ID", num_args = 1..)]
        undo: Vec<String>,

        /// Who made the decisions
        #[arg(long, default_value = "cli")]
        user: String,

        /// Notes attached to each decision
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show review progress and summary
    Status {
        /// Path to session file or data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Preview the cell changes that would be applied
    Diff {
        /// Path to session file
        #[arg(value_name = "SESSION_FILE")]
        file: PathBuf,
    },

    /// Apply approved corrections and export corrected data
    Apply {
        /// Path to session file
        #[arg(value_name = "SESSION_FILE")]
        file: PathBuf,

        /// Output path for corrected data
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Tiers that can be accepted in bulk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TierChoice {
    Auto,
    Suggested,
}

impl From<TierChoice> for CorrectionTier {
    fn from(choice: TierChoice) -> Self {
        match choice {
            TierChoice::Auto => CorrectionTier::Auto,
            TierChoice::Suggested => CorrectionTier::Suggested,
        }
    }
}

impl std::str::FromStr for TierChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(TierChoice::Auto),
            "suggested" => Ok(TierChoice::Suggested),
            "manual" | "critical" => Err(format!(
                "{} corrections cannot be accepted in bulk; decide them one by one.",
                s
            )),
            _ => Err(format!("Unknown tier: {}. Use auto or suggested.", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::parse_from(["shelfcheck", "-vv", "check", "sales.csv", "--type", "sales"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Check {
                file, dataset_type, ..
            } => {
                assert_eq!(file, PathBuf::from("sales.csv"));
                assert_eq!(dataset_type.as_deref(), Some("sales"));
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_parse_decide() {
        let cli = Cli::parse_from([
            "shelfcheck",
            "decide",
            "sales.shelfcheck.json",
            "--accept",
            "cor_001",
            "cor_002",
            "--tier",
            "auto",
        ]);
        match cli.command {
            Commands::Decide { accept, tier, .. } => {
                assert_eq!(accept, vec!["cor_001", "cor_002"]);
                assert_eq!(tier, Some(TierChoice::Auto));
            }
            _ => panic!("expected decide"),
        }
    }

    #[test]
    fn test_modify_requires_value() {
        let parsed = Cli::try_parse_from(["shelfcheck", "decide", "s.json", "--modify", "cor_001"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_manual_tier_is_refused() {
        assert!("manual".parse::<TierChoice>().is_err());
        assert_eq!("Suggested".parse::<TierChoice>(), Ok(TierChoice::Suggested));
        assert_eq!(CorrectionTier::from(TierChoice::Auto), CorrectionTier::Auto);
    }

    #[test]
    fn test_output_format() {
        assert_eq!("TSV".parse::<OutputFormat>(), Ok(OutputFormat::Tsv));
        assert!("parquet".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
