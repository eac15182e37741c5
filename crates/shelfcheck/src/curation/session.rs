//! Review session: a pipeline outcome plus the reviewer's decisions, on disk.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ShelfcheckError};
use crate::input::{Row, SourceMetadata};
use crate::mapping::MappingReport;
use crate::pipeline::{Pipeline, PipelineConfig, PipelineOutcome};
use crate::schema::DatasetType;
use crate::suggestion::CorrectionTier;
use crate::transform::{ApplyResult, CorrectionApplier};
use crate::validation::ValidationResult;

use super::decision::{Decision, DecisionCounts, DecisionMap};

/// Current version of the session file format.
pub const SESSION_VERSION: &str = "1.0.0";

/// One upload under review.
///
/// Holds the rows the corrections refer to, so applying decisions later does
/// not need the original file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSession {
    /// Version of the session format.
    pub version: String,

    /// When the session was created.
    pub created_at: DateTime<Utc>,

    /// When a decision was last recorded.
    pub updated_at: DateTime<Utc>,

    /// The uploaded file, when the rows came from one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,

    pub dataset_type: DatasetType,

    /// Settings the rows were checked with; reused when revalidating.
    #[serde(default)]
    pub config: PipelineConfig,

    pub mapping: MappingReport,

    /// Rows as validated.
    pub rows: Vec<Row>,

    pub result: ValidationResult,

    #[serde(default)]
    pub decisions: DecisionMap,
}

impl ReviewSession {
    /// Start reviewing a pipeline outcome.
    pub fn from_outcome(outcome: PipelineOutcome, source: Option<SourceMetadata>) -> Self {
        let now = Utc::now();
        Self {
            version: SESSION_VERSION.to_string(),
            created_at: now,
            updated_at: now,
            source,
            dataset_type: outcome.dataset_type,
            config: PipelineConfig::default(),
            mapping: outcome.mapping,
            rows: outcome.rows,
            result: outcome.result,
            decisions: DecisionMap::new(),
        }
    }

    /// Record the settings the outcome was produced with.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// A pipeline configured the way this session's rows were checked.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::with_config(self.config.clone())
    }

    /// Validate rows derived from this session under its own settings.
    pub fn revalidate(&self, rows: &[Row]) -> ValidationResult {
        self.pipeline().revalidate(self.dataset_type, rows)
    }

    /// Accept a correction as proposed.
    pub fn accept(&mut self, correction_id: &str) -> Result<()> {
        self.decisions.accept(&self.result, correction_id)?;
        self.touch();
        Ok(())
    }

    /// Accept a correction with a different value.
    pub fn modify(&mut self, correction_id: &str, value: impl Into<String>) -> Result<()> {
        self.decisions.modify(&self.result, correction_id, value)?;
        self.touch();
        Ok(())
    }

    /// Reject a correction.
    pub fn reject(&mut self, correction_id: &str, notes: Option<&str>) -> Result<()> {
        self.decisions.reject(&self.result, correction_id, notes)?;
        self.touch();
        Ok(())
    }

    /// Record a prepared decision.
    pub fn record(&mut self, decision: Decision) -> Result<()> {
        self.decisions.record(&self.result, decision)?;
        self.touch();
        Ok(())
    }

    /// Accept every undecided correction of a tier.
    pub fn accept_tier(&mut self, tier: CorrectionTier) -> usize {
        let accepted = self.decisions.accept_tier(&self.result, tier);
        if accepted > 0 {
            self.touch();
        }
        accepted
    }

    /// Return a correction to pending.
    pub fn undo(&mut self, correction_id: &str) -> Option<Decision> {
        let removed = self.decisions.undo(correction_id);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Progress through the corrections.
    pub fn counts(&self) -> DecisionCounts {
        self.decisions.counts(&self.result.corrections)
    }

    /// Whether every applicable correction has been decided.
    pub fn is_complete(&self) -> bool {
        self.result
            .corrections
            .iter()
            .filter(|c| c.is_applicable())
            .all(|c| self.decisions.is_decided(&c.id))
    }

    /// Write approved corrections into a copy of the rows.
    pub fn apply(&self) -> ApplyResult {
        CorrectionApplier::apply_decisions(&self.rows, &self.result, &self.decisions)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Save the session to a JSON file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use shelfcheck::curation::ReviewSession;
    /// # fn example(session: &ReviewSession) -> shelfcheck::Result<()> {
    /// session.save("sales.shelfcheck.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| ShelfcheckError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let file = File::create(path).map_err(|source| ShelfcheckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(|source| ShelfcheckError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), decisions = self.decisions.len(), "saved session");
        Ok(())
    }

    /// Load a session from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|source| ShelfcheckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let session: ReviewSession = serde_json::from_reader(BufReader::new(file))?;

        Ok(session)
    }

    /// Save, first copying any existing file into the history directory.
    ///
    /// ```text
    /// data/
    /// ├── sales.shelfcheck.json
    /// └── sales.shelfcheck.history/
    ///     └── 2025-02-24T10-00-00.json
    /// ```
    pub fn save_with_history(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if path.exists() {
            let existing = Self::load(path)?;
            let timestamp = existing.updated_at.format("%Y-%m-%dT%H-%M-%S%.3f");
            let history_file = history_directory(path).join(format!("{}.json", timestamp));
            existing.save(&history_file)?;
        }

        self.save(path)
    }

    /// Previous versions of a session file, newest first.
    pub fn list_history(path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let history_dir = history_directory(path.as_ref());
        if !history_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries: Vec<PathBuf> = fs::read_dir(&history_dir)
            .map_err(|source| ShelfcheckError::Io {
                path: history_dir.clone(),
                source,
            })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();

        entries.sort_by(|a, b| b.cmp(a));
        Ok(entries)
    }
}

fn history_directory(path: &Path) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let parent = path.parent().unwrap_or(Path::new("."));

    parent.join(format!("{}.history", stem))
}

/// Session file path for a data file.
///
/// ```
/// use shelfcheck::curation::session_path;
///
/// let path = session_path("data/sales.csv");
/// assert_eq!(path.to_string_lossy(), "data/sales.shelfcheck.json");
/// ```
pub fn session_path(data_path: impl AsRef<Path>) -> PathBuf {
    let data_path = data_path.as_ref();
    let stem = data_path.file_stem().unwrap_or_default().to_string_lossy();
    let parent = data_path.parent().unwrap_or(Path::new("."));

    parent.join(format!("{}.shelfcheck.json", stem))
}
