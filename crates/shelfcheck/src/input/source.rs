//! Provenance of an uploaded file, kept with the review session.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Result, ShelfcheckError};

/// `sha256:<hex>` digest of raw file bytes.
pub fn content_hash(bytes: &[u8]) -> String {
    format!("sha256:{:x}", Sha256::digest(bytes))
}

/// Where a set of rows came from and what the reader saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    pub path: PathBuf,
    /// Digest of the bytes that were read, see [`content_hash`].
    pub hash: String,
    pub size_bytes: u64,
    /// `csv`, `tsv`, `csv-semicolon`, `psv`, or `delimited`.
    pub format: String,
    pub delimiter: char,
    /// Data rows, excluding the header.
    pub row_count: usize,
    /// Header columns.
    pub column_count: usize,
    /// Rows with fewer cells than the header.
    #[serde(default)]
    pub short_rows: usize,
    /// Rows with more cells than the header.
    #[serde(default)]
    pub long_rows: usize,
    pub read_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Describe a file from the bytes that were read.
    pub fn from_bytes(path: &Path, bytes: &[u8], delimiter: u8) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path: path.to_path_buf(),
            hash: content_hash(bytes),
            size_bytes: bytes.len() as u64,
            format: format_name(delimiter).to_string(),
            delimiter: delimiter as char,
            row_count: 0,
            column_count: 0,
            short_rows: 0,
            long_rows: 0,
            read_at: Utc::now(),
        }
    }

    /// Record the table shape, counting rows whose width differs from the header.
    pub fn with_shape(mut self, column_count: usize, row_widths: impl IntoIterator<Item = usize>) -> Self {
        self.column_count = column_count;
        self.row_count = 0;
        self.short_rows = 0;
        self.long_rows = 0;
        for width in row_widths {
            self.row_count += 1;
            if width < column_count {
                self.short_rows += 1;
            } else if width > column_count {
                self.long_rows += 1;
            }
        }
        self
    }

    /// Whether the file on disk still has the bytes that were checked.
    pub fn is_unchanged(&self) -> Result<bool> {
        let bytes = fs::read(&self.path).map_err(|source| ShelfcheckError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(content_hash(&bytes) == self.hash)
    }
}

fn format_name(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}
