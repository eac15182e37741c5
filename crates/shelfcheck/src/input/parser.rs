//! CSV/TSV reader with delimiter detection.
//!
//! The pipeline itself consumes already-parsed rows; this reader is the
//! file-to-rows step used by the CLI and tests.

use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{Result, ShelfcheckError};

use super::row::Row;
use super::source::SourceMetadata;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Byte-order mark spreadsheet exports put before the first header.
const BOM: char = '\u{feff}';

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Reads delimited files into rows.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return its rows and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Vec<Row>, SourceMetadata)> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|source| ShelfcheckError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let (headers, rows) = self.read_records(&contents, delimiter)?;
        let metadata = SourceMetadata::from_bytes(path, &contents, delimiter)
            .with_shape(headers.len(), rows.iter().map(|row| row.len()));

        debug!(
            path = %path.display(),
            rows = metadata.row_count,
            columns = metadata.column_count,
            short_rows = metadata.short_rows,
            long_rows = metadata.long_rows,
            format = %metadata.format,
            "parsed source file"
        );

        Ok((rows, metadata))
    }

    /// Parse in-memory text, auto-detecting the delimiter unless configured.
    pub fn parse_str(&self, text: &str) -> Result<Vec<Row>> {
        let bytes = text.as_bytes();
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };
        self.read_records(bytes, delimiter).map(|(_, rows)| rows)
    }

    /// Read headers and records.
    ///
    /// Short records simply lack the trailing keys and long records keep their
    /// extra cells under `column_N`, so column-count drift remains visible to
    /// validation.
    fn read_records(&self, bytes: &[u8], delimiter: u8) -> Result<(Vec<String>, Vec<Row>)> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.records();

        let headers: Vec<String> = if self.config.has_header {
            match records.next() {
                Some(record) => dedupe_headers(
                    record?
                        .iter()
                        .map(|s| s.trim_start_matches(BOM).trim().to_string()),
                ),
                None => return Err(ShelfcheckError::EmptyData("No header row found".to_string())),
            }
        } else {
            Vec::new()
        };

        if self.config.has_header && headers.iter().all(|h| h.is_empty()) {
            return Err(ShelfcheckError::EmptyData("No columns found".to_string()));
        }

        let mut rows = Vec::new();
        for (row_idx, result) in records.enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            let row: Row = record
                .iter()
                .enumerate()
                .map(|(i, value)| {
                    let key = headers
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| format!("column_{}", i + 1));
                    (key, value.to_string())
                })
                .collect();
            rows.push(row);
        }

        let headers = if headers.is_empty() {
            rows.first()
                .map(|row| row.keys().cloned().collect())
                .unwrap_or_default()
        } else {
            headers
        };

        Ok((headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Make header names unique so no column is lost when rows become maps.
fn dedupe_headers(headers: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for (i, header) in headers.enumerate() {
        let base = if header.is_empty() {
            format!("column_{}", i + 1)
        } else {
            header
        };
        let mut name = base.clone();
        let mut n = 2;
        while !seen.insert(name.clone()) {
            name = format!("{}_{}", base, n);
            n += 1;
        }
        out.push(name);
    }

    out
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ShelfcheckError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tabs get a small bonus
        let score = if consistent {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_parse_str_builds_keyed_rows() {
        let parser = Parser::new();
        let rows = parser
            .parse_str("receipt_date,product_name,chain\n02/24/2025,Widget,Tesco\n")
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["receipt_date"], "02/24/2025");
        assert_eq!(rows[0]["chain"], "Tesco");
    }

    #[test]
    fn test_ragged_rows_keep_drift() {
        let parser = Parser::new();
        let rows = parser.parse_str("a,b\n1,2\n3\n4,5,6\n").unwrap();

        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[2].len(), 3);
        assert_eq!(rows[2]["column_3"], "6");
    }

    #[test]
    fn test_duplicate_headers_are_kept() {
        let parser = Parser::new();
        let rows = parser.parse_str("chain,chain\nTesco,Asda\n").unwrap();

        assert_eq!(rows[0]["chain"], "Tesco");
        assert_eq!(rows[0]["chain_2"], "Asda");
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let parser = Parser::new();
        let rows = parser.parse_str("a,b,c\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_empty_input_is_error() {
        let parser = Parser::new();
        assert!(matches!(parser.parse_str(""), Err(ShelfcheckError::EmptyData(_))));
    }

    #[test]
    fn test_parse_file_metadata() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"chain\tsales_value\nTesco\t1.50\nAsda\t2.00\n").unwrap();

        let (rows, source) = Parser::new().parse_file(file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(source.format, "tsv");
        assert_eq!(source.delimiter, '\t');
        assert_eq!(source.row_count, 2);
        assert_eq!(source.column_count, 2);
        assert_eq!(source.short_rows, 0);
        assert!(source.hash.starts_with("sha256:"));
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        let rows = Parser::new()
            .parse_str("\u{feff}receipt_date,chain\n2025-02-24,Tesco\n")
            .unwrap();
        assert_eq!(rows[0]["receipt_date"], "2025-02-24");
    }

    #[test]
    fn test_semicolon_export_with_short_row() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"offer_name;chain;hits\nMeal Deal;Tesco;120\n2 for 1;Asda\n")
            .unwrap();

        let (rows, source) = Parser::new().parse_file(file.path()).unwrap();

        assert_eq!(source.format, "csv-semicolon");
        assert_eq!(source.short_rows, 1);
        assert_eq!(rows[1].len(), 2);
    }
}
