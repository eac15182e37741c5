//! Fuzz target for the upload reader.
//!
//! Arbitrary bytes must either fail with an error or produce rows whose
//! shape agrees with the recorded source metadata.

#![no_main]

use libfuzzer_sys::fuzz_target;
use shelfcheck::Parser;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(mut upload) = tempfile::NamedTempFile::new() {
        if upload.write_all(data).is_ok() {
            if let Ok((rows, source)) = Parser::new().parse_file(upload.path()) {
                assert_eq!(source.row_count, rows.len());
                assert!(source.short_rows + source.long_rows <= source.row_count);
                assert_eq!(source.size_bytes, data.len() as u64);
            }
        }
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(rows) = Parser::new().parse_str(text) {
            // Every row keeps at least one cell; empty lines are skipped by the reader
            assert!(rows.iter().all(|row| !row.is_empty()));
        }
    }
});
