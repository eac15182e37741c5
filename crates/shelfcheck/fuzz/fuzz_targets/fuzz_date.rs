//! Fuzz target for date parsing and format detection.
//!
//! Checks that the date helpers never panic on arbitrary text and that
//! anything they parse formats back to a date the strict parser accepts.

#![no_main]

use libfuzzer_sys::fuzz_target;
use shelfcheck::normalize::{DateFormat, format_iso, parse_alternate_date, parse_date};

fuzz_target!(|data: &[u8]| {
    if data.len() > 1_000 {
        return;
    }

    if let Ok(value) = std::str::from_utf8(data) {
        let _ = DateFormat::detect(value);
        let _ = parse_date(value);

        if let Some(date) = parse_alternate_date(value) {
            let iso = format_iso(date);
            // Four-digit years only; chrono pads others with a sign
            if iso.len() == 10 {
                assert_eq!(parse_date(&iso), Some(date));
            }
        }
    }
});
