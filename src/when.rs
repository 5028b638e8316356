//! Text-to-timestamp parsing for the `--time` option.
//!
//! Accepts RFC 3339, a small set of explicit formats, and a few relative
//! words. Not a natural-language date engine.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a time string. Returns `None` when nothing matches.
pub fn parse(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "now" => return Some(Local::now().naive_local()),
        "today" => return midnight(Local::now().date_naive()),
        "tomorrow" => {
            return midnight(Local::now().date_naive().checked_add_days(Days::new(1))?);
        }
        "yesterday" => {
            return midnight(Local::now().date_naive().checked_sub_days(Days::new(1))?);
        }
        _ => {}
    }

    if let Ok(t) = DateTime::parse_from_rfc3339(input) {
        return Some(t.with_timezone(&Local).naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(input, format) {
            return Some(t);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(input, format) {
            return midnight(d);
        }
    }

    None
}

fn midnight(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_opt(0, 0, 0)
}
