//! Timestamp parsing and formatting
//!
//! The wire format always carries UTC timestamps with an explicit offset.
//! Parsing is lenient so that user input like `2024-05-01 12:00:00` or a Unix
//! timestamp can be used wherever a publish time is accepted.

use crate::error::{Error, Result};
use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc,
};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Format a timestamp as UTC RFC 3339 with a `+00:00` offset
pub fn format_utc<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    time.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Parse a timestamp string.
///
/// Strings without an offset are interpreted in the local time zone. A bare
/// number is read as Unix seconds only when it has at least nine integer
/// digits, so a lone year is not mistaken for a timestamp.
pub fn parse_time(input: &str) -> Result<DateTime<FixedOffset>> {
    let input = input.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(input) {
        return Ok(time);
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return localize(naive, input);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return localize(naive, input);
        }
    }

    if looks_like_timestamp(input) {
        if let Ok(seconds) = input.parse::<f64>() {
            return from_timestamp(seconds);
        }
    }

    Err(Error::tag_value("Date", format!("unrecognized time '{input}'")))
}

/// Convert a Unix timestamp in seconds to a local timestamp
pub fn from_timestamp(seconds: f64) -> Result<DateTime<FixedOffset>> {
    if !seconds.is_finite() {
        return Err(Error::tag_value("Date", format!("timestamp {seconds} is not finite")));
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round() as u32;
    DateTime::<Utc>::from_timestamp(whole as i64, nanos.min(999_999_999))
        .map(|utc| utc.with_timezone(&Local).fixed_offset())
        .ok_or_else(|| Error::tag_value("Date", format!("timestamp {seconds} out of range")))
}

/// Normalize an optional publish time to UTC
pub fn parse_publish_at(publish_at: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    publish_at
        .map(|s| parse_time(s).map(|t| t.with_timezone(&Utc)))
        .transpose()
}

/// Digits with an optional sign and fraction, at least nine before the point
fn looks_like_timestamp(input: &str) -> bool {
    let unsigned = input.strip_prefix('-').unwrap_or(input);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    whole.len() >= 9
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

fn localize(naive: NaiveDateTime, input: &str) -> Result<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|t| t.fixed_offset())
        .ok_or_else(|| Error::tag_value("Date", format!("'{input}' does not exist locally")))
}
