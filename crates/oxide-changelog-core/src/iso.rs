//! ISO-style date and time text forms.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, ParseResult};

const DATE: &str = "%Y-%m-%d";
const TIME: &str = "%H:%M:%S";
const TIME_FRACTION: &str = "%H:%M:%S%.f";
const DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DATE_TIME_SPACE: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Formats a date as `yyyy-MM-dd`.
#[must_use]
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE).to_string()
}

/// Formats a time as `HH:mm:ss`, keeping sub-second digits when present.
#[must_use]
pub fn format_time(time: &NaiveTime) -> String {
    time.format(TIME_FRACTION).to_string()
}

/// Formats a date-time as `yyyy-MM-ddTHH:mm:ss`, keeping sub-second digits when present.
#[must_use]
pub fn format_date_time(date_time: &NaiveDateTime) -> String {
    date_time.format(DATE_TIME).to_string()
}

/// Parses `yyyy-MM-dd`.
///
/// # Errors
///
/// Returns the chrono parse error for any other shape.
pub fn parse_date(text: &str) -> ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE)
}

/// Parses `HH:mm:ss` with optional fraction.
///
/// # Errors
///
/// Returns the chrono parse error for any other shape.
pub fn parse_time(text: &str) -> ParseResult<NaiveTime> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, TIME_FRACTION).or_else(|_| NaiveTime::parse_from_str(text, TIME))
}

/// Parses `yyyy-MM-ddTHH:mm:ss` with optional fraction. A space is accepted
/// in place of the `T` separator.
///
/// # Errors
///
/// Returns the chrono parse error for any other shape.
pub fn parse_date_time(text: &str) -> ParseResult<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, DATE_TIME)
        .or_else(|_| NaiveDateTime::parse_from_str(text, DATE_TIME_SPACE))
}
