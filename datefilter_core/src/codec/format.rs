//! Canonical text formats for persisted temporal values

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::rule::RuleValue;

/// Bare calendar date, e.g. `2024-03-17`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Second-precision timestamp without zone, e.g. `2024-03-17 14:05:09`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Older writers used an ISO `T` separator and sometimes fractional seconds
const LEGACY_TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Drop everything below one second
pub fn truncate_to_second(value: NaiveDateTime) -> NaiveDateTime {
    value.with_nanosecond(0).unwrap_or(value)
}

pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Parse any timestamp form we have ever written. Bare dates parse to
/// midnight; zoned values are moved into local time.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    if let Ok(value) = NaiveDateTime::parse_from_str(input, TIMESTAMP_FORMAT) {
        return Some(value);
    }

    for format in LEGACY_TIMESTAMP_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(input, format) {
            return Some(truncate_to_second(value));
        }
    }

    if let Ok(value) = DateTime::parse_from_rfc3339(input) {
        return Some(truncate_to_second(value.with_timezone(&Local).naive_local()));
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .ok()
        .map(midnight)
}

/// Parse a calendar date, taking the date part of timestamp forms
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .ok()
        .or_else(|| parse_timestamp(input).map(|value| value.date()))
}

/// Interpret a stored operand as an instant.
///
/// Numbers are epoch milliseconds, as a browser `Date` would read them.
pub fn value_to_datetime(value: &RuleValue) -> Option<NaiveDateTime> {
    match value {
        RuleValue::Text(s) => parse_timestamp(s),
        RuleValue::Integer(ms) => from_epoch_millis(*ms),
        RuleValue::Float(ms) if ms.is_finite() => from_epoch_millis(ms.trunc() as i64),
        _ => None,
    }
}

/// Interpret a stored operand as a calendar date
pub fn value_to_date(value: &RuleValue) -> Option<NaiveDate> {
    match value {
        RuleValue::Text(s) => parse_date(s),
        other => value_to_datetime(other).map(|value| value.date()),
    }
}

fn from_epoch_millis(ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms)
        .map(|utc| truncate_to_second(utc.with_timezone(&Local).naive_local()))
}
