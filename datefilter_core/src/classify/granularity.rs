//! Granularity classification from field metadata

use std::fmt;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::field::FieldDescriptor;

/// Calendar precision a point-in-time value is edited at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Week,
    Month,
    Year,
    Timestamp,
    Date,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
            Granularity::Timestamp => "timestamp",
            Granularity::Date => "date",
        };
        f.write_str(name)
    }
}

/// Precision of range endpoints. Ranges ignore the field's time interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    Day,
    Second,
}

impl Precision {
    pub fn of(field: &FieldDescriptor) -> Self {
        if field.is_timestamp() {
            Precision::Second
        } else {
            Precision::Day
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Day => f.write_str("day"),
            Precision::Second => f.write_str("second"),
        }
    }
}

/// Result of classifying a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GranularityResolution {
    pub mode: Granularity,
    pub first_day_of_week: Option<Weekday>,
}

/// Classify a field into the granularity its point-in-time values use.
///
/// `start_of_week` is the configured week start, 0 = Monday through
/// 6 = Sunday. Anything else leaves `first_day_of_week` unset.
pub fn resolve_granularity(
    field: &FieldDescriptor,
    start_of_week: Option<u8>,
) -> GranularityResolution {
    let interval_mode = field
        .time_interval
        .as_deref()
        .and_then(granularity_for_interval);

    let mode = match interval_mode {
        Some(mode) => mode,
        None if field.is_timestamp() => Granularity::Timestamp,
        None => Granularity::Date,
    };

    GranularityResolution {
        mode,
        first_day_of_week: start_of_week.and_then(weekday_from_index),
    }
}

fn granularity_for_interval(interval: &str) -> Option<Granularity> {
    if interval.eq_ignore_ascii_case("WEEK") {
        Some(Granularity::Week)
    } else if interval.eq_ignore_ascii_case("MONTH") {
        Some(Granularity::Month)
    } else if interval.eq_ignore_ascii_case("YEAR") {
        Some(Granularity::Year)
    } else {
        None
    }
}

/// Convert a configured week start (0 = Monday) into a weekday
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

/// First day of the week containing `date`. Weeks start on Monday unless
/// configured otherwise.
pub fn week_start(date: NaiveDate, first_day_of_week: Option<Weekday>) -> NaiveDate {
    let first = first_day_of_week.unwrap_or(Weekday::Mon);
    let offset = (7 + date.weekday().num_days_from_monday() - first.num_days_from_monday()) % 7;
    date - Days::new(offset as u64)
}
