//! Point-in-time values: a single calendar value per rule

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use log::warn;

use super::format::{
    format_date, format_timestamp, midnight, truncate_to_second, value_to_date, value_to_datetime,
};
use crate::classify::{Granularity, GranularityResolution, week_start};
use crate::rule::{FilterRule, RuleValue};

/// Encodes and decodes the single operand of a comparison rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointCodec {
    pub granularity: Granularity,
    pub first_day_of_week: Option<Weekday>,
}

impl PointCodec {
    pub fn new(resolution: GranularityResolution) -> Self {
        Self {
            granularity: resolution.mode,
            first_day_of_week: resolution.first_day_of_week,
        }
    }

    /// The picker value for a stored rule. Missing or unreadable operands
    /// fall back to `now`.
    pub fn decode(&self, rule: &FilterRule, now: NaiveDateTime) -> NaiveDateTime {
        let Some(stored) = rule.value(0) else {
            return self.default_value(now);
        };

        match self.decode_value(stored) {
            Some(value) => value,
            None => {
                warn!(
                    "Unreadable {} value {:?} on rule '{}', showing current time",
                    self.granularity, stored, rule.id
                );
                self.default_value(now)
            }
        }
    }

    /// Decode one stored operand, `None` if it cannot be read
    pub fn decode_value(&self, stored: &RuleValue) -> Option<NaiveDateTime> {
        match self.granularity {
            Granularity::Timestamp => value_to_datetime(stored),
            Granularity::Week | Granularity::Month | Granularity::Year | Granularity::Date => {
                value_to_date(stored).map(midnight)
            }
        }
    }

    /// Canonical form of an edited picker value
    pub fn encode(&self, edited: NaiveDateTime) -> RuleValue {
        let text = match self.granularity {
            // the week picker already hands over a week start, store it as is
            Granularity::Week | Granularity::Date => format_date(edited.date()),
            Granularity::Month => format_date(first_of_month(edited.date())),
            Granularity::Year => format_date(first_of_year(edited.date())),
            Granularity::Timestamp => format_timestamp(edited),
        };
        RuleValue::Text(text)
    }

    /// Propose the rule that results from a picker edit. A cleared picker
    /// proposes nothing.
    pub fn apply(&self, rule: &FilterRule, edited: Option<NaiveDateTime>) -> Option<FilterRule> {
        let edited = edited?;
        let mut updated = rule.clone();
        updated.values = vec![self.encode(edited)];
        Some(updated)
    }

    /// The week a week picker highlights for `value`
    pub fn displayed_week(&self, value: NaiveDateTime) -> NaiveDate {
        week_start(value.date(), self.first_day_of_week)
    }

    fn default_value(&self, now: NaiveDateTime) -> NaiveDateTime {
        match self.granularity {
            Granularity::Timestamp => truncate_to_second(now),
            _ => midnight(now.date()),
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn first_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::FilterOperator;
    use chrono::Timelike;

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn codec(granularity: Granularity) -> PointCodec {
        PointCodec {
            granularity,
            first_day_of_week: None,
        }
    }

    fn rule_with(value: &str) -> FilterRule {
        FilterRule::new("r1", "f", FilterOperator::Equals).with_values([value])
    }

    fn now() -> NaiveDateTime {
        datetime(2026, 10, 18, 9, 30, 15)
    }

    #[test]
    fn test_month_encode_floors() {
        let value = codec(Granularity::Month).encode(datetime(2024, 3, 17, 0, 0, 0));
        assert_eq!(value, RuleValue::from("2024-03-01"));
    }

    #[test]
    fn test_year_encode_floors() {
        let value = codec(Granularity::Year).encode(datetime(2024, 3, 17, 0, 0, 0));
        assert_eq!(value, RuleValue::from("2024-01-01"));
    }

    #[test]
    fn test_month_decode_passes_through() {
        let value = codec(Granularity::Month).decode(&rule_with("2024-03-17"), now());
        assert_eq!(value, datetime(2024, 3, 17, 0, 0, 0));
    }

    #[test]
    fn test_week_encode_does_not_floor() {
        // a Wednesday stays a Wednesday
        let value = codec(Granularity::Week).encode(datetime(2024, 3, 13, 0, 0, 0));
        assert_eq!(value, RuleValue::from("2024-03-13"));
    }

    #[test]
    fn test_week_display_anchor() {
        let codec = PointCodec {
            granularity: Granularity::Week,
            first_day_of_week: Some(Weekday::Sun),
        };
        assert_eq!(
            codec.displayed_week(datetime(2024, 3, 13, 0, 0, 0)),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
    }

    #[test]
    fn test_timestamp_encode_second_precision() {
        let edited = datetime(2024, 3, 17, 14, 5, 9)
            .with_nanosecond(500_000_000)
            .unwrap();
        assert_eq!(
            codec(Granularity::Timestamp).encode(edited),
            RuleValue::from("2024-03-17 14:05:09")
        );
    }

    #[test]
    fn test_date_decode_is_midnight() {
        let value = codec(Granularity::Date).decode(&rule_with("2024-03-17"), now());
        assert_eq!(value, datetime(2024, 3, 17, 0, 0, 0));
    }

    #[test]
    fn test_absent_value_decodes_to_now() {
        let empty = FilterRule::new("r1", "f", FilterOperator::Equals);
        assert_eq!(codec(Granularity::Timestamp).decode(&empty, now()), now());
        assert_eq!(
            codec(Granularity::Date).decode(&empty, now()),
            datetime(2026, 10, 18, 0, 0, 0)
        );
    }

    #[test]
    fn test_unparsable_timestamp_decodes_to_now() {
        let value = codec(Granularity::Timestamp).decode(&rule_with("yesterday-ish"), now());
        assert_eq!(value, now());
    }

    #[test]
    fn test_round_trip_every_granularity() {
        let edited = datetime(2024, 2, 29, 23, 59, 58);
        for granularity in [
            Granularity::Week,
            Granularity::Month,
            Granularity::Year,
            Granularity::Timestamp,
            Granularity::Date,
        ] {
            let codec = codec(granularity);
            let encoded = codec.encode(edited);
            let rule = FilterRule::new("r1", "f", FilterOperator::Equals).with_values([encoded.clone()]);
            let decoded = codec.decode(&rule, now());
            assert_eq!(codec.encode(decoded), encoded, "{}", granularity);
            assert_eq!(codec.decode_value(&encoded), Some(decoded), "{}", granularity);
        }
    }

    #[test]
    fn test_apply_replaces_values() {
        let rule = rule_with("2020-01-01");
        let updated = codec(Granularity::Date)
            .apply(&rule, Some(datetime(2024, 5, 6, 12, 0, 0)))
            .unwrap();
        assert_eq!(updated.values, vec![RuleValue::from("2024-05-06")]);
        assert_eq!(updated.id, rule.id);
        assert!(codec(Granularity::Date).apply(&rule, None).is_none());
    }
}
