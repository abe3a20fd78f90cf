//! Bounded-range endpoints

use chrono::{NaiveDateTime, TimeDelta, Weekday};
use log::warn;

use super::format::{
    format_date, format_timestamp, midnight, truncate_to_second, value_to_date, value_to_datetime,
};
use crate::classify::Precision;
use crate::rule::{FilterRule, RuleValue};

/// Selectable limits for each endpoint given the other one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeBounds {
    /// Latest start the start picker may offer
    pub start_max: Option<NaiveDateTime>,
    /// Earliest end the end picker may offer
    pub end_min: Option<NaiveDateTime>,
}

impl RangeBounds {
    pub fn permits_start(&self, start: NaiveDateTime) -> bool {
        self.start_max.is_none_or(|max| start <= max)
    }

    pub fn permits_end(&self, end: NaiveDateTime) -> bool {
        self.end_min.is_none_or(|min| end >= min)
    }
}

/// Encodes and decodes the two operands of an `inBetween` rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeCodec {
    pub precision: Precision,
    pub first_day_of_week: Option<Weekday>,
}

impl RangeCodec {
    /// Smallest distance two endpoints can be apart
    pub fn step(&self) -> TimeDelta {
        match self.precision {
            Precision::Day => TimeDelta::days(1),
            Precision::Second => TimeDelta::seconds(1),
        }
    }

    /// Reduce an edited value to the precision it will be stored at, so
    /// ordering checks compare what will actually be persisted.
    pub fn normalize(&self, value: NaiveDateTime) -> NaiveDateTime {
        match self.precision {
            Precision::Day => midnight(value.date()),
            Precision::Second => truncate_to_second(value),
        }
    }

    /// Both endpoints of a stored rule. Unreadable endpoints are absent.
    pub fn decode(&self, rule: &FilterRule) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
        (self.decode_end(rule, 0), self.decode_end(rule, 1))
    }

    fn decode_end(&self, rule: &FilterRule, index: usize) -> Option<NaiveDateTime> {
        let stored = rule.value(index)?;
        let decoded = self.decode_value(stored);
        if decoded.is_none() {
            warn!(
                "Unreadable range endpoint {:?} on rule '{}', treating as unbounded",
                stored, rule.id
            );
        }
        decoded
    }

    pub fn decode_value(&self, stored: &RuleValue) -> Option<NaiveDateTime> {
        match self.precision {
            Precision::Day => value_to_date(stored).map(midnight),
            Precision::Second => value_to_datetime(stored),
        }
    }

    pub fn encode(&self, value: NaiveDateTime) -> RuleValue {
        match self.precision {
            Precision::Day => RuleValue::Text(format_date(value.date())),
            Precision::Second => RuleValue::Text(format_timestamp(value)),
        }
    }

    /// Propose the rule holding a complete, ordered range
    pub fn apply(&self, rule: &FilterRule, start: NaiveDateTime, end: NaiveDateTime) -> FilterRule {
        let mut updated = rule.clone();
        updated.values = vec![self.encode(start), self.encode(end)];
        updated
    }

    /// Propose the rule holding a half-open range. The missing side is
    /// stored as `null`.
    pub fn apply_open(
        &self,
        rule: &FilterRule,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> FilterRule {
        let encode = |value: Option<NaiveDateTime>| match value {
            Some(value) => self.encode(value),
            None => RuleValue::Null,
        };
        let mut updated = rule.clone();
        updated.values = vec![encode(start), encode(end)];
        updated
    }

    /// Picker limits implied by the current endpoints
    pub fn bounds(&self, start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> RangeBounds {
        let step = self.step();
        RangeBounds {
            start_max: end.and_then(|end| end.checked_sub_signed(step)),
            end_min: start.and_then(|start| start.checked_add_signed(step)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::FilterOperator;
    use chrono::NaiveDate;

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn codec(precision: Precision) -> RangeCodec {
        RangeCodec {
            precision,
            first_day_of_week: None,
        }
    }

    #[test]
    fn test_timestamp_bounds_are_one_second_apart() {
        let bounds = codec(Precision::Second).bounds(
            Some(datetime(2024, 1, 10, 8, 0, 0)),
            Some(datetime(2024, 1, 20, 18, 0, 0)),
        );
        assert_eq!(bounds.start_max, Some(datetime(2024, 1, 20, 17, 59, 59)));
        assert_eq!(bounds.end_min, Some(datetime(2024, 1, 10, 8, 0, 1)));
        assert!(!bounds.permits_start(datetime(2024, 1, 20, 18, 0, 0)));
        assert!(bounds.permits_end(datetime(2024, 1, 10, 8, 0, 1)));
    }

    #[test]
    fn test_open_bounds() {
        let bounds = codec(Precision::Day).bounds(None, None);
        assert_eq!(bounds, RangeBounds::default());
        assert!(bounds.permits_start(datetime(2999, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_date_decode_drops_time() {
        let rule = FilterRule::new("r1", "f", FilterOperator::InBetween)
            .with_values(["2024-01-10 13:45:00", "2024-01-20"]);
        let (start, end) = codec(Precision::Day).decode(&rule);
        assert_eq!(start, Some(datetime(2024, 1, 10, 0, 0, 0)));
        assert_eq!(end, Some(datetime(2024, 1, 20, 0, 0, 0)));
    }

    #[test]
    fn test_unreadable_or_null_endpoint_is_absent() {
        let rule = FilterRule::new("r1", "f", FilterOperator::InBetween)
            .with_values([RuleValue::Null, RuleValue::from("garbage")]);
        assert_eq!(codec(Precision::Second).decode(&rule), (None, None));
    }

    #[test]
    fn test_apply_encodes_at_precision() {
        let rule = FilterRule::new("r1", "f", FilterOperator::InBetween);
        let start = datetime(2024, 1, 10, 8, 30, 0);
        let end = datetime(2024, 1, 20, 18, 0, 5);

        let by_day = codec(Precision::Day).apply(&rule, start, end);
        assert_eq!(
            by_day.values,
            vec![RuleValue::from("2024-01-10"), RuleValue::from("2024-01-20")]
        );

        let by_second = codec(Precision::Second).apply(&rule, start, end);
        assert_eq!(
            by_second.values,
            vec![
                RuleValue::from("2024-01-10 08:30:00"),
                RuleValue::from("2024-01-20 18:00:05")
            ]
        );
    }

    #[test]
    fn test_apply_open_stores_null_side() {
        let rule = FilterRule::new("r1", "f", FilterOperator::InBetween);
        let codec = codec(Precision::Day);

        let from = codec.apply_open(&rule, Some(datetime(2024, 1, 10, 9, 0, 0)), None);
        assert_eq!(
            from.values,
            vec![RuleValue::from("2024-01-10"), RuleValue::Null]
        );

        let until = codec.apply_open(&rule, None, Some(datetime(2024, 1, 20, 0, 0, 0)));
        assert_eq!(
            until.values,
            vec![RuleValue::Null, RuleValue::from("2024-01-20")]
        );
        assert_eq!(
            codec.decode(&until),
            (None, Some(datetime(2024, 1, 20, 0, 0, 0)))
        );
    }

    #[test]
    fn test_round_trip() {
        for precision in [Precision::Day, Precision::Second] {
            let codec = codec(precision);
            let value = codec.normalize(datetime(2024, 2, 29, 23, 59, 59));
            assert_eq!(codec.decode_value(&codec.encode(value)), Some(value));
        }
    }
}
