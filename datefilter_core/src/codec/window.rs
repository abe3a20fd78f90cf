//! Relative ("in the past 3 weeks") and current ("in the current month")
//! window values

use log::warn;

use crate::rule::{FilterRule, RuleValue, UnitOfTime, WindowSettings};
use crate::units::{UnitOfTimeOption, unit_of_time_options};

/// Decoded state of a relative window rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeWindow {
    pub count: Option<u32>,
    pub settings: WindowSettings,
}

/// Count and unit are independent sub-fields; editing one never touches the
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeWindowCodec {
    pub is_timestamp: bool,
}

impl RelativeWindowCodec {
    pub fn decode(&self, rule: &FilterRule) -> RelativeWindow {
        let count = rule.value(0).and_then(|stored| {
            let count = parse_count(stored);
            if count.is_none() {
                warn!("Unreadable window count {:?} on rule '{}'", stored, rule.id);
            }
            count
        });

        RelativeWindow {
            count,
            settings: rule.settings.unwrap_or_default(),
        }
    }

    /// Propose a new count. Clearing the count leaves the rule without values.
    pub fn apply_count(&self, rule: &FilterRule, count: Option<u32>) -> FilterRule {
        let mut updated = rule.clone();
        updated.values = count
            .map(|n| vec![RuleValue::Integer(i64::from(n))])
            .unwrap_or_default();
        updated
    }

    /// Propose a new unit and completion flag
    pub fn apply_unit(&self, rule: &FilterRule, unit: UnitOfTime, completed: bool) -> FilterRule {
        let mut updated = rule.clone();
        updated.settings = Some(WindowSettings::new(unit, completed));
        updated
    }

    pub fn options(&self) -> Vec<UnitOfTimeOption> {
        unit_of_time_options(self.is_timestamp, true, true)
    }
}

/// Only the unit is editable; a current window is never "completed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentWindowCodec {
    pub is_timestamp: bool,
}

impl CurrentWindowCodec {
    pub fn decode(&self, rule: &FilterRule) -> WindowSettings {
        let unit = rule
            .settings
            .map(|settings| settings.unit_of_time)
            .unwrap_or_default();
        WindowSettings::new(unit, false)
    }

    pub fn apply(&self, rule: &FilterRule, unit: UnitOfTime) -> FilterRule {
        let mut updated = rule.clone();
        updated.settings = Some(WindowSettings::new(unit, false));
        updated
    }

    pub fn options(&self) -> Vec<UnitOfTimeOption> {
        unit_of_time_options(self.is_timestamp, false, false)
    }
}

/// Read a window count the way a number input would: leading integer
/// digits, fractions truncated, negatives rejected.
pub fn parse_count(value: &RuleValue) -> Option<u32> {
    match value {
        RuleValue::Integer(n) => u32::try_from(*n).ok(),
        RuleValue::Float(f) if f.is_finite() && *f >= 0.0 && *f <= u32::MAX as f64 => {
            Some(f.trunc() as u32)
        }
        RuleValue::Text(s) => parse_integer_prefix(s).and_then(|n| u32::try_from(n).ok()),
        _ => None,
    }
}

fn parse_integer_prefix(input: &str) -> Option<i64> {
    let input = input.trim_start();
    let (negative, rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
