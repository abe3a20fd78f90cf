//! Filter rule type definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison operators a filter rule can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    IsNull,
    NotNull,
    Equals,
    NotEquals,
    StartsWith,
    EndsWith,
    Include,
    DoesNotInclude,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    InThePast,
    NotInThePast,
    InTheNext,
    InTheCurrent,
    NotInTheCurrent,
    InBetween,
    NotInBetween,
}

impl FilterOperator {
    /// All operators, in declaration order
    pub const ALL: [FilterOperator; 19] = [
        FilterOperator::IsNull,
        FilterOperator::NotNull,
        FilterOperator::Equals,
        FilterOperator::NotEquals,
        FilterOperator::StartsWith,
        FilterOperator::EndsWith,
        FilterOperator::Include,
        FilterOperator::DoesNotInclude,
        FilterOperator::LessThan,
        FilterOperator::LessThanOrEqual,
        FilterOperator::GreaterThan,
        FilterOperator::GreaterThanOrEqual,
        FilterOperator::InThePast,
        FilterOperator::NotInThePast,
        FilterOperator::InTheNext,
        FilterOperator::InTheCurrent,
        FilterOperator::NotInTheCurrent,
        FilterOperator::InBetween,
        FilterOperator::NotInBetween,
    ];

    /// The wire name of this operator (e.g. "inBetween")
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::IsNull => "isNull",
            FilterOperator::NotNull => "notNull",
            FilterOperator::Equals => "equals",
            FilterOperator::NotEquals => "notEquals",
            FilterOperator::StartsWith => "startsWith",
            FilterOperator::EndsWith => "endsWith",
            FilterOperator::Include => "include",
            FilterOperator::DoesNotInclude => "doesNotInclude",
            FilterOperator::LessThan => "lessThan",
            FilterOperator::LessThanOrEqual => "lessThanOrEqual",
            FilterOperator::GreaterThan => "greaterThan",
            FilterOperator::GreaterThanOrEqual => "greaterThanOrEqual",
            FilterOperator::InThePast => "inThePast",
            FilterOperator::NotInThePast => "notInThePast",
            FilterOperator::InTheNext => "inTheNext",
            FilterOperator::InTheCurrent => "inTheCurrent",
            FilterOperator::NotInTheCurrent => "notInTheCurrent",
            FilterOperator::InBetween => "inBetween",
            FilterOperator::NotInBetween => "notInBetween",
        }
    }

    /// Look up an operator by its wire name
    pub fn from_name(name: &str) -> Option<FilterOperator> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single operand stored in a rule's values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RuleValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RuleValue::Null)
    }
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        RuleValue::Text(value.to_string())
    }
}

impl From<String> for RuleValue {
    fn from(value: String) -> Self {
        RuleValue::Text(value)
    }
}

impl From<i64> for RuleValue {
    fn from(value: i64) -> Self {
        RuleValue::Integer(value)
    }
}

/// Calendar unit used by relative and current window rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitOfTime {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    #[default]
    Days,
    Weeks,
    Months,
    Quarters,
    Years,
}

impl UnitOfTime {
    pub const ALL: [UnitOfTime; 9] = [
        UnitOfTime::Milliseconds,
        UnitOfTime::Seconds,
        UnitOfTime::Minutes,
        UnitOfTime::Hours,
        UnitOfTime::Days,
        UnitOfTime::Weeks,
        UnitOfTime::Months,
        UnitOfTime::Quarters,
        UnitOfTime::Years,
    ];

    /// Plural wire name, as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitOfTime::Milliseconds => "milliseconds",
            UnitOfTime::Seconds => "seconds",
            UnitOfTime::Minutes => "minutes",
            UnitOfTime::Hours => "hours",
            UnitOfTime::Days => "days",
            UnitOfTime::Weeks => "weeks",
            UnitOfTime::Months => "months",
            UnitOfTime::Quarters => "quarters",
            UnitOfTime::Years => "years",
        }
    }

    /// Singular label (e.g. "day")
    pub fn singular(&self) -> &'static str {
        let plural = self.as_str();
        &plural[..plural.len() - 1]
    }

    /// Units finer than a day only make sense on timestamp fields
    pub fn is_sub_day(&self) -> bool {
        matches!(
            self,
            UnitOfTime::Milliseconds | UnitOfTime::Seconds | UnitOfTime::Minutes | UnitOfTime::Hours
        )
    }

    /// Parse either the plural or the singular name
    pub fn from_name(name: &str) -> Option<UnitOfTime> {
        let name = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str() == name || unit.singular() == name)
    }
}

impl fmt::Display for UnitOfTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings carried by relative and current window rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSettings {
    #[serde(default)]
    pub unit_of_time: UnitOfTime,
    #[serde(default)]
    pub completed: bool,
}

impl WindowSettings {
    pub fn new(unit_of_time: UnitOfTime, completed: bool) -> Self {
        Self {
            unit_of_time,
            completed,
        }
    }
}

/// The field a rule filters on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterTarget {
    pub field_id: String,
}
