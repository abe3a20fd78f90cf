//! Operator classification

use std::fmt;

use crate::rule::FilterOperator;

/// The kind of temporal input an operator is edited with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditCategory {
    /// A single calendar value compared against the field
    PointInTime,
    /// "In the past/next N units"
    RelativeWindow,
    /// "In the current unit"
    CurrentWindow,
    /// Two ordered endpoints
    BoundedRange,
    /// Not temporal, handled by the generic input path
    Other,
}

impl fmt::Display for EditCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditCategory::PointInTime => "point-in-time",
            EditCategory::RelativeWindow => "relative window",
            EditCategory::CurrentWindow => "current window",
            EditCategory::BoundedRange => "bounded range",
            EditCategory::Other => "other",
        };
        f.write_str(name)
    }
}

/// Map an operator to its edit category
pub fn classify(operator: FilterOperator) -> EditCategory {
    match operator {
        FilterOperator::Equals
        | FilterOperator::NotEquals
        | FilterOperator::GreaterThan
        | FilterOperator::GreaterThanOrEqual
        | FilterOperator::LessThan
        | FilterOperator::LessThanOrEqual => EditCategory::PointInTime,
        FilterOperator::InThePast | FilterOperator::InTheNext => EditCategory::RelativeWindow,
        FilterOperator::InTheCurrent => EditCategory::CurrentWindow,
        FilterOperator::InBetween => EditCategory::BoundedRange,
        _ => EditCategory::Other,
    }
}
