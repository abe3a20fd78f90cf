//! Value codecs between picker values and persisted rule operands
//!
//! `resolve_input` picks the codec for an operator and field:
//! - comparison operators get a `PointCodec` at the field's granularity
//! - `inThePast` / `inTheNext` get a `RelativeWindowCodec`
//! - `inTheCurrent` gets a `CurrentWindowCodec`
//! - `inBetween` gets a `RangeCodec` at day or second precision
//! - everything else goes down the generic, non-temporal path

pub mod format;
mod point;
mod range;
mod window;

pub use point::PointCodec;
pub use range::{RangeBounds, RangeCodec};
pub use window::{CurrentWindowCodec, RelativeWindow, RelativeWindowCodec, parse_count};

use std::fmt;

use crate::classify::{EditCategory, Precision, classify, resolve_granularity};
use crate::field::FieldDescriptor;
use crate::rule::FilterOperator;

/// The input selected for one rule on one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalInput {
    Point(PointCodec),
    RelativeWindow(RelativeWindowCodec),
    CurrentWindow(CurrentWindowCodec),
    Range(RangeCodec),
    Generic,
}

impl TemporalInput {
    pub fn category(&self) -> EditCategory {
        match self {
            TemporalInput::Point(_) => EditCategory::PointInTime,
            TemporalInput::RelativeWindow(_) => EditCategory::RelativeWindow,
            TemporalInput::CurrentWindow(_) => EditCategory::CurrentWindow,
            TemporalInput::Range(_) => EditCategory::BoundedRange,
            TemporalInput::Generic => EditCategory::Other,
        }
    }
}

impl fmt::Display for TemporalInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemporalInput::Point(codec) => write!(f, "{} picker", codec.granularity),
            TemporalInput::RelativeWindow(_) => f.write_str("count and unit of time"),
            TemporalInput::CurrentWindow(_) => f.write_str("unit of time"),
            TemporalInput::Range(codec) => write!(f, "range picker ({} precision)", codec.precision),
            TemporalInput::Generic => f.write_str("generic input"),
        }
    }
}

/// Select the input for `operator` on `field`.
///
/// Only comparison operators look at the field's time interval; ranges look
/// at whether the field is a timestamp, windows at neither.
pub fn resolve_input(
    operator: FilterOperator,
    field: &FieldDescriptor,
    start_of_week: Option<u8>,
) -> TemporalInput {
    let resolution = resolve_granularity(field, start_of_week);

    match classify(operator) {
        EditCategory::PointInTime => TemporalInput::Point(PointCodec::new(resolution)),
        EditCategory::RelativeWindow => TemporalInput::RelativeWindow(RelativeWindowCodec {
            is_timestamp: field.is_timestamp(),
        }),
        EditCategory::CurrentWindow => TemporalInput::CurrentWindow(CurrentWindowCodec {
            is_timestamp: field.is_timestamp(),
        }),
        EditCategory::BoundedRange => TemporalInput::Range(RangeCodec {
            precision: Precision::of(field),
            first_day_of_week: resolution.first_day_of_week,
        }),
        EditCategory::Other => TemporalInput::Generic,
    }
}
