//! Temporal filter rules: deciding how a date or time operand is edited,
//! encoding edited values into the form the query system persists, and
//! keeping the two endpoints of a range in order while they are edited.
//!
//! The usual entry point is [`TemporalRuleEditor`]. The classifiers and
//! codecs it is built from are public for callers that only need one piece.

pub mod classify;
pub mod clock;
pub mod codec;
pub mod config;
pub mod editor;
pub mod field;
pub mod range;
pub mod rule;
pub mod units;

pub use classify::{EditCategory, Granularity, Precision, classify, resolve_granularity};
pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::{TemporalInput, resolve_input};
pub use config::EditorConfig;
pub use editor::{EditOutcome, TemporalRuleEditor};
pub use field::{DimensionType, FieldDescriptor};
pub use range::{RangeCoordinator, RangeEdit, RangeState};
pub use rule::{FilterOperator, FilterRule, RuleError, RuleValue, UnitOfTime, WindowSettings};
