//! Operator and granularity classification
//!
//! The two classifiers are independent: one looks only at the operator, the
//! other only at field metadata. `codec::resolve_input` combines them.

mod granularity;
mod operator;

pub use granularity::*;
pub use operator::*;
