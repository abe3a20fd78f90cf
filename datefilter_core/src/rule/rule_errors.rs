//! Error types for rule handling

use std::fmt;

use super::types::FilterOperator;

/// Contract violations raised while reading or editing a rule.
///
/// Unparsable values are never reported here: they degrade to defaults.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleError {
    /// The input was never a filter rule at all
    MalformedRule { reason: String },
    /// The rule carries more operands than any operator accepts
    TooManyValues {
        operator: FilterOperator,
        count: usize,
    },
    /// An edit was issued against an input that does not accept it
    InputMismatch {
        operator: FilterOperator,
        input: String,
        edit: String,
    },
}

impl RuleError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        RuleError::MalformedRule {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::MalformedRule { reason } => {
                write!(f, "Expected a filter rule: {}", reason)
            }
            RuleError::TooManyValues { operator, count } => {
                write!(
                    f,
                    "Rule with '{}' operator has {} values, at most 2 are allowed",
                    operator, count
                )
            }
            RuleError::InputMismatch {
                operator,
                input,
                edit,
            } => {
                write!(
                    f,
                    "Cannot apply a {} edit to a '{}' rule edited as {}",
                    edit, operator, input
                )
            }
        }
    }
}

impl std::error::Error for RuleError {}
