//! Filter rules as persisted by the query system

mod rule_errors;
mod types;

pub use rule_errors::RuleError;
pub use types::*;

use serde::{Deserialize, Deserializer, Serialize};

use crate::classify::{EditCategory, classify};

/// Keys every filter rule must carry
const REQUIRED_KEYS: [&str; 3] = ["id", "target", "operator"];

/// The most operands a temporal operator takes
pub const MAX_VALUES: usize = 2;

/// A single user-authored condition on a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRule {
    pub id: String,
    pub target: FilterTarget,
    pub operator: FilterOperator,
    #[serde(default, deserialize_with = "nullable_values")]
    pub values: Vec<RuleValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<WindowSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

impl FilterRule {
    /// Create an empty rule on a field
    pub fn new(id: impl Into<String>, field_id: impl Into<String>, operator: FilterOperator) -> Self {
        Self {
            id: id.into(),
            target: FilterTarget {
                field_id: field_id.into(),
            },
            operator,
            values: Vec::new(),
            settings: None,
            disabled: None,
        }
    }

    pub fn with_values<V: Into<RuleValue>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_settings(mut self, settings: WindowSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// The operand at `index`, treating `null` as absent
    pub fn value(&self, index: usize) -> Option<&RuleValue> {
        self.values.get(index).filter(|value| !value.is_null())
    }

    /// Read a rule from untyped JSON.
    ///
    /// Anything that is not shaped like a filter rule is a caller bug and is
    /// reported as `MalformedRule`; bad operand contents are left for the
    /// codecs to degrade.
    pub fn from_json(value: serde_json::Value) -> Result<Self, RuleError> {
        let object = value
            .as_object()
            .ok_or_else(|| RuleError::malformed("not a JSON object"))?;

        for key in REQUIRED_KEYS {
            if !object.contains_key(key) {
                return Err(RuleError::malformed(format!("missing '{}'", key)));
            }
        }

        let rule: FilterRule =
            serde_json::from_value(value).map_err(|e| RuleError::malformed(e.to_string()))?;
        rule.validate()?;
        Ok(rule)
    }

    /// Parse a rule from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, RuleError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| RuleError::malformed(e.to_string()))?;
        Self::from_json(value)
    }

    /// Check the structural invariants of the rule. Operand counts are only
    /// bounded for temporal operators.
    pub fn validate(&self) -> Result<(), RuleError> {
        let temporal = classify(self.operator) != EditCategory::Other;
        if temporal && self.values.len() > MAX_VALUES {
            return Err(RuleError::TooManyValues {
                operator: self.operator,
                count: self.values.len(),
            });
        }
        Ok(())
    }
}

fn nullable_values<'de, D>(deserializer: D) -> Result<Vec<RuleValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<RuleValue>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_from_json_full_rule() {
        let rule = FilterRule::from_json(json!({
            "id": "r1",
            "target": { "fieldId": "orders_created_day" },
            "operator": "inThePast",
            "values": [3],
            "settings": { "unitOfTime": "weeks", "completed": true }
        }))
        .unwrap();

        assert_eq!(rule.operator, FilterOperator::InThePast);
        assert_eq!(rule.values, vec![RuleValue::Integer(3)]);
        assert_eq!(
            rule.settings,
            Some(WindowSettings::new(UnitOfTime::Weeks, true))
        );
    }

    #[test]
    fn test_from_json_missing_values_is_empty() {
        let rule = FilterRule::from_json(json!({
            "id": "r1",
            "target": { "fieldId": "f" },
            "operator": "equals",
            "values": null
        }))
        .unwrap();
        assert!(rule.values.is_empty());
        assert!(rule.settings.is_none());
    }

    #[test]
    fn test_from_json_not_an_object() {
        let result = FilterRule::from_json(json!(["equals", "2024-01-01"]));
        assert_matches!(result, Err(RuleError::MalformedRule { .. }));
    }

    #[test]
    fn test_from_json_missing_operator() {
        let result = FilterRule::from_json(json!({
            "id": "r1",
            "target": { "fieldId": "f" },
            "values": []
        }));
        assert_matches!(result, Err(RuleError::MalformedRule { reason }) if reason.contains("operator"));
    }

    #[test]
    fn test_from_json_requires_id_and_target() {
        let result = FilterRule::from_json(json!({
            "operator": "inBetween",
            "values": ["2024-01-10", "2024-01-20"]
        }));
        assert_matches!(result, Err(RuleError::MalformedRule { reason }) if reason.contains("id"));

        let result = FilterRule::from_json(json!({
            "id": "r1",
            "operator": "inBetween",
            "values": []
        }));
        assert_matches!(result, Err(RuleError::MalformedRule { reason }) if reason.contains("target"));
    }

    #[test]
    fn test_from_json_values_not_array() {
        let result = FilterRule::from_json(json!({
            "id": "r1",
            "target": { "fieldId": "f" },
            "operator": "equals",
            "values": "2024-01-01"
        }));
        assert_matches!(result, Err(RuleError::MalformedRule { .. }));
    }

    #[test]
    fn test_from_json_too_many_values() {
        let result = FilterRule::from_json(json!({
            "id": "r1",
            "target": { "fieldId": "f" },
            "operator": "inBetween",
            "values": ["2024-01-01", "2024-01-02", "2024-01-03"]
        }));
        assert_matches!(
            result,
            Err(RuleError::TooManyValues {
                operator: FilterOperator::InBetween,
                count: 3
            })
        );
    }

    #[test]
    fn test_generic_operators_are_not_bounded() {
        let rule = FilterRule::new("r1", "f", FilterOperator::Include)
            .with_values(["a", "b", "c"]);
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn test_value_skips_null() {
        let rule = FilterRule::new("r1", "f", FilterOperator::InBetween)
            .with_values([RuleValue::Null, RuleValue::from("2024-01-20")]);
        assert!(rule.value(0).is_none());
        assert_eq!(rule.value(1), Some(&RuleValue::from("2024-01-20")));
        assert!(rule.value(2).is_none());
    }

    #[test]
    fn test_serialize_shape() {
        let rule = FilterRule::new("r1", "f", FilterOperator::InTheCurrent)
            .with_settings(WindowSettings::new(UnitOfTime::Months, false));
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "r1",
                "target": { "fieldId": "f" },
                "operator": "inTheCurrent",
                "values": [],
                "settings": { "unitOfTime": "months", "completed": false }
            })
        );
    }
}
