//! Metadata describing the field a rule filters on

use std::fmt;

use serde::{Deserialize, Serialize};

/// The value type of a dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionType {
    String,
    Number,
    Timestamp,
    Date,
    Boolean,
}

impl fmt::Display for DimensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DimensionType::String => "string",
            DimensionType::Number => "number",
            DimensionType::Timestamp => "timestamp",
            DimensionType::Date => "date",
            DimensionType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// Field metadata supplied with every edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    #[serde(rename = "type")]
    pub field_type: DimensionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_interval: Option<String>,
}

impl FieldDescriptor {
    pub fn new(field_type: DimensionType) -> Self {
        Self {
            field_type,
            time_interval: None,
        }
    }

    pub fn with_time_interval(mut self, interval: impl Into<String>) -> Self {
        self.time_interval = Some(interval.into());
        self
    }

    /// Timestamp fields are edited at second precision
    pub fn is_timestamp(&self) -> bool {
        self.field_type == DimensionType::Timestamp
    }
}
