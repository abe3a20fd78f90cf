//! Configuration supplied by the host application

use serde::{Deserialize, Serialize};

/// Settings that apply to every rule edited in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Configured first day of the week, 0 = Monday through 6 = Sunday.
    /// Out-of-range values are ignored.
    #[serde(default)]
    pub start_of_week: Option<u8>,
}

impl EditorConfig {
    pub fn with_start_of_week(mut self, start_of_week: u8) -> Self {
        self.start_of_week = Some(start_of_week);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let config: EditorConfig = serde_json::from_str(r#"{"startOfWeek":6}"#).unwrap();
        assert_eq!(config, EditorConfig::default().with_start_of_week(6));

        let config: EditorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.start_of_week, None);
    }
}
