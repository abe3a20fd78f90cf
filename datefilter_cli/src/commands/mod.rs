mod decode;
mod edit;
mod inspect;

pub use decode::decode_rule;
pub use edit::edit_rule;
pub use inspect::inspect_operator;

use std::path::Path;

use datefilter_core::FilterRule;

use crate::errors::CliError;
use crate::ui;

/// Reads a rule given inline as JSON, or from a file when prefixed with `@`.
fn load_rule(argument: &str) -> Result<FilterRule, CliError> {
    let json = match argument.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path)).map_err(|e| {
            ui::error_with_details(&format!("Failed to read '{}'", path), &e.to_string());
            CliError::FileError
        })?,
        None => argument.to_string(),
    };

    FilterRule::from_json_str(&json).map_err(|e| {
        ui::error_with_details("Failed to read filter rule", &e.to_string());
        CliError::RuleError
    })
}
