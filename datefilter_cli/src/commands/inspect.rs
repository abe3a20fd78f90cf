use serde::Serialize;

use datefilter_core::units::UnitOfTimeOption;
use datefilter_core::{EditorConfig, FilterOperator, TemporalInput, classify, resolve_input};

use crate::cli::FieldArgs;
use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectReport {
    operator: FilterOperator,
    category: String,
    input: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unit_options: Vec<UnitOfTimeOption>,
}

/// Shows the edit category and input an operator gets on a field.
pub fn inspect_operator(
    operator_name: &str,
    field: &FieldArgs,
    config: EditorConfig,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Inspecting operator");

    let operator = FilterOperator::from_name(operator_name).ok_or_else(|| {
        ui::error(&format!("Unknown operator '{}'", operator_name));
        CliError::InputError
    })?;
    let field = field.descriptor();
    let input = resolve_input(operator, &field, config.start_of_week);

    let unit_options = match input {
        TemporalInput::RelativeWindow(codec) => codec.options(),
        TemporalInput::CurrentWindow(codec) => codec.options(),
        _ => Vec::new(),
    };

    let report = InspectReport {
        operator,
        category: classify(operator).to_string(),
        input: input.to_string(),
        unit_options,
    };
    ui::success(&format!("'{}' on a {} field", operator, field.field_type));

    match output_format {
        OutputFormat::Pretty => {
            ui::field("Category", &report.category);
            ui::field("Input", &report.input);
            if !report.unit_options.is_empty() {
                let labels: Vec<&str> = report
                    .unit_options
                    .iter()
                    .map(|option| option.label.as_str())
                    .collect();
                ui::field("Units", labels.join(", "));
            }
        }
        OutputFormat::Json => ui::json_output(&report),
    }

    Ok(())
}
