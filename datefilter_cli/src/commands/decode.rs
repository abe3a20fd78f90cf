use chrono::NaiveDateTime;
use serde::Serialize;

use datefilter_core::codec::format::{format_date, format_timestamp};
use datefilter_core::units::UnitOfTimeOption;
use datefilter_core::{
    EditorConfig, FilterRule, Granularity, Precision, RuleError, RuleValue, TemporalInput,
    TemporalRuleEditor, UnitOfTime,
};

use super::load_rule;
use crate::cli::FieldArgs;
use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

/// What the pickers for a rule would show
#[derive(Debug, Serialize)]
#[serde(tag = "input", rename_all = "camelCase", rename_all_fields = "camelCase")]
enum PickerState {
    Point {
        granularity: String,
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        week_start: Option<String>,
    },
    RelativeWindow {
        count: Option<u32>,
        unit_of_time: UnitOfTime,
        completed: bool,
        options: Vec<UnitOfTimeOption>,
    },
    CurrentWindow {
        unit_of_time: UnitOfTime,
        options: Vec<UnitOfTimeOption>,
    },
    Range {
        precision: String,
        start: Option<String>,
        end: Option<String>,
        start_max: Option<String>,
        end_min: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        first_day_of_week: Option<String>,
    },
    Generic {
        values: Vec<RuleValue>,
    },
}

/// Decodes a stored rule into picker state.
pub fn decode_rule(
    rule_argument: &str,
    field: &FieldArgs,
    config: EditorConfig,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Decoding rule");
    let rule = load_rule(rule_argument)?;

    let editor =
        TemporalRuleEditor::with_system_clock(rule, field.descriptor(), config, |_: FilterRule| {})
            .map_err(|e| {
                ui::error(&e.to_string());
                CliError::RuleError
            })?;

    let state = picker_state(&editor).map_err(|e| {
        ui::error(&e.to_string());
        CliError::RuleError
    })?;
    ui::success(&format!(
        "Rule '{}' is edited with {}",
        editor.rule().id,
        editor.input()
    ));
    if editor.input() == TemporalInput::Generic {
        ui::warning("Operator is not temporal, values are shown as stored");
    }

    match output_format {
        OutputFormat::Pretty => print_state(&state),
        OutputFormat::Json => ui::json_output(&state),
    }

    Ok(())
}

fn picker_state<F>(editor: &TemporalRuleEditor<F>) -> Result<PickerState, RuleError>
where
    F: FnMut(FilterRule),
{
    let state = match editor.input() {
        TemporalInput::Point(codec) => {
            let value = editor.point_value()?;
            let week_start = (codec.granularity == Granularity::Week)
                .then(|| format_date(codec.displayed_week(value)));
            let value = match codec.granularity {
                Granularity::Timestamp => format_timestamp(value),
                _ => format_date(value.date()),
            };
            PickerState::Point {
                granularity: codec.granularity.to_string(),
                value,
                week_start,
            }
        }
        TemporalInput::RelativeWindow(codec) => {
            let window = editor.relative_window()?;
            PickerState::RelativeWindow {
                count: window.count,
                unit_of_time: window.settings.unit_of_time,
                completed: window.settings.completed,
                options: codec.options(),
            }
        }
        TemporalInput::CurrentWindow(codec) => PickerState::CurrentWindow {
            unit_of_time: editor.current_window()?.unit_of_time,
            options: codec.options(),
        },
        TemporalInput::Range(codec) => {
            let range = editor.range()?;
            let bounds = range.bounds();
            let show = |value: Option<NaiveDateTime>| {
                value.map(|value| match codec.precision {
                    Precision::Day => format_date(value.date()),
                    Precision::Second => format_timestamp(value),
                })
            };
            PickerState::Range {
                precision: codec.precision.to_string(),
                start: show(range.start()),
                end: show(range.end()),
                start_max: show(bounds.start_max),
                end_min: show(bounds.end_min),
                first_day_of_week: codec.first_day_of_week.map(|day| day.to_string()),
            }
        }
        TemporalInput::Generic => PickerState::Generic {
            values: editor.rule().values.clone(),
        },
    };
    Ok(state)
}

fn print_state(state: &PickerState) {
    let unset = || "-".to_string();
    match state {
        PickerState::Point {
            granularity,
            value,
            week_start,
        } => {
            ui::field("Granularity", granularity);
            ui::field("Value", value);
            if let Some(week_start) = week_start {
                ui::field("Week of", week_start);
            }
        }
        PickerState::RelativeWindow {
            count,
            unit_of_time,
            completed,
            ..
        } => {
            ui::field("Count", count.map(|n| n.to_string()).unwrap_or_else(unset));
            ui::field("Unit", unit_of_time);
            ui::field("Completed", completed);
        }
        PickerState::CurrentWindow { unit_of_time, .. } => {
            ui::field("Unit", unit_of_time.singular());
        }
        PickerState::Range {
            precision,
            start,
            end,
            start_max,
            end_min,
            first_day_of_week,
        } => {
            ui::field("Precision", precision);
            ui::field("Start", start.clone().unwrap_or_else(unset));
            ui::field("End", end.clone().unwrap_or_else(unset));
            if let Some(start_max) = start_max {
                ui::field("Latest start", start_max);
            }
            if let Some(end_min) = end_min {
                ui::field("Earliest end", end_min);
            }
            if let Some(first_day_of_week) = first_day_of_week {
                ui::field("Weeks start on", first_day_of_week);
            }
        }
        PickerState::Generic { values } => {
            ui::field("Values", ui::inline_json(values));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datefilter_core::{DimensionType, FieldDescriptor, FilterOperator};

    fn range_state(field: FieldDescriptor, config: EditorConfig, values: &[&str]) -> PickerState {
        let rule = FilterRule::new("r1", "f", FilterOperator::InBetween)
            .with_values(values.iter().copied());
        let editor = TemporalRuleEditor::with_system_clock(rule, field, config, |_: FilterRule| {})
            .unwrap();
        picker_state(&editor).unwrap()
    }

    #[test]
    fn test_range_state_carries_week_start() {
        let state = range_state(
            FieldDescriptor::new(DimensionType::Date),
            EditorConfig::default().with_start_of_week(6),
            &["2024-01-10", "2024-01-20"],
        );

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["input"], "range");
        assert_eq!(json["start"], "2024-01-10");
        assert_eq!(json["end"], "2024-01-20");
        assert_eq!(json["startMax"], "2024-01-19");
        assert_eq!(json["endMin"], "2024-01-11");
        assert_eq!(json["firstDayOfWeek"], "Sun");
    }

    #[test]
    fn test_range_state_without_week_start() {
        let state = range_state(
            FieldDescriptor::new(DimensionType::Timestamp),
            EditorConfig::default(),
            &["2024-01-10 08:00:00"],
        );

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["precision"], "second");
        assert_eq!(json["start"], "2024-01-10 08:00:00");
        assert!(json["end"].is_null());
        assert!(json.get("firstDayOfWeek").is_none());
    }
}
