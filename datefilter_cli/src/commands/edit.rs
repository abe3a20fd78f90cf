use std::cell::RefCell;

use serde::Serialize;

use datefilter_core::codec::format::format_timestamp;
use datefilter_core::{EditOutcome, EditorConfig, FilterRule, RuleError, TemporalRuleEditor};

use super::load_rule;
use crate::cli::{CliEdit, FieldArgs};
use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

#[derive(Debug, Serialize)]
struct EditStep {
    edit: String,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    emitted: Option<FilterRule>,
}

#[derive(Debug, Serialize)]
struct EditReport {
    steps: Vec<EditStep>,
    rule: FilterRule,
}

/// Replays edits through an editing session and reports each outcome.
pub fn edit_rule(
    rule_argument: &str,
    field: &FieldArgs,
    config: EditorConfig,
    edits: &[CliEdit],
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Replaying edits");
    let rule = load_rule(rule_argument)?;

    let emitted = RefCell::new(Vec::new());
    let mut editor = TemporalRuleEditor::with_system_clock(
        rule,
        field.descriptor(),
        config,
        |rule: FilterRule| emitted.borrow_mut().push(rule),
    )
    .map_err(|e| {
        ui::error(&e.to_string());
        CliError::RuleError
    })?;
    ui::debug(&format!("Editing with {}", editor.input()));

    let mut steps = Vec::with_capacity(edits.len());
    for edit in edits {
        let outcome = apply_edit(&mut editor, *edit).map_err(|e| {
            ui::error_with_details(&format!("Failed to apply {}", describe(edit)), &e.to_string());
            CliError::EditError
        })?;

        let emitted_rule = match outcome {
            EditOutcome::Emitted => emitted.borrow().last().cloned(),
            _ => None,
        };
        steps.push(EditStep {
            edit: describe(edit),
            outcome: outcome_label(outcome),
            emitted: emitted_rule,
        });
    }

    let report = EditReport {
        steps,
        rule: editor.rule().clone(),
    };
    let emitted_count = emitted.borrow().len();
    ui::success(&format!(
        "Applied {} edits, {} rules emitted",
        edits.len(),
        emitted_count
    ));

    match output_format {
        OutputFormat::Pretty => print_report(&report),
        OutputFormat::Json => ui::json_output(&report),
    }

    Ok(())
}

fn apply_edit<F>(editor: &mut TemporalRuleEditor<F>, edit: CliEdit) -> Result<EditOutcome, RuleError>
where
    F: FnMut(FilterRule),
{
    match edit {
        CliEdit::Point(value) => editor.set_point(value),
        CliEdit::Count(count) => editor.set_count(count),
        CliEdit::Unit { unit, completed } => editor.set_window_unit(unit, completed),
        CliEdit::Current(unit) => editor.set_current_unit(unit),
        CliEdit::Start(value) => editor.set_range_start(value),
        CliEdit::End(value) => editor.set_range_end(value),
        CliEdit::Range(start, end) => editor.set_range(start, end),
    }
}

fn describe(edit: &CliEdit) -> String {
    let moment = |value: &Option<chrono::NaiveDateTime>| {
        value.map(format_timestamp).unwrap_or_else(|| "none".to_string())
    };
    match edit {
        CliEdit::Point(value) => format!("point={}", moment(value)),
        CliEdit::Count(count) => format!(
            "count={}",
            count.map(|n| n.to_string()).unwrap_or_else(|| "none".to_string())
        ),
        CliEdit::Unit { unit, completed: true } => format!("unit=completed-{}", unit),
        CliEdit::Unit { unit, .. } => format!("unit={}", unit),
        CliEdit::Current(unit) => format!("current={}", unit.singular()),
        CliEdit::Start(value) => format!("start={}", moment(value)),
        CliEdit::End(value) => format!("end={}", moment(value)),
        CliEdit::Range(start, end) => format!("range={}..{}", moment(start), moment(end)),
    }
}

fn outcome_label(outcome: EditOutcome) -> &'static str {
    match outcome {
        EditOutcome::Emitted => "emitted",
        EditOutcome::Buffered => "buffered",
        EditOutcome::Rejected => "rejected",
        EditOutcome::Ignored => "ignored",
    }
}

fn print_report(report: &EditReport) {
    for step in &report.steps {
        let outcome = match step.outcome {
            "emitted" => console::style(step.outcome).green(),
            "rejected" => console::style(step.outcome).red(),
            _ => console::style(step.outcome).yellow(),
        };
        println!("{} -> {}", step.edit, outcome);
        if let Some(rule) = &step.emitted {
            println!("  {}", ui::inline_json(rule));
        }
    }
    ui::field("Rule", ui::inline_json(&report.rule));
}
