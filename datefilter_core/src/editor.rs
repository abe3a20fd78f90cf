//! Editing session for one filter rule
//!
//! The session resolves the input once, then turns picker edits into
//! replacement rules delivered through the caller's callback. The callback
//! fires exactly once for every `EditOutcome::Emitted` and never otherwise.

use chrono::NaiveDateTime;
use log::debug;

use crate::clock::{Clock, SystemClock};
use crate::codec::{RelativeWindow, TemporalInput, resolve_input};
use crate::config::EditorConfig;
use crate::field::FieldDescriptor;
use crate::range::{RangeCoordinator, RangeEdit};
use crate::rule::{FilterRule, RuleError, RuleValue, UnitOfTime, WindowSettings};

/// What happened to a single edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// A replacement rule was handed to the callback
    Emitted,
    /// Accepted locally, waiting for the other range endpoint
    Buffered,
    /// Would have broken the range ordering
    Rejected,
    /// Nothing to apply
    Ignored,
}

/// Edits one rule on one field
pub struct TemporalRuleEditor<F, C = SystemClock>
where
    F: FnMut(FilterRule),
    C: Clock,
{
    rule: FilterRule,
    field: FieldDescriptor,
    config: EditorConfig,
    input: TemporalInput,
    range: Option<RangeCoordinator>,
    clock: C,
    on_change: F,
}

impl<F, C> std::fmt::Debug for TemporalRuleEditor<F, C>
where
    F: FnMut(FilterRule),
    C: Clock + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemporalRuleEditor")
            .field("rule", &self.rule)
            .field("field", &self.field)
            .field("config", &self.config)
            .field("input", &self.input)
            .field("range", &self.range)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl<F> TemporalRuleEditor<F, SystemClock>
where
    F: FnMut(FilterRule),
{
    /// Start a session using the wall clock for "now"
    pub fn with_system_clock(
        rule: FilterRule,
        field: FieldDescriptor,
        config: EditorConfig,
        on_change: F,
    ) -> Result<Self, RuleError> {
        Self::new(rule, field, config, SystemClock, on_change)
    }
}

impl<F, C> TemporalRuleEditor<F, C>
where
    F: FnMut(FilterRule),
    C: Clock,
{
    pub fn new(
        rule: FilterRule,
        field: FieldDescriptor,
        config: EditorConfig,
        clock: C,
        on_change: F,
    ) -> Result<Self, RuleError> {
        rule.validate()?;

        let input = resolve_input(rule.operator, &field, config.start_of_week);
        let range = range_for(input, &rule);
        debug!(
            "Editing rule '{}' ({} on {} field) with {}",
            rule.id, rule.operator, field.field_type, input
        );

        Ok(Self {
            rule,
            field,
            config,
            input,
            range,
            clock,
            on_change,
        })
    }

    pub fn input(&self) -> TemporalInput {
        self.input
    }

    /// The rule as last emitted or synced
    pub fn rule(&self) -> &FilterRule {
        &self.rule
    }

    pub fn field(&self) -> &FieldDescriptor {
        &self.field
    }

    /// Value the point picker shows
    pub fn point_value(&self) -> Result<NaiveDateTime, RuleError> {
        match self.input {
            TemporalInput::Point(codec) => Ok(codec.decode(&self.rule, self.clock.now())),
            _ => Err(self.mismatch("point-in-time")),
        }
    }

    pub fn relative_window(&self) -> Result<RelativeWindow, RuleError> {
        match self.input {
            TemporalInput::RelativeWindow(codec) => Ok(codec.decode(&self.rule)),
            _ => Err(self.mismatch("relative window")),
        }
    }

    pub fn current_window(&self) -> Result<WindowSettings, RuleError> {
        match self.input {
            TemporalInput::CurrentWindow(codec) => Ok(codec.decode(&self.rule)),
            _ => Err(self.mismatch("current window")),
        }
    }

    /// The range buffer, including endpoints the caller has not seen yet
    pub fn range(&self) -> Result<&RangeCoordinator, RuleError> {
        self.range.as_ref().ok_or_else(|| self.mismatch("range"))
    }

    pub fn set_point(&mut self, value: Option<NaiveDateTime>) -> Result<EditOutcome, RuleError> {
        let TemporalInput::Point(codec) = self.input else {
            return Err(self.mismatch("point-in-time"));
        };

        Ok(match codec.apply(&self.rule, value) {
            Some(updated) => self.emit(updated),
            None => EditOutcome::Ignored,
        })
    }

    pub fn set_count(&mut self, count: Option<u32>) -> Result<EditOutcome, RuleError> {
        let TemporalInput::RelativeWindow(codec) = self.input else {
            return Err(self.mismatch("window count"));
        };

        let updated = codec.apply_count(&self.rule, count);
        Ok(self.emit(updated))
    }

    pub fn set_window_unit(
        &mut self,
        unit: UnitOfTime,
        completed: bool,
    ) -> Result<EditOutcome, RuleError> {
        let TemporalInput::RelativeWindow(codec) = self.input else {
            return Err(self.mismatch("window unit"));
        };

        let updated = codec.apply_unit(&self.rule, unit, completed);
        Ok(self.emit(updated))
    }

    pub fn set_current_unit(&mut self, unit: UnitOfTime) -> Result<EditOutcome, RuleError> {
        let TemporalInput::CurrentWindow(codec) = self.input else {
            return Err(self.mismatch("current unit"));
        };

        let updated = codec.apply(&self.rule, unit);
        Ok(self.emit(updated))
    }

    pub fn set_range_start(
        &mut self,
        value: Option<NaiveDateTime>,
    ) -> Result<EditOutcome, RuleError> {
        let edit = self.range_mut("range start")?.edit_start(value);
        Ok(self.settle_range(edit))
    }

    pub fn set_range_end(&mut self, value: Option<NaiveDateTime>) -> Result<EditOutcome, RuleError> {
        let edit = self.range_mut("range end")?.edit_end(value);
        Ok(self.settle_range(edit))
    }

    /// Both endpoints at once, as reported by a single range picker. Date
    /// ranges with one side set are emitted as half-open ranges.
    pub fn set_range(
        &mut self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<EditOutcome, RuleError> {
        let edit = self.range_mut("range")?.edit_pair(start, end);
        Ok(self.settle_range(edit))
    }

    /// Non-temporal operators keep whatever the generic input produced
    pub fn set_generic_values(&mut self, values: Vec<RuleValue>) -> Result<EditOutcome, RuleError> {
        if self.input != TemporalInput::Generic {
            return Err(self.mismatch("generic"));
        }

        let mut updated = self.rule.clone();
        updated.values = values;
        Ok(self.emit(updated))
    }

    /// Adopt a rule replaced by the caller, e.g. after a reset or an
    /// operator change. The range buffer is re-seeded from it.
    pub fn sync(&mut self, rule: FilterRule) -> Result<(), RuleError> {
        rule.validate()?;

        if rule.operator != self.rule.operator {
            self.input = resolve_input(rule.operator, &self.field, self.config.start_of_week);
            self.range = range_for(self.input, &rule);
        } else if let Some(range) = self.range.as_mut() {
            range.sync(&rule);
        }

        self.rule = rule;
        Ok(())
    }

    fn range_mut(&mut self, edit: &str) -> Result<&mut RangeCoordinator, RuleError> {
        let error = self.mismatch(edit);
        self.range.as_mut().ok_or(error)
    }

    fn settle_range(&mut self, edit: RangeEdit) -> EditOutcome {
        match edit {
            RangeEdit::Complete { start, end } => {
                let Some(range) = self.range.as_ref() else {
                    return EditOutcome::Ignored;
                };
                let updated = range.codec().apply(&self.rule, start, end);
                self.emit(updated)
            }
            RangeEdit::Open { start, end } => {
                let Some(range) = self.range.as_ref() else {
                    return EditOutcome::Ignored;
                };
                let updated = range.codec().apply_open(&self.rule, start, end);
                self.emit(updated)
            }
            RangeEdit::Buffered(_) => EditOutcome::Buffered,
            RangeEdit::Rejected => EditOutcome::Rejected,
            RangeEdit::Ignored => EditOutcome::Ignored,
        }
    }

    fn emit(&mut self, updated: FilterRule) -> EditOutcome {
        debug!("Rule '{}' updated to {:?}", updated.id, updated.values);
        self.rule = updated.clone();
        (self.on_change)(updated);
        EditOutcome::Emitted
    }

    fn mismatch(&self, edit: &str) -> RuleError {
        RuleError::InputMismatch {
            operator: self.rule.operator,
            input: self.input.to_string(),
            edit: edit.to_string(),
        }
    }
}

fn range_for(input: TemporalInput, rule: &FilterRule) -> Option<RangeCoordinator> {
    match input {
        TemporalInput::Range(codec) => Some(RangeCoordinator::new(codec, rule)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::field::DimensionType;
    use crate::rule::FilterOperator;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(day(2026, 10, 18))
    }

    #[test]
    fn test_mismatched_edit_is_an_error() {
        let rule = FilterRule::new("r1", "f", FilterOperator::Equals);
        let mut editor = TemporalRuleEditor::new(
            rule,
            FieldDescriptor::new(DimensionType::Date),
            EditorConfig::default(),
            clock(),
            |_| panic!("no emission expected"),
        )
        .unwrap();

        assert_matches!(
            editor.set_count(Some(3)),
            Err(RuleError::InputMismatch { operator: FilterOperator::Equals, .. })
        );
        assert_matches!(editor.range(), Err(RuleError::InputMismatch { .. }));
    }

    #[test]
    fn test_invalid_rule_is_refused() {
        let rule = FilterRule::new("r1", "f", FilterOperator::InBetween)
            .with_values(["2024-01-01", "2024-01-02", "2024-01-03"]);
        let result = TemporalRuleEditor::new(
            rule,
            FieldDescriptor::new(DimensionType::Date),
            EditorConfig::default(),
            clock(),
            |_| {},
        );
        assert_matches!(result, Err(RuleError::TooManyValues { .. }));
    }

    #[test]
    fn test_point_value_defaults_to_today() {
        let rule = FilterRule::new("r1", "f", FilterOperator::LessThan);
        let editor = TemporalRuleEditor::new(
            rule,
            FieldDescriptor::new(DimensionType::Date),
            EditorConfig::default(),
            clock(),
            |_| {},
        )
        .unwrap();
        assert_eq!(editor.point_value().unwrap(), day(2026, 10, 18));
    }

    #[test]
    fn test_sync_switches_input_on_operator_change() {
        let rule = FilterRule::new("r1", "f", FilterOperator::Equals);
        let mut editor = TemporalRuleEditor::new(
            rule,
            FieldDescriptor::new(DimensionType::Date),
            EditorConfig::default(),
            clock(),
            |_| {},
        )
        .unwrap();

        editor
            .sync(
                FilterRule::new("r1", "f", FilterOperator::InBetween)
                    .with_values(["2024-01-10"]),
            )
            .unwrap();

        assert_matches!(editor.input(), TemporalInput::Range(_));
        assert_eq!(editor.range().unwrap().start(), Some(day(2024, 1, 10)));
    }

    #[test]
    fn test_generic_values_pass_through() {
        let mut emitted = Vec::new();
        {
            let rule = FilterRule::new("r1", "f", FilterOperator::IsNull);
            let mut editor = TemporalRuleEditor::new(
                rule,
                FieldDescriptor::new(DimensionType::Date),
                EditorConfig::default(),
                clock(),
                |rule| emitted.push(rule),
            )
            .unwrap();
            assert_eq!(
                editor.set_generic_values(vec![RuleValue::from("x")]).unwrap(),
                EditOutcome::Emitted
            );
        }
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].values, vec![RuleValue::from("x")]);
    }
}
