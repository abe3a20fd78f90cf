//! Unit-of-time choices offered by window pickers

use serde::Serialize;

use crate::rule::UnitOfTime;

/// One selectable entry in a unit-of-time picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitOfTimeOption {
    pub unit_of_time: UnitOfTime,
    pub completed: bool,
    pub label: String,
}

/// List the picker options for a field.
///
/// Date fields cannot filter below a day, so the sub-day units are only
/// offered for timestamps. Completed variants follow the plain ones.
pub fn unit_of_time_options(
    is_timestamp: bool,
    show_plural: bool,
    show_completed: bool,
) -> Vec<UnitOfTimeOption> {
    let units: Vec<UnitOfTime> = UnitOfTime::ALL
        .into_iter()
        .filter(|unit| is_timestamp || !unit.is_sub_day())
        .collect();

    let label = |unit: &UnitOfTime| {
        if show_plural {
            unit.as_str()
        } else {
            unit.singular()
        }
    };

    let mut options: Vec<UnitOfTimeOption> = units
        .iter()
        .map(|unit| UnitOfTimeOption {
            unit_of_time: *unit,
            completed: false,
            label: label(unit).to_string(),
        })
        .collect();

    if show_completed {
        options.extend(units.iter().map(|unit| UnitOfTimeOption {
            unit_of_time: *unit,
            completed: true,
            label: format!("completed {}", label(unit)),
        }));
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_field_options() {
        let options = unit_of_time_options(false, true, false);
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["days", "weeks", "months", "quarters", "years"]);
    }

    #[test]
    fn test_timestamp_field_adds_sub_day_units() {
        let options = unit_of_time_options(true, true, false);
        assert_eq!(options.len(), 9);
        assert_eq!(options[0].unit_of_time, UnitOfTime::Milliseconds);
    }

    #[test]
    fn test_completed_variants() {
        let options = unit_of_time_options(false, true, true);
        assert_eq!(options.len(), 10);
        assert!(options[5].completed);
        assert_eq!(options[5].label, "completed days");
    }

    #[test]
    fn test_singular_without_completed() {
        let options = unit_of_time_options(false, false, false);
        assert!(options.iter().all(|o| !o.completed));
        assert_eq!(options[0].label, "day");
    }
}
