use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};

use datefilter_core::codec::format::parse_timestamp;
use datefilter_core::{DimensionType, FieldDescriptor, UnitOfTime};

use super::ui::OutputFormat;

/// Defines the top-level interface for the datefilter CLI with clap.
#[derive(Parser, Debug)]
#[command(name = "datefilter")]
#[command(version, about = "Resolve and replay edits of temporal filter rules.")]
pub struct DatefilterCli {
    /// First day of the week, 0 = Monday through 6 = Sunday
    #[arg(
        short,
        long,
        global = true,
        env = "DATEFILTER_START_OF_WEEK",
        value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub start_of_week: Option<u8>,

    /// Enable verbose output?
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: DatefilterCommand,
}

/// Defines the available subcommands of the datefilter CLI.
#[derive(Subcommand, Debug, PartialEq)]
pub enum DatefilterCommand {
    /// Show how an operator is edited on a field.
    Inspect {
        /// Operator name (e.g. inThePast or inBetween)
        operator: String,
        #[command(flatten)]
        field: FieldArgs,
    },
    /// Show the picker state derived from a stored rule.
    Decode {
        /// Rule JSON, or @path to read it from a file
        rule: String,
        #[command(flatten)]
        field: FieldArgs,
    },
    /// Replay edits against a rule and print every emitted rule.
    Edit {
        /// Rule JSON, or @path to read it from a file
        rule: String,
        #[command(flatten)]
        field: FieldArgs,
        /// Edit to apply (can be repeated). Format: --set <kind>=<value>
        /// with kind one of point, count, unit, current, start, end, range
        #[arg(long = "set", value_name = "KIND=VALUE", value_parser = parse_edit)]
        edits: Vec<CliEdit>,
    },
}

/// The field a rule is edited on
#[derive(Args, Debug, Clone, PartialEq)]
pub struct FieldArgs {
    /// Dimension type of the field
    #[arg(short = 't', long = "type", value_enum)]
    pub field_type: CliDimensionType,

    /// Time interval of the field (e.g. WEEK, MONTH, YEAR)
    #[arg(short, long)]
    pub interval: Option<String>,
}

impl FieldArgs {
    pub fn descriptor(&self) -> FieldDescriptor {
        let field = FieldDescriptor::new(self.field_type.into());
        match &self.interval {
            Some(interval) => field.with_time_interval(interval.clone()),
            None => field,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliDimensionType {
    String,
    Number,
    Timestamp,
    Date,
    Boolean,
}

impl From<CliDimensionType> for DimensionType {
    fn from(value: CliDimensionType) -> Self {
        match value {
            CliDimensionType::String => DimensionType::String,
            CliDimensionType::Number => DimensionType::Number,
            CliDimensionType::Timestamp => DimensionType::Timestamp,
            CliDimensionType::Date => DimensionType::Date,
            CliDimensionType::Boolean => DimensionType::Boolean,
        }
    }
}

/// One picker edit given on the command line. An empty value or `none`
/// clears the picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CliEdit {
    Point(Option<NaiveDateTime>),
    Count(Option<u32>),
    Unit { unit: UnitOfTime, completed: bool },
    Current(UnitOfTime),
    Start(Option<NaiveDateTime>),
    End(Option<NaiveDateTime>),
    /// Both range endpoints at once, as `<start>..<end>`
    Range(Option<NaiveDateTime>, Option<NaiveDateTime>),
}

/// Parses `kind=value` into an edit.
pub fn parse_edit(input: &str) -> Result<CliEdit, String> {
    let (kind, value) = input
        .split_once('=')
        .ok_or_else(|| format!("Expected <kind>=<value>, got '{}'", input))?;
    let value = value.trim();

    match kind.trim() {
        "point" => parse_moment(value).map(CliEdit::Point),
        "start" => parse_moment(value).map(CliEdit::Start),
        "end" => parse_moment(value).map(CliEdit::End),
        "count" => parse_cleared(value, |v| {
            v.parse::<u32>()
                .map_err(|_| format!("Expected a non-negative count, got '{}'", v))
        })
        .map(CliEdit::Count),
        "unit" => {
            let (name, completed) = match value
                .strip_prefix("completed-")
                .or_else(|| value.strip_prefix("completed "))
            {
                Some(rest) => (rest, true),
                None => (value, false),
            };
            parse_unit(name).map(|unit| CliEdit::Unit { unit, completed })
        }
        "current" => parse_unit(value).map(CliEdit::Current),
        "range" => {
            let (start, end) = value
                .split_once("..")
                .ok_or_else(|| format!("Expected <start>..<end>, got '{}'", value))?;
            Ok(CliEdit::Range(
                parse_moment(start.trim())?,
                parse_moment(end.trim())?,
            ))
        }
        other => Err(format!(
            "Unknown edit '{}', expected point, count, unit, current, start, end or range",
            other
        )),
    }
}

fn parse_cleared<T>(
    value: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<Option<T>, String> {
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    parse(value).map(Some)
}

fn parse_moment(value: &str) -> Result<Option<NaiveDateTime>, String> {
    parse_cleared(value, |v| {
        parse_timestamp(v).ok_or_else(|| format!("Expected a date or timestamp, got '{}'", v))
    })
}

fn parse_unit(value: &str) -> Result<UnitOfTime, String> {
    UnitOfTime::from_name(value).ok_or_else(|| format!("Unknown unit of time '{}'", value))
}
