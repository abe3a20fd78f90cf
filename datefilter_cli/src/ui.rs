//! Terminal output helpers. Status lines go to stderr so JSON on stdout
//! stays machine readable.

use std::fmt;

use clap::ValueEnum;
use console::style;
use serde::Serialize;

/// How command results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pretty => f.write_str("pretty"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

pub fn header(message: &str) {
    eprintln!("{}", style(message).bold().cyan());
}

pub fn success(message: &str) {
    eprintln!("{} {}", style("✔").green(), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow(), style(message).yellow());
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("✘").red(), style(message).red());
}

pub fn error_with_details(message: &str, details: &str) {
    error(message);
    eprintln!("  {}", style(details).dim());
}

pub fn debug(message: &str) {
    log::debug!("{}", message);
}

/// One labelled line of pretty output
pub fn field(label: &str, value: impl fmt::Display) {
    println!("{} {}", style(format!("{}:", label)).dim(), value);
}

/// Print any serializable value as pretty JSON on stdout
pub fn json_output<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => error_with_details("Failed to serialize output", &e.to_string()),
    }
}

/// Compact single-line JSON, used inside pretty output
pub fn inline_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserializable: {}>", e))
}
