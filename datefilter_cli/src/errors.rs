use std::fmt;

/// Failures that end a command with a non-zero exit code. Details are
/// reported through `ui` where they happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliError {
    /// An argument could not be understood
    InputError,
    /// The rule is not a usable filter rule
    RuleError,
    /// An edit could not be applied to the rule
    EditError,
    /// A rule file could not be read
    FileError,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InputError => write!(f, "Invalid input"),
            CliError::RuleError => write!(f, "Invalid filter rule"),
            CliError::EditError => write!(f, "Edit could not be applied"),
            CliError::FileError => write!(f, "Could not read file"),
        }
    }
}

impl std::error::Error for CliError {}
