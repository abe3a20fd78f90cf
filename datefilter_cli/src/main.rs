mod cli;
mod commands;
mod errors;
mod ui;

use std::process::ExitCode;

use clap::Parser;
use datefilter_core::EditorConfig;

use cli::{DatefilterCli, DatefilterCommand};

fn main() -> ExitCode {
    let cli = DatefilterCli::parse();
    initialize_logging(cli.verbose);

    let config = EditorConfig {
        start_of_week: cli.start_of_week,
    };

    let result = match &cli.command {
        DatefilterCommand::Inspect { operator, field } => {
            commands::inspect_operator(operator, field, config, cli.format)
        }
        DatefilterCommand::Decode { rule, field } => {
            commands::decode_rule(rule, field, config, cli.format)
        }
        DatefilterCommand::Edit { rule, field, edits } => {
            commands::edit_rule(rule, field, config, edits, cli.format)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Command failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn initialize_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::from_default_env();
    builder
        .filter_level(level)
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();
}
