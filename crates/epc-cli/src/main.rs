//! EPC stocktaking toolkit CLI.

use clap::{ColorChoice, Parser};
use epc_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod progress;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_compare, run_finalize, run_merge, run_preview, run_rename, run_sort};
use crate::summary::{
    print_compare_summary, print_finalize_summary, print_merge_summary, print_preview_summary,
    print_rename_summary, print_sort_summary, print_strategies,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Merge(args) => match run_merge(&args) {
            Ok(outcome) => {
                print_merge_summary(&outcome);
                0
            }
            Err(error) => fail(&error),
        },
        Command::Finalize(args) => match run_finalize(&args) {
            Ok(outcome) => {
                print_finalize_summary(&outcome);
                0
            }
            Err(error) => fail(&error),
        },
        Command::Compare(args) => match run_compare(&args) {
            Ok(outcome) => {
                print_compare_summary(&outcome);
                0
            }
            Err(error) => fail(&error),
        },
        Command::Preview(args) => match run_preview(&args) {
            Ok(outcome) => {
                print_preview_summary(&outcome);
                0
            }
            Err(error) => fail(&error),
        },
        Command::Sort(args) => match run_sort(&args) {
            Ok(report) => {
                print_sort_summary(&report);
                0
            }
            Err(error) => fail(&error),
        },
        Command::Rename(args) => match run_rename(&args) {
            Ok(outcome) => {
                print_rename_summary(&outcome);
                0
            }
            Err(error) => fail(&error),
        },
        Command::Strategies => {
            print_strategies();
            0
        }
    };
    std::process::exit(exit_code);
}

fn fail(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
