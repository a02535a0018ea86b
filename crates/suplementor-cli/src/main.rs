//! Supplement comparison CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use suplementor_cli::cli::{Cli, Command};
use suplementor_cli::config::Config;
use suplementor_cli::logging::{LogConfig, init_logging};
use tracing::level_filters::LevelFilter;

mod commands;
mod summary;

use crate::commands::{run_compare, run_export, run_list, run_presets, run_share};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(2);
        }
    };
    let result = match &cli.command {
        Command::List(args) => run_list(args, &config),
        Command::Export(args) => run_export(args, &config),
        Command::Compare(args) => run_compare(args, &config),
        Command::Presets(command) => run_presets(command, &config),
        Command::Share(args) => run_share(args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Explicit `--log-level` wins over `-v`/`-q`; either disables `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.verbosity.is_present() || cli.log_level.is_some();
    LogConfig {
        level_filter: cli
            .log_level
            .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from),
        use_env_filter: !explicit,
        format: cli.log_format.into(),
        log_file: cli.log_file.clone(),
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
        },
        ..LogConfig::default()
    }
}
