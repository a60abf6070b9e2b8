//! Elimu Online command line driver.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use elimu_cli::logging::{LogConfig, LogFormat, init_logging};
use elimu_cli::settings::{Settings, load_settings};
use elimu_nav::Resolution;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    Session, run_browse, run_config, run_login, run_logout, run_paid, run_pay, run_register,
    run_resolve, run_resources, run_routes, run_whoami,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let saved = load_settings();
    let settings = with_overrides(saved.clone(), &cli);

    let result = match cli.command {
        Command::Routes => run_routes().map(|()| 0),
        Command::Resolve(args) => {
            run_resolve(&args, &settings).map(|all_matched| if all_matched { 0 } else { 1 })
        }
        Command::Config(args) => run_config(args, saved).map(|()| 0),
        command => Session::open(settings).and_then(|session| match command {
            Command::Browse(args) => run_browse(&args, &session).map(|resolution| match resolution {
                Resolution::Matched(_) => 0,
                Resolution::NotFound | Resolution::Failed => 1,
            }),
            Command::Resources(args) => run_resources(&args, &session).map(|()| 0),
            Command::Register(args) => run_register(args, &session).map(|()| 0),
            Command::Login(args) => run_login(args, &session).map(|()| 0),
            Command::Logout => run_logout(&session).map(|()| 0),
            Command::Whoami => run_whoami(&session).map(|()| 0),
            Command::Paid(args) => run_paid(&args, &session).map(|()| 0),
            Command::Pay(args) => run_pay(&args, &session).map(|()| 0),
            Command::Routes | Command::Resolve(_) | Command::Config(_) => Ok(0),
        }),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            tracing::debug!("{error:?}");
            eprintln!("error: {error}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Apply `--host` and `--api-url` for this run only.
fn with_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(host) = &cli.host {
        settings.host.clone_from(host);
    }
    if let Some(url) = &cli.api_url {
        settings.base_url = Some(url.clone());
    }
    settings
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
