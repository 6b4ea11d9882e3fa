use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use marknav::cli::{Cli, Command};
use marknav::commands;
use marknav::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    // The TUI owns the terminal, so it only logs when there is a file to log to
    let in_tui = matches!(cli.command, Command::Browse(_));
    init_logging(cli.verbose, cli.quiet, in_tui, config.tui.log_file.as_deref())?;

    tracing::debug!(?config, "Loaded configuration");

    // Dispatch to subcommand
    match cli.command {
        Command::Browse(args) => {
            tracing::info!(?args, "Starting browse");
            let pick = args.pick;
            let location = commands::browse::run(args, &config)?;
            // stdout carries only the picked location, for shell wrappers
            if let Some(location) = location.filter(|_| pick) {
                println!("{}", location);
            }
        }
        Command::List(args) => {
            tracing::info!(?args, "Starting list");
            commands::list::run(args, &config)?;
        }
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "marknav", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8, quiet: bool, in_tui: bool, log_file: Option<&Path>) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "warn"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_env("MARKNAV_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("marknav={}", level)));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(filter)
                .init();
        }
        None if in_tui => {}
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    }

    Ok(())
}
