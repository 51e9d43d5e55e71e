// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Mailing inputs themselves come from the environment (see
//! [`crate::config::loader`]); the flags here only control how the run
//! behaves.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::exec::DEFAULT_MAILER;

/// Command-line arguments for `mailgate`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mailgate",
    version,
    about = "Validate mailing inputs from the environment, then run the mailer once.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MAILGATE_LOG`, `RUNNER_DEBUG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Validate and print the mailer command (secrets masked) as JSON,
    /// without running it.
    #[arg(long)]
    pub dry_run: bool,

    /// Mailer executable to invoke.
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_MAILER)]
    pub mailer: String,

    /// Kill the mailer and fail if it runs longer than this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl CliArgs {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
