// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::CaptureMode;

/// Command-line arguments for `runcap`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "runcap",
    version,
    about = "Run a command, capture its stdout and stderr, and report how it ended.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Runcap.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Working directory for the command.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<String>,

    /// Kill the command after this long (e.g. `500ms`, `30s`, `2m`).
    ///
    /// Overrides `[exec].timeout` from the config file.
    #[arg(long, value_name = "DURATION")]
    pub timeout: Option<String>,

    /// How stdout and stderr are combined in the captured output.
    #[arg(long, value_enum, value_name = "MODE")]
    pub capture: Option<CaptureMode>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUNCAP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the resolved command and options, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Program to run (looked up on `PATH`).
    #[arg(value_name = "PROGRAM")]
    pub program: String,

    /// Arguments passed to the program verbatim.
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
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
