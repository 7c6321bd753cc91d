// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod host;
pub mod logging;
pub mod types;

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{load_or_default, parse_duration};
use crate::errors::{Result, RuncapError};
use crate::exec::{CommandExecutor, CommandSpec, ExecOptions, ExecutionResult, FailureKind};

/// Exit code reported when the program could not be started (shell convention).
pub const EXIT_SPAWN_FAILED: i32 = 127;

/// Exit code reported when waiting failed or the deadline was hit.
pub const EXIT_WAIT_FAILED: i32 = 1;

/// High-level entry point used by `main.rs`.
///
/// Resolves config + CLI overrides, runs the command, writes the captured
/// output to stdout and returns the exit code `runcap` should exit with.
pub async fn run(args: CliArgs) -> Result<i32> {
    let cfg = load_or_default(args.config.as_deref().map(Path::new))?;
    let options = apply_cli_overrides(cfg.exec, &args)?;

    let mut spec = CommandSpec::new(args.program.as_str()).args(args.args.iter().cloned());
    if let Some(ref dir) = args.dir {
        spec = spec.current_dir(dir);
    }

    if args.dry_run {
        print_dry_run(&spec, &options);
        return Ok(0);
    }

    let executor = CommandExecutor::new(options);
    let result = executor.run(spec).await;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(result.combined_output.as_bytes())?;
    stdout.flush()?;

    if let Some(ref detail) = result.error_detail {
        eprintln!("runcap: {detail}");
    }

    Ok(exit_code_for(&result))
}

/// Layer CLI flags on top of the config file's `[exec]` options.
pub fn apply_cli_overrides(mut options: ExecOptions, args: &CliArgs) -> Result<ExecOptions> {
    if let Some(capture) = args.capture {
        options.capture = capture;
    }

    if let Some(ref raw) = args.timeout {
        let timeout = parse_duration(raw)?;
        if timeout.is_zero() {
            return Err(RuncapError::ConfigError(
                "--timeout must be greater than zero".to_string(),
            ));
        }
        options.timeout = Some(timeout);
    }

    Ok(options)
}

/// Map an invocation result to the exit code of the `runcap` process.
pub fn exit_code_for(result: &ExecutionResult) -> i32 {
    if result.is_spawn_failure() {
        return EXIT_SPAWN_FAILED;
    }

    match result.failure {
        FailureKind::None => 0,
        FailureKind::NonZeroExit => result.exit_code.unwrap_or(EXIT_WAIT_FAILED),
        FailureKind::SpawnFailed | FailureKind::WaitFailed => EXIT_WAIT_FAILED,
    }
}

/// Simple dry-run output: print the command and the effective options.
fn print_dry_run(spec: &CommandSpec, options: &ExecOptions) {
    println!("runcap dry-run");
    println!("  program: {}", spec.program);
    if !spec.args.is_empty() {
        println!("  args: {:?}", spec.args);
    }
    match spec.working_dir {
        Some(ref dir) => println!("  dir: {}", dir.display()),
        None => println!("  dir: (inherited)"),
    }
    println!("  capture: {:?}", options.capture);
    match options.timeout {
        Some(t) => println!("  timeout: {t:?}"),
        None => println!("  timeout: none"),
    }
    println!("  drain_grace: {:?}", options.drain_grace);

    debug!("dry-run complete (no execution)");
}
