// src/host.rs

//! Synchronous entry point for script hosts.
//!
//! A host creates one [`ExecModule`] per virtual user / interpreter instance
//! and calls [`ExecModule::command`] once per script-level command. Each call
//! blocks until the process has exited and its output has been drained.
//!
//! The module owns a current-thread Tokio runtime, so it must be called from
//! plain synchronous code, not from inside another async runtime.

use std::path::PathBuf;

use serde::Deserialize;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::errors::Result;
use crate::exec::{CommandExecutor, CommandRunner, CommandSpec, ExecOptions, ExecutionResult};

/// Per-call options as passed by the script.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandOptions {
    /// Working directory; `None` or an empty string inherits the host's.
    #[serde(default)]
    pub dir: Option<String>,
}

impl CommandOptions {
    pub fn in_dir(dir: impl Into<String>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }
}

pub struct ExecModule<R = CommandExecutor> {
    runner: R,
    runtime: Runtime,
}

impl ExecModule<CommandExecutor> {
    pub fn new() -> Result<Self> {
        Self::with_options(ExecOptions::default())
    }

    pub fn with_options(options: ExecOptions) -> Result<Self> {
        Self::with_runner(CommandExecutor::new(options))
    }
}

impl<R: CommandRunner> ExecModule<R> {
    pub fn with_runner(runner: R) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { runner, runtime })
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run `name` with `args` and return its combined output.
    ///
    /// Failures are not raised: a process that could not be started
    /// yields an empty string; any other failure yields whatever output was
    /// captured.
    pub fn command<I, S>(&self, name: &str, args: I, options: &CommandOptions) -> String
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let result = self.command_result(name, args, options);
        // The executor already logged the failure at warn.
        if let Some(ref detail) = result.error_detail {
            debug!(
                program = %name,
                failure = %result.failure,
                exit_code = ?result.exit_code,
                "command failed: {detail}"
            );
        }
        result.into_output()
    }

    /// Like [`ExecModule::command`], but returns the full result.
    pub fn command_result<I, S>(
        &self,
        name: &str,
        args: I,
        options: &CommandOptions,
    ) -> ExecutionResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut spec = CommandSpec::new(name).args(args);
        if let Some(ref dir) = options.dir {
            spec = spec.current_dir(PathBuf::from(dir));
        }

        self.runtime.block_on(self.runner.run_command(spec))
    }
}
