// src/exec/backend.rs

//! Pluggable runner abstraction.
//!
//! The host entry point talks to a `CommandRunner` instead of the concrete
//! [`CommandExecutor`]. This makes it easy to swap in a fake runner in tests
//! while keeping the production implementation in [`super::executor`].

use std::future::Future;
use std::pin::Pin;

use crate::exec::executor::CommandExecutor;
use crate::exec::result::ExecutionResult;
use crate::exec::spec::CommandSpec;

/// Trait abstracting how a command is executed.
///
/// Production code uses [`CommandExecutor`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait CommandRunner: Send + Sync {
    /// Run `spec` to completion and return its result.
    fn run_command(
        &self,
        spec: CommandSpec,
    ) -> Pin<Box<dyn Future<Output = ExecutionResult> + Send + '_>>;
}

impl CommandRunner for CommandExecutor {
    fn run_command(
        &self,
        spec: CommandSpec,
    ) -> Pin<Box<dyn Future<Output = ExecutionResult> + Send + '_>> {
        Box::pin(self.run(spec))
    }
}
