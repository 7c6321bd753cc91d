// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running external commands, using
//! `tokio::process::Command`, and capturing what they print.
//!
//! - [`spec`] describes one invocation (`CommandSpec`).
//! - [`executor`] owns the child process: spawn, wait, optional deadline.
//! - [`drainer`] reads stdout and stderr concurrently into private buffers
//!   and provides the completion barrier the executor waits on.
//! - [`result`] holds `ExecutionResult` and the failure taxonomy.
//! - [`backend`] provides the `CommandRunner` trait, implemented by
//!   `CommandExecutor` in production and by fakes in tests.

pub mod backend;
pub mod drainer;
pub mod executor;
pub mod result;
pub mod spec;

pub use backend::CommandRunner;
pub use executor::{CommandExecutor, ExecOptions};
pub use result::{ExecutionResult, FailureKind, WaitOutcome};
pub use spec::CommandSpec;
