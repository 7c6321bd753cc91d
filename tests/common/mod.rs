#![allow(dead_code)]

pub use runcap_test_utils::init_tracing;
pub use runcap_test_utils::scripts::{numbered_lines, sh, write_bytes};

use std::time::Duration;

use runcap::exec::{CommandExecutor, ExecOptions};
use runcap::types::CaptureMode;

/// Executor with default options (completion order, no deadline).
pub fn executor() -> CommandExecutor {
    CommandExecutor::default()
}

pub fn interleaved_executor() -> CommandExecutor {
    CommandExecutor::new(ExecOptions {
        capture: CaptureMode::Interleaved,
        ..ExecOptions::default()
    })
}

pub fn executor_with_timeout(timeout: Duration, drain_grace: Duration) -> CommandExecutor {
    CommandExecutor::new(ExecOptions {
        timeout: Some(timeout),
        drain_grace,
        ..ExecOptions::default()
    })
}
