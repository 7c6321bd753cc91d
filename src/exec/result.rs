// src/exec/result.rs

use std::fmt;
use std::process::ExitStatus;
use std::time::Duration;

/// Why an invocation did not complete cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureKind {
    /// Process ran and exited with status 0.
    #[default]
    None,
    /// The process could not be started; no output exists.
    SpawnFailed,
    /// Waiting failed, the process was killed by a signal or ran past its
    /// deadline. Output holds whatever was drained.
    WaitFailed,
    /// The process exited on its own with a non-zero status.
    NonZeroExit,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::None => "none",
            FailureKind::SpawnFailed => "spawn_failed",
            FailureKind::WaitFailed => "wait_failed",
            FailureKind::NonZeroExit => "non_zero_exit",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the wait for the child process ended.
#[derive(Debug)]
pub enum WaitOutcome {
    Exited(ExitStatus),
    TimedOut(Duration),
    WaitError(String),
}

/// Outcome of one command invocation, handed to the caller exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionResult {
    /// Captured stdout and stderr text (see `CaptureMode` for ordering).
    pub combined_output: String,

    /// Exit status, present whenever the process exited on its own.
    pub exit_code: Option<i32>,

    pub failure: FailureKind,

    /// Human-readable diagnostic, set whenever `failure` is not `None`.
    pub error_detail: Option<String>,
}

impl ExecutionResult {
    pub fn spawn_failed(detail: impl Into<String>) -> Self {
        Self {
            combined_output: String::new(),
            exit_code: None,
            failure: FailureKind::SpawnFailed,
            error_detail: Some(detail.into()),
        }
    }

    /// Build the result from the wait outcome and the drained text.
    pub fn from_wait(outcome: WaitOutcome, combined_output: String) -> Self {
        let (exit_code, failure, error_detail) = match outcome {
            WaitOutcome::Exited(status) => match status.code() {
                Some(0) => (Some(0), FailureKind::None, None),
                Some(code) => (
                    Some(code),
                    FailureKind::NonZeroExit,
                    Some(format!("process exited with status {code}")),
                ),
                None => (None, FailureKind::WaitFailed, Some(describe_abnormal(status))),
            },
            WaitOutcome::TimedOut(limit) => (
                None,
                FailureKind::WaitFailed,
                Some(format!("process timed out after {limit:?} and was killed")),
            ),
            WaitOutcome::WaitError(err) => (
                None,
                FailureKind::WaitFailed,
                Some(format!("waiting for process failed: {err}")),
            ),
        };

        Self {
            combined_output,
            exit_code,
            failure,
            error_detail,
        }
    }

    pub fn success(&self) -> bool {
        self.failure == FailureKind::None
    }

    /// True when the process never ran, so no output can exist.
    pub fn is_spawn_failure(&self) -> bool {
        self.failure == FailureKind::SpawnFailed
    }

    pub fn into_output(self) -> String {
        self.combined_output
    }
}

#[cfg(unix)]
fn describe_abnormal(status: ExitStatus) -> String {
    use std::os::unix::process::ExitStatusExt;

    match status.signal() {
        Some(sig) => format!("process terminated by signal {sig}"),
        None => format!("process ended without an exit code ({status})"),
    }
}

#[cfg(not(unix))]
fn describe_abnormal(status: ExitStatus) -> String {
    format!("process ended without an exit code ({status})")
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;

    #[test]
    fn zero_status_is_success() {
        let r = ExecutionResult::from_wait(
            WaitOutcome::Exited(ExitStatus::from_raw(0)),
            "hi\n".to_string(),
        );
        assert!(r.success());
        assert_eq!(r.exit_code, Some(0));
        assert_eq!(r.error_detail, None);
    }

    #[test]
    fn non_zero_status_keeps_output_and_code() {
        // Raw wait status: exit code lives in the high byte.
        let r = ExecutionResult::from_wait(
            WaitOutcome::Exited(ExitStatus::from_raw(3 << 8)),
            "partial".to_string(),
        );
        assert_eq!(r.failure, FailureKind::NonZeroExit);
        assert_eq!(r.exit_code, Some(3));
        assert_eq!(r.combined_output, "partial");
        assert!(r.error_detail.unwrap().contains('3'));
    }

    #[test]
    fn spawn_failure_has_no_output_or_code() {
        let r = ExecutionResult::spawn_failed("no such file");
        assert!(r.is_spawn_failure());
        assert!(!r.success());
        assert_eq!(r.combined_output, "");
        assert_eq!(r.exit_code, None);

        let ran = ExecutionResult::from_wait(WaitOutcome::Exited(ExitStatus::from_raw(1 << 8)), String::new());
        assert!(!ran.is_spawn_failure());
    }

    #[test]
    fn signal_is_a_wait_failure() {
        let r = ExecutionResult::from_wait(WaitOutcome::Exited(ExitStatus::from_raw(9)), String::new());
        assert_eq!(r.failure, FailureKind::WaitFailed);
        assert_eq!(r.exit_code, None);
        assert!(r.error_detail.unwrap().contains("signal 9"));
    }

    #[test]
    fn timeout_is_a_wait_failure() {
        let r = ExecutionResult::from_wait(
            WaitOutcome::TimedOut(Duration::from_millis(500)),
            "so far".to_string(),
        );
        assert_eq!(r.failure, FailureKind::WaitFailed);
        assert_eq!(r.combined_output, "so far");
        assert!(r.error_detail.unwrap().contains("timed out"));
    }
}
