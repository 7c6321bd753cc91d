// src/exec/executor.rs

//! Single-invocation process runner.

use std::time::Duration;

use tokio::process::Child;
use tracing::{debug, info, warn};

use crate::exec::drainer::DrainSet;
use crate::exec::result::{ExecutionResult, WaitOutcome};
use crate::exec::spec::CommandSpec;
use crate::types::{CaptureMode, StreamKind};

/// Executor-wide policy, usually loaded from the `[exec]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOptions {
    pub capture: CaptureMode,

    /// Kill the child if it runs longer than this.
    pub timeout: Option<Duration>,

    /// After a kill, how long drainers may keep reading before they are
    /// cancelled. Covers grandchildren that inherited the pipes.
    pub drain_grace: Duration,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            capture: CaptureMode::Completion,
            timeout: None,
            drain_grace: Duration::from_secs(2),
        }
    }
}

/// Runs one [`CommandSpec`] at a time per call; holds no per-invocation
/// state, so a single executor can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor {
    options: ExecOptions,
}

impl CommandExecutor {
    pub fn new(options: ExecOptions) -> Self {
        Self { options }
    }

    /// Spawn the process, drain stdout and stderr concurrently with the wait,
    /// and return once the process has ended and both drainers are done.
    pub async fn run(&self, spec: CommandSpec) -> ExecutionResult {
        info!(
            program = %spec.program,
            args = ?spec.args,
            dir = ?spec.working_dir,
            "starting process"
        );

        if spec.program.is_empty() {
            warn!("refusing to spawn an empty program name");
            return ExecutionResult::spawn_failed("program name is empty");
        }

        let mut child = match spec.to_command().spawn() {
            Ok(child) => child,
            Err(e) => {
                let detail = format!("failed to start '{}': {e}", spec.program);
                warn!(program = %spec.program, error = %e, "spawn failed");
                return ExecutionResult::spawn_failed(detail);
            }
        };

        let pid = child.id();
        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            warn!(program = %spec.program, ?pid, "output pipes unavailable; killing process");
            if let Err(e) = child.kill().await {
                warn!(program = %spec.program, ?pid, error = %e, "failed to kill process");
            }
            return ExecutionResult::spawn_failed(format!(
                "failed to capture output pipes of '{}'",
                spec.program
            ));
        };

        let mut drains = DrainSet::new(self.options.capture);
        drains.start(StreamKind::Stdout, stdout);
        drains.start(StreamKind::Stderr, stderr);

        let outcome = self.wait_for_exit(&mut child, &spec).await;

        // A process we had to kill may leave pipes open in its children;
        // bound the drain in that case only.
        let grace = match outcome {
            WaitOutcome::Exited(_) => None,
            WaitOutcome::TimedOut(_) | WaitOutcome::WaitError(_) => Some(self.options.drain_grace),
        };
        let drained = drains.wait(grace).await;

        for output in &drained.outputs {
            if let Some(ref err) = output.error {
                debug!(stream = %output.stream, error = %err, "stream ended early");
            }
        }

        let result = ExecutionResult::from_wait(outcome, drained.combined_output());

        match result.error_detail {
            Some(ref detail) => warn!(
                program = %spec.program,
                ?pid,
                exit_code = ?result.exit_code,
                failure = %result.failure,
                "{detail}"
            ),
            None => info!(
                program = %spec.program,
                ?pid,
                bytes = result.combined_output.len(),
                "process exited successfully"
            ),
        }

        result
    }

    async fn wait_for_exit(&self, child: &mut Child, spec: &CommandSpec) -> WaitOutcome {
        let waited = match self.options.timeout {
            None => child.wait().await,
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(res) => res,
                Err(_) => {
                    warn!(program = %spec.program, ?limit, "deadline reached; killing process");
                    if let Err(e) = child.kill().await {
                        warn!(program = %spec.program, error = %e, "failed to kill timed-out process");
                    }
                    return WaitOutcome::TimedOut(limit);
                }
            },
        };

        match waited {
            Ok(status) => WaitOutcome::Exited(status),
            Err(e) => {
                if let Err(kill_err) = child.start_kill() {
                    debug!(program = %spec.program, error = %kill_err, "kill after wait error failed");
                }
                WaitOutcome::WaitError(e.to_string())
            }
        }
    }
}
