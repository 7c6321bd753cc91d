use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use runcap::exec::{CommandRunner, CommandSpec, ExecutionResult};

/// A fake runner that:
/// - records every `CommandSpec` it was asked to run
/// - answers each call with a clone of a canned `ExecutionResult`.
#[derive(Clone)]
pub struct FakeRunner {
    response: ExecutionResult,
    received: Arc<Mutex<Vec<CommandSpec>>>,
}

impl FakeRunner {
    pub fn new(response: ExecutionResult) -> Self {
        Self {
            response,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shortcut for a runner whose commands always succeed with `output`.
    pub fn succeeding(output: &str) -> Self {
        Self::new(ExecutionResult {
            combined_output: output.to_string(),
            exit_code: Some(0),
            ..ExecutionResult::default()
        })
    }

    pub fn received(&self) -> Vec<CommandSpec> {
        self.received.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run_command(
        &self,
        spec: CommandSpec,
    ) -> Pin<Box<dyn Future<Output = ExecutionResult> + Send + '_>> {
        let received = Arc::clone(&self.received);
        let response = self.response.clone();

        Box::pin(async move {
            received.lock().unwrap().push(spec);
            response
        })
    }
}
