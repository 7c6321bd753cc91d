// tests/exec_failures.rs
#![cfg(unix)]

mod common;
use crate::common::{executor, executor_with_timeout, init_tracing, sh};

use std::time::{Duration, Instant};

use runcap::exec::{CommandSpec, FailureKind};

#[tokio::test]
async fn missing_executable_is_a_spawn_failure() {
    init_tracing();

    let result = executor()
        .run(CommandSpec::new("runcap-definitely-not-installed").arg("--help"))
        .await;

    assert_eq!(result.failure, FailureKind::SpawnFailed);
    assert_eq!(result.combined_output, "");
    assert_eq!(result.exit_code, None);
    let detail = result.error_detail.expect("spawn failure must carry a detail");
    assert!(detail.contains("runcap-definitely-not-installed"), "{detail}");
}

#[tokio::test]
async fn bad_working_directory_is_a_spawn_failure() {
    init_tracing();

    let result = executor()
        .run(sh("echo never").current_dir("/definitely/not/a/dir/runcap"))
        .await;

    assert_eq!(result.failure, FailureKind::SpawnFailed);
    assert_eq!(result.combined_output, "");
}

#[tokio::test]
async fn empty_program_is_a_spawn_failure() {
    init_tracing();

    let result = executor().run(CommandSpec::new("")).await;

    assert_eq!(result.failure, FailureKind::SpawnFailed);
    assert!(result.error_detail.is_some());
}

#[tokio::test]
async fn non_zero_exit_keeps_output_and_code() {
    init_tracing();

    let result = executor()
        .run(sh("echo partial; echo oops >&2; exit 1"))
        .await;

    assert_eq!(result.failure, FailureKind::NonZeroExit);
    assert_eq!(result.exit_code, Some(1));
    assert!(result.combined_output.contains("partial\n"));
    assert!(result.combined_output.contains("oops\n"));
    assert!(result.error_detail.unwrap().contains('1'));
}

#[tokio::test]
async fn signalled_process_is_a_wait_failure() {
    init_tracing();

    let result = executor().run(sh("echo before; kill -9 $$")).await;

    assert_eq!(result.failure, FailureKind::WaitFailed);
    assert_eq!(result.exit_code, None);
    assert_eq!(result.combined_output, "before\n");
    assert!(result.error_detail.unwrap().contains("signal 9"));
}

#[tokio::test]
async fn deadline_kills_the_process_and_keeps_partial_output() {
    init_tracing();

    let exec = executor_with_timeout(Duration::from_millis(300), Duration::from_millis(300));
    let started = Instant::now();

    // `sleep` may outlive the killed shell and keep the pipes open; the drain
    // grace period must still bound the call.
    let result = exec.run(sh("echo started; sleep 10; echo never")).await;

    assert!(started.elapsed() < Duration::from_secs(5), "call did not honour the deadline");
    assert_eq!(result.failure, FailureKind::WaitFailed);
    assert_eq!(result.exit_code, None);
    assert!(result.combined_output.starts_with("started\n"));
    assert!(!result.combined_output.contains("never"));
    assert!(result.error_detail.unwrap().contains("timed out"));
}

#[tokio::test]
async fn fast_process_is_unaffected_by_deadline() {
    init_tracing();

    let exec = executor_with_timeout(Duration::from_secs(10), Duration::from_millis(100));
    let result = exec.run(sh("echo quick")).await;

    assert!(result.success());
    assert_eq!(result.combined_output, "quick\n");
}
