// tests/coordinator_locking.rs

//! Destination-lock behaviour of the coordinator: mutual exclusion per
//! destination string, independence across destinations, and release on
//! every completion path.

use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time::sleep;

use syncgate::errors::SyncgateError;
use syncgate::exec::Invocation;
use syncgate::sync::{SyncCoordinator, SyncOptions};
use syncgate_test_utils::builders::test_credentials;
use syncgate_test_utils::fake_backend::{FakeResponse, FakeSyncBackend};
use syncgate_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn coordinator(backend: FakeSyncBackend) -> Arc<SyncCoordinator<FakeSyncBackend>> {
    Arc::new(SyncCoordinator::new(test_credentials(), "aws", backend))
}

/// Spin until the fake backend has recorded at least `n` invocations.
async fn wait_for_invocations(invocations: &Arc<Mutex<Vec<Invocation>>>, n: usize) {
    with_timeout(async {
        loop {
            if invocations.lock().unwrap().len() >= n {
                break;
            }
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
}

#[tokio::test]
async fn second_sync_to_same_destination_fails_while_first_in_flight() -> TestResult {
    init_tracing();

    let invocations = Arc::new(Mutex::new(Vec::new()));
    let gate = Arc::new(Semaphore::new(0));
    let backend = FakeSyncBackend::new(invocations.clone()).with_gate(gate.clone());
    let coordinator = coordinator(backend);

    let first = {
        let c = Arc::clone(&coordinator);
        tokio::spawn(async move {
            c.sync("s3://my-bucket/foo", "/foo", SyncOptions::default())
                .await
        })
    };

    // The first call must be inside the backend before we issue the
    // conflicting one.
    wait_for_invocations(&invocations, 1).await;

    let err = coordinator
        .sync("s3://my-bucket/foo", "/foo", SyncOptions::default())
        .await
        .expect_err("conflicting sync must fail");

    assert!(
        matches!(err, SyncgateError::SyncInProgress(ref d) if d == "/foo"),
        "unexpected error: {err}"
    );

    // The conflicting call must not have consumed a backend invocation.
    assert_eq!(invocations.lock().unwrap().len(), 1);

    gate.add_permits(1);
    first.await??;

    Ok(())
}

#[tokio::test]
async fn syncs_to_different_destinations_run_concurrently() -> TestResult {
    init_tracing();

    let invocations = Arc::new(Mutex::new(Vec::new()));
    let gate = Arc::new(Semaphore::new(0));
    let backend = FakeSyncBackend::new(invocations.clone()).with_gate(gate.clone());
    let coordinator = coordinator(backend);

    let foo = {
        let c = Arc::clone(&coordinator);
        tokio::spawn(async move {
            c.sync("s3://my-bucket/foo", "/foo", SyncOptions::default())
                .await
        })
    };
    let bar = {
        let c = Arc::clone(&coordinator);
        tokio::spawn(async move {
            c.sync("s3://my-bucket/foo", "/bar", SyncOptions::default())
                .await
        })
    };

    // Both destinations reach the backend while neither has completed.
    wait_for_invocations(&invocations, 2).await;

    gate.add_permits(2);
    foo.await??;
    bar.await??;

    Ok(())
}

#[tokio::test]
async fn destination_lock_is_released_after_success() -> TestResult {
    init_tracing();

    let invocations = Arc::new(Mutex::new(Vec::new()));
    let backend = FakeSyncBackend::new(invocations.clone());
    let coordinator = coordinator(backend);

    coordinator
        .sync("s3://my-bucket/foo", "/foo", SyncOptions::default())
        .await?;
    coordinator
        .sync("s3://my-bucket/foo", "/foo", SyncOptions::default())
        .await?;

    assert_eq!(invocations.lock().unwrap().len(), 2);

    Ok(())
}

#[tokio::test]
async fn destination_lock_is_released_after_failure() -> TestResult {
    init_tracing();

    let invocations = Arc::new(Mutex::new(Vec::new()));
    let backend = FakeSyncBackend::new(invocations.clone()).with_response(FakeResponse::Fail {
        code: 1,
        stderr: "fatal error: access denied".to_string(),
    });
    let coordinator = coordinator(backend);

    let err = coordinator
        .sync("s3://my-bucket/foo", "/foo", SyncOptions::default())
        .await
        .expect_err("scripted failure must propagate");
    assert!(
        matches!(err, SyncgateError::CommandFailed { code: 1, .. }),
        "unexpected error: {err}"
    );

    // A failed sync must not leave a stale lock behind.
    coordinator
        .sync("s3://my-bucket/foo", "/foo", SyncOptions::default())
        .await?;

    assert_eq!(invocations.lock().unwrap().len(), 2);

    Ok(())
}

#[tokio::test]
async fn destinations_are_compared_as_literal_strings() -> TestResult {
    init_tracing();

    let invocations = Arc::new(Mutex::new(Vec::new()));
    let gate = Arc::new(Semaphore::new(0));
    let backend = FakeSyncBackend::new(invocations.clone()).with_gate(gate.clone());
    let coordinator = coordinator(backend);

    let plain = {
        let c = Arc::clone(&coordinator);
        tokio::spawn(async move {
            c.sync("s3://my-bucket/foo", "/foo", SyncOptions::default())
                .await
        })
    };
    let trailing_slash = {
        let c = Arc::clone(&coordinator);
        tokio::spawn(async move {
            c.sync("s3://my-bucket/foo", "/foo/", SyncOptions::default())
                .await
        })
    };

    // `/foo` and `/foo/` are different lock keys, so both proceed.
    wait_for_invocations(&invocations, 2).await;

    gate.add_permits(2);
    plain.await??;
    trailing_slash.await??;

    Ok(())
}
