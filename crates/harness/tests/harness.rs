//! Harness behaviour against stubbed fetchers

use photofetch_errors::HarnessError;
use photofetch_events::{channel, AppEvent, HarnessEvent};
use photofetch_harness::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

const SCENARIO_A: &str = "https://example.com/a.jpg";
const SCENARIO_B: &str = "https://example.com/b.jpg";
const SCENARIO_C: &str = "https://example.com/c.jpg";

const BUDGET: Duration = Duration::from_secs(10);

/// Resolves successfully after `delay`
fn succeeds_after(delay: Duration) -> impl Fetcher {
    fetch_fn(move |_url, completion: Completion| {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            completion.complete(Some(b"photo".to_vec()), None::<String>);
        })
        .into()
    })
}

/// Resolves with `message` as the error after `delay`
fn fails_after(delay: Duration, message: &'static str) -> impl Fetcher {
    fetch_fn(move |_url, completion: Completion| {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            completion.complete(None::<Vec<u8>>, Some(message));
        })
        .into()
    })
}

/// Never resolves its completion
fn never_completes() -> impl Fetcher {
    fetch_fn(|_url, completion: Completion| {
        tokio::spawn(async move {
            std::future::pending::<()>().await;
            completion.succeed();
        })
        .into()
    })
}

fn sample_urls() -> Vec<String> {
    DownloadCase::samples().into_iter().map(|c| c.url).collect()
}

#[tokio::test(start_paused = true)]
async fn test_success_within_timeout_passes_for_every_sample() {
    let harness = DownloadHarness::new(succeeds_after(Duration::from_millis(100)));

    for url in sample_urls() {
        let elapsed = harness.run_download_test(&url).await.unwrap();
        assert!(elapsed < BUDGET, "{url} took {elapsed:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_silent_fetch_times_out_after_budget_for_every_sample() {
    let harness = DownloadHarness::new(never_completes());

    for url in sample_urls() {
        let started = Instant::now();
        let error = harness.run_download_test(&url).await.unwrap_err();
        let elapsed = started.elapsed();

        assert_eq!(
            error,
            HarnessError::Timeout {
                url: url.clone(),
                timeout: BUDGET,
            }
        );
        assert!(elapsed >= BUDGET);
        assert!(elapsed < BUDGET + Duration::from_millis(50));
    }
}

#[tokio::test(start_paused = true)]
async fn test_immediate_error_fails_promptly_for_every_sample() {
    let harness = DownloadHarness::new(fails_after(Duration::ZERO, "network down"));

    for url in sample_urls() {
        let started = Instant::now();
        let error = harness.run_download_test(&url).await.unwrap_err();

        assert!(matches!(error, HarnessError::Fetch { .. }));
        let message = error.to_string();
        assert!(message.contains(&url));
        assert!(message.contains("network down"));
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}

#[tokio::test(start_paused = true)]
async fn test_scenario_success_after_100ms() {
    let harness = DownloadHarness::new(succeeds_after(Duration::from_millis(100)));

    let elapsed = harness.run_download_test(SCENARIO_A).await.unwrap();
    assert!(elapsed >= Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn test_scenario_error_after_50ms() {
    let harness = DownloadHarness::new(fails_after(Duration::from_millis(50), "network down"));

    let started = Instant::now();
    let error = harness.run_download_test(SCENARIO_B).await.unwrap_err();

    let message = error.to_string();
    assert!(message.contains(SCENARIO_B));
    assert!(message.contains("network down"));
    assert!(started.elapsed() < BUDGET);
}

#[tokio::test(start_paused = true)]
async fn test_scenario_never_completes() {
    let harness = DownloadHarness::new(never_completes());

    let started = Instant::now();
    let error = harness.run_download_test(SCENARIO_C).await.unwrap_err();

    assert!(error.to_string().contains("timed out"));
    assert!(started.elapsed() >= BUDGET);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_completion_counts_as_timeout() {
    let harness = DownloadHarness::new(fetch_fn(|_url, completion: Completion| {
        drop(completion);
        FetchHandle::detached()
    }));

    let error = harness.run_download_test(SCENARIO_C).await.unwrap_err();
    assert!(error.is_timeout());
}

#[tokio::test(start_paused = true)]
async fn test_configured_timeout_is_honoured() {
    let options = HarnessOptions {
        timeout: Duration::from_secs(2),
    };
    let harness = DownloadHarness::with_options(never_completes(), options);

    let started = Instant::now();
    let error = harness.run_download_test(SCENARIO_C).await.unwrap_err();

    assert!(error.to_string().contains("timed out after 2s"));
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(2) && elapsed < Duration::from_secs(3));
}

#[tokio::test]
async fn test_invalid_url_fails_without_fetching() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let harness = DownloadHarness::new(fetch_fn(move |_url, completion: Completion| {
        counter.fetch_add(1, Ordering::SeqCst);
        completion.succeed();
        FetchHandle::detached()
    }));

    let error = harness.run_download_test("not a url").await.unwrap_err();

    assert!(matches!(error, HarnessError::InvalidUrl { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_runs_give_the_same_outcome_class() {
    let passing = DownloadHarness::new(succeeds_after(Duration::from_millis(10)));
    assert!(passing.run_download_test(SCENARIO_A).await.is_ok());
    assert!(passing.run_download_test(SCENARIO_A).await.is_ok());

    let failing = DownloadHarness::new(fails_after(Duration::from_millis(10), "network down"));
    for _ in 0..2 {
        assert!(matches!(
            failing.run_download_test(SCENARIO_B).await,
            Err(HarnessError::Fetch { .. })
        ));
    }

    let silent = DownloadHarness::new(never_completes());
    for _ in 0..2 {
        assert!(silent.run_download_test(SCENARIO_C).await.unwrap_err().is_timeout());
    }
}

#[tokio::test(start_paused = true)]
async fn test_timeout_aborts_in_flight_fetch() {
    let finished = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&finished);
    let harness = DownloadHarness::new(fetch_fn(move |_url, completion: Completion| {
        let flag = Arc::clone(&flag);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            flag.store(true, Ordering::SeqCst);
            completion.succeed();
        })
        .into()
    }));

    let error = harness.run_download_test(SCENARIO_C).await.unwrap_err();
    assert!(error.is_timeout());

    tokio::time::advance(Duration::from_secs(120)).await;
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert!(!finished.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_late_completion_after_timeout_is_harmless() {
    let (tx, mut rx) = channel();
    let options = HarnessOptions {
        timeout: Duration::from_millis(50),
    };
    let harness = DownloadHarness::with_options(
        fetch_fn(|_url, completion: Completion| {
            // A plain thread cannot be aborted, so this one outlives the wait
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(200));
                completion.succeed();
            });
            FetchHandle::detached()
        }),
        options,
    )
    .with_events(tx);

    let error = harness.run_download_test(SCENARIO_C).await.unwrap_err();
    assert!(error.is_timeout());

    tokio::time::sleep(Duration::from_millis(500)).await;

    let mut saw_late = false;
    while let Ok(message) = rx.try_recv() {
        if let AppEvent::Harness(HarnessEvent::LateCompletion { url }) = message.event {
            assert_eq!(url, SCENARIO_C);
            saw_late = true;
        }
    }
    assert!(saw_late);
}

#[tokio::test(start_paused = true)]
async fn test_run_all_keeps_cases_independent() {
    let harness = DownloadHarness::new(fetch_fn(|url, completion: Completion| {
        tokio::spawn(async move {
            match url.path() {
                "/a.jpg" => {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    completion.succeed();
                }
                "/b.jpg" => {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    completion.fail("network down");
                }
                _ => std::future::pending::<()>().await,
            }
        })
        .into()
    }));

    let cases = [
        DownloadCase::new("a", SCENARIO_A),
        DownloadCase::new("b", SCENARIO_B),
        DownloadCase::new("c", SCENARIO_C),
    ];

    let started = Instant::now();
    let report = harness.run_all(&cases).await;

    assert_eq!(report.passed(), 1);
    assert_eq!(report.failed(), 2);
    assert_eq!(report.results[0].case.name, "a");
    assert!(report.results[0].outcome.is_passed());
    assert!(matches!(
        report.results[1].outcome.error(),
        Some(HarnessError::Fetch { .. })
    ));
    assert!(report.results[2].outcome.error().unwrap().is_timeout());
    // Cases run concurrently, so the slowest one bounds the run
    assert!(started.elapsed() < BUDGET + Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_run_case_emits_lifecycle_events() {
    let (tx, mut rx) = channel();
    let harness = DownloadHarness::new(fails_after(Duration::from_millis(50), "network down"))
        .with_events(tx);

    let outcome = harness
        .run_case(&DownloadCase::new("b", SCENARIO_B))
        .await;
    assert!(!outcome.is_passed());

    let first = rx.try_recv().unwrap();
    assert_eq!(first.meta.correlation_id.as_deref(), Some("b"));
    assert!(matches!(
        first.event,
        AppEvent::Harness(HarnessEvent::CaseStarted { .. })
    ));

    let second = rx.try_recv().unwrap();
    assert_eq!(second.meta.correlation_id.as_deref(), Some("b"));
    match second.event {
        AppEvent::Harness(HarnessEvent::CaseFailed {
            name,
            timed_out,
            failure,
            ..
        }) => {
            assert_eq!(name, "b");
            assert!(!timed_out);
            assert_eq!(failure.code.as_deref(), Some("harness.fetch_failed"));
            assert!(failure.message.contains("network down"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
