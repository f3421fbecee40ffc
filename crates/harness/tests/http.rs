//! `HttpFetcher` against a local mock server

use httpmock::prelude::*;
use photofetch_errors::HarnessError;
use photofetch_events::{channel, AppEvent, DownloadEvent, HarnessEvent};
use photofetch_harness::*;
use photofetch_net::{NetClient, NetConfig};
use std::time::Duration;

fn http_fetcher() -> HttpFetcher {
    let client = NetClient::new(NetConfig {
        retry_count: 0,
        ..NetConfig::default()
    })
    .unwrap();
    HttpFetcher::new(client)
}

#[tokio::test]
async fn test_http_fetch_passes_for_served_photo() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/tPzTg7A.jpg");
            then.status(200)
                .header("content-type", "image/jpeg")
                .body(b"\xff\xd8\xff\xe0 jpeg");
        })
        .await;

    let (tx, mut rx) = channel();
    let harness = DownloadHarness::new(http_fetcher().with_events(tx.clone())).with_events(tx);

    let outcome = harness
        .run_case(&DownloadCase::new("lots_of_faces", server.url("/tPzTg7A.jpg")))
        .await;

    mock.assert_async().await;
    outcome.assert_passed();

    let mut saw_download = false;
    let mut saw_passed = false;
    while let Ok(message) = rx.try_recv() {
        match message.event {
            AppEvent::Download(DownloadEvent::Completed { .. }) => saw_download = true,
            AppEvent::Harness(HarnessEvent::CasePassed { .. }) => saw_passed = true,
            _ => {}
        }
    }
    assert!(saw_download);
    assert!(saw_passed);
}

#[tokio::test]
async fn test_http_fetch_reports_status_as_fetch_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/missing.png");
            then.status(404);
        })
        .await;

    let harness = DownloadHarness::new(http_fetcher());
    let url = server.url("/missing.png");

    let error = harness.run_download_test(&url).await.unwrap_err();

    match &error {
        HarnessError::Fetch { url: failed, message } => {
            assert_eq!(failed, &url);
            assert!(message.contains("404"));
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_fetch_times_out_on_slow_server() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/slow.png");
            then.status(200).delay(Duration::from_secs(2)).body("late");
        })
        .await;

    let harness = DownloadHarness::with_options(
        http_fetcher(),
        HarnessOptions {
            timeout: Duration::from_millis(200),
        },
    );

    let error = harness
        .run_download_test(&server.url("/slow.png"))
        .await
        .unwrap_err();
    assert!(error.is_timeout());
}
