//! Bridging callback-style downloads into timeout-bounded outcomes

use crate::cases::{CaseOutcome, CaseResult, DownloadCase, HarnessReport};
use crate::completion::{Completion, Signal};
use crate::fetcher::Fetcher;
use photofetch_config::{HarnessConfig, DEFAULT_TIMEOUT_SECS};
use photofetch_errors::{Error, HarnessError};
use photofetch_events::{AppEvent, EventEmitter, EventSender, FailureContext, HarnessEvent};
use std::time::Duration;
use tokio::time::Instant;

/// Harness settings
#[derive(Debug, Clone)]
pub struct HarnessOptions {
    /// Budget for a single case, from fetch start to completion
    pub timeout: Duration,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl From<&HarnessConfig> for HarnessOptions {
    fn from(config: &HarnessConfig) -> Self {
        Self {
            timeout: config.timeout(),
        }
    }
}

/// Runs download cases against a [`Fetcher`]
///
/// Every invocation creates its own completion signal, so runs share no state
/// and a failure in one case never affects another.
pub struct DownloadHarness<F> {
    fetcher: F,
    options: HarnessOptions,
    events: Option<EventSender>,
}

impl<F: Fetcher> DownloadHarness<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_options(fetcher, HarnessOptions::default())
    }

    pub fn with_options(fetcher: F, options: HarnessOptions) -> Self {
        Self {
            fetcher,
            options,
            events: None,
        }
    }

    /// Report case lifecycle events to `events`
    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.options.timeout
    }

    /// Download `url` and wait for its completion
    ///
    /// Returns the time the completion took to arrive.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidUrl`] without fetching if `url` does not
    /// parse, [`HarnessError::Fetch`] if the completion carried an error, and
    /// [`HarnessError::Timeout`] if no completion arrived within the budget.
    /// On timeout the in-flight fetch is aborted.
    pub async fn run_download_test(&self, url: &str) -> Result<Duration, HarnessError> {
        let started = Instant::now();
        let parsed = photofetch_net::parse_url(url).map_err(|e| HarnessError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let (completion, wait) = Completion::new(url, self.events.clone());
        let handle = self.fetcher.fetch(parsed, completion);

        match tokio::time::timeout(self.options.timeout, wait.wait()).await {
            Ok(Signal::Succeeded) => Ok(started.elapsed()),
            Ok(Signal::Failed(message)) => Err(HarnessError::Fetch {
                url: url.to_string(),
                message,
            }),
            Err(_) => {
                handle.abort();
                Err(HarnessError::Timeout {
                    url: url.to_string(),
                    timeout: self.options.timeout,
                })
            }
        }
    }

    /// Run one case and record its outcome as events
    ///
    /// Case events carry the case name as their correlation id.
    pub async fn run_case(&self, case: &DownloadCase) -> CaseOutcome {
        let scope = CaseEvents {
            events: self.events.as_ref(),
            case: &case.name,
        };
        scope.emit(AppEvent::Harness(HarnessEvent::CaseStarted {
            name: case.name.clone(),
            url: case.url.clone(),
            timeout: self.options.timeout,
        }));

        let started = Instant::now();
        let outcome = match self.run_download_test(&case.url).await {
            Ok(elapsed) => CaseOutcome::Passed { elapsed },
            Err(error) => CaseOutcome::Failed {
                error,
                elapsed: started.elapsed(),
            },
        };

        match &outcome {
            CaseOutcome::Passed { elapsed } => {
                scope.emit(AppEvent::Harness(HarnessEvent::CasePassed {
                    name: case.name.clone(),
                    url: case.url.clone(),
                    elapsed: *elapsed,
                }));
            }
            CaseOutcome::Failed { error, elapsed } => {
                scope.emit(AppEvent::Harness(HarnessEvent::CaseFailed {
                    name: case.name.clone(),
                    url: case.url.clone(),
                    elapsed: *elapsed,
                    timed_out: error.is_timeout(),
                    failure: FailureContext::from_error(error),
                }));
            }
        }

        outcome
    }

    /// Run every case concurrently; results keep the input order
    pub async fn run_all(&self, cases: &[DownloadCase]) -> HarnessReport {
        let started = Instant::now();
        let outcomes = futures::future::join_all(cases.iter().map(|case| self.run_case(case))).await;

        let report = HarnessReport {
            results: cases
                .iter()
                .cloned()
                .zip(outcomes)
                .map(|(case, outcome)| CaseResult { case, outcome })
                .collect(),
            elapsed: started.elapsed(),
        };

        self.emit(AppEvent::Harness(HarnessEvent::RunCompleted {
            passed: report.passed(),
            failed: report.failed(),
            elapsed: report.elapsed,
        }));

        report
    }

    /// Wrap the harness for callers that cannot `.await`
    ///
    /// # Errors
    ///
    /// Returns an error if the private runtime cannot be created.
    pub fn blocking(self) -> Result<BlockingHarness<F>, Error> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(BlockingHarness {
            inner: self,
            runtime,
        })
    }
}

impl<F> EventEmitter for DownloadHarness<F> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.events.as_ref()
    }
}

/// Event scope of a single case
struct CaseEvents<'a> {
    events: Option<&'a EventSender>,
    case: &'a str,
}

impl EventEmitter for CaseEvents<'_> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.events
    }

    fn correlation_id(&self) -> Option<&str> {
        Some(self.case)
    }
}

/// Blocking front end over a [`DownloadHarness`]
///
/// Owns a current-thread runtime and blocks the calling thread until each
/// case resolves or times out. Fetch tasks only make progress while a call is
/// blocked, and aborted ones are dropped with the runtime. Must not be used
/// from inside another tokio runtime.
pub struct BlockingHarness<F> {
    inner: DownloadHarness<F>,
    runtime: tokio::runtime::Runtime,
}

impl<F: Fetcher> BlockingHarness<F> {
    /// Blocking form of [`DownloadHarness::run_download_test`]
    ///
    /// # Errors
    ///
    /// Same as [`DownloadHarness::run_download_test`].
    pub fn run_download_test(&self, url: &str) -> Result<Duration, HarnessError> {
        self.runtime.block_on(self.inner.run_download_test(url))
    }

    /// Blocking form of [`DownloadHarness::run_case`]
    pub fn run_case(&self, case: &DownloadCase) -> CaseOutcome {
        self.runtime.block_on(self.inner.run_case(case))
    }

    /// Blocking form of [`DownloadHarness::run_all`]
    pub fn run_all(&self, cases: &[DownloadCase]) -> HarnessReport {
        self.runtime.block_on(self.inner.run_all(cases))
    }

    /// Fail the calling test unless `url` downloads within the budget
    ///
    /// # Panics
    ///
    /// Panics with the failure message, attributed to the caller's location.
    #[track_caller]
    pub fn assert_downloads(&self, url: &str) {
        if let Err(error) = self.run_download_test(url) {
            panic!("{error}");
        }
    }
}
