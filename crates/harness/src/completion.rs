//! Single-use completion signal
//!
//! A [`Completion`] is handed to the fetch collaborator; the harness keeps the
//! matching [`CompletionWait`]. The pair holds exactly one permit: calling any
//! of the `Completion` methods consumes it, so a second signal cannot be
//! expressed. A signal that arrives after the waiter gave up is dropped.

use photofetch_events::{AppEvent, EventEmitter, EventSender, HarnessEvent};
use std::fmt::Display;
use tokio::sync::oneshot;

/// What the fetch collaborator reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Signal {
    Succeeded,
    Failed(String),
}

/// One-shot callback handed to a [`crate::Fetcher`]
///
/// `Completion` is `Send`, so it can be resolved from a tokio task, a plain
/// thread, or synchronously inside `fetch` itself.
#[derive(Debug)]
pub struct Completion {
    url: String,
    tx: oneshot::Sender<Signal>,
    events: Option<EventSender>,
}

/// Harness side of a [`Completion`]
#[derive(Debug)]
pub(crate) struct CompletionWait {
    rx: oneshot::Receiver<Signal>,
}

impl Completion {
    pub(crate) fn new(url: impl Into<String>, events: Option<EventSender>) -> (Self, CompletionWait) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                url: url.into(),
                tx,
                events,
            },
            CompletionWait { rx },
        )
    }

    /// URL of the download this completion belongs to
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resolve with a `(result, error)` pair
    ///
    /// The download counts as failed exactly when `error` is present; the
    /// result itself is not inspected.
    pub fn complete<T, E: Display>(self, result: Option<T>, error: Option<E>) {
        drop(result);
        match error {
            Some(error) => self.fail(error),
            None => self.succeed(),
        }
    }

    /// Resolve as a successful download
    pub fn succeed(self) {
        self.send(Signal::Succeeded);
    }

    /// Resolve as a failed download, keeping the error's description
    pub fn fail(self, error: impl Display) {
        let message = error.to_string();
        self.send(Signal::Failed(message));
    }

    fn send(self, signal: Signal) {
        let Self { url, tx, events } = self;
        if tx.send(signal).is_err() {
            tracing::debug!(url = %url, "completion arrived after the waiter gave up");
            events.emit(AppEvent::Harness(HarnessEvent::LateCompletion { url }));
        }
    }
}

impl CompletionWait {
    /// Wait for the completion to be resolved
    ///
    /// A completion that is dropped without being resolved never signals, so
    /// this future stays pending and the caller's deadline decides the outcome.
    pub(crate) async fn wait(self) -> Signal {
        match self.rx.await {
            Ok(signal) => signal,
            Err(_) => std::future::pending().await,
        }
    }
}
