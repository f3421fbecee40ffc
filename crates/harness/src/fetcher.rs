//! The fetch collaborator seam

use crate::completion::Completion;
use photofetch_events::EventSender;
use photofetch_net::{download_photo, NetClient};
use tokio::task::{AbortHandle, JoinHandle};
use url::Url;

/// Handle to an in-flight fetch
///
/// The harness aborts it when the timeout expires so no work outlives the
/// case. A detached handle has nothing to abort.
#[derive(Debug, Default)]
pub struct FetchHandle(Option<AbortHandle>);

impl FetchHandle {
    /// A handle for fetches the harness cannot cancel
    #[must_use]
    pub fn detached() -> Self {
        Self(None)
    }

    pub(crate) fn abort(self) {
        if let Some(handle) = self.0 {
            handle.abort();
        }
    }
}

impl<T> From<JoinHandle<T>> for FetchHandle {
    fn from(task: JoinHandle<T>) -> Self {
        Self(Some(task.abort_handle()))
    }
}

impl From<AbortHandle> for FetchHandle {
    fn from(handle: AbortHandle) -> Self {
        Self(Some(handle))
    }
}

/// An asynchronous download that reports through a one-shot [`Completion`]
///
/// Implementations must resolve `completion` at most once, from any thread.
/// `fetch` is called from within a tokio runtime, so implementations may spawn.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: Url, completion: Completion) -> FetchHandle;
}

impl<F> Fetcher for F
where
    F: Fn(Url, Completion) -> FetchHandle + Send + Sync,
{
    fn fetch(&self, url: Url, completion: Completion) -> FetchHandle {
        self(url, completion)
    }
}

/// Build a [`Fetcher`] from a closure, letting the compiler infer its arguments
///
/// ```
/// use photofetch_harness::{fetch_fn, Completion, FetchHandle};
///
/// let always_ok = fetch_fn(|_url, completion: Completion| {
///     completion.succeed();
///     FetchHandle::detached()
/// });
/// # let _ = always_ok;
/// ```
pub fn fetch_fn<F>(f: F) -> F
where
    F: Fn(Url, Completion) -> FetchHandle + Send + Sync,
{
    f
}

/// Fetcher backed by real HTTP downloads
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: NetClient,
    events: Option<EventSender>,
}

impl HttpFetcher {
    #[must_use]
    pub fn new(client: NetClient) -> Self {
        Self {
            client,
            events: None,
        }
    }

    /// Forward download events to `events`
    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: Url, completion: Completion) -> FetchHandle {
        download_photo(&self.client, url, self.events.clone(), move |photo, error| {
            completion.complete(photo, error);
        })
        .into()
    }
}
