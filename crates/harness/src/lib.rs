#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Download harness for photofetch
//!
//! Turns a callback-style download into a pass/fail outcome bounded by a
//! timeout. The download reports through a one-shot [`Completion`]; the
//! harness waits on it with a deadline and records exactly one of success,
//! fetch failure or timeout.
//!
//! ```no_run
//! use photofetch_harness::{DownloadCase, DownloadHarness, HttpFetcher};
//! use photofetch_net::NetClient;
//!
//! # fn main() -> Result<(), photofetch_errors::Error> {
//! let harness = DownloadHarness::new(HttpFetcher::new(NetClient::with_defaults()?)).blocking()?;
//! for case in DownloadCase::samples() {
//!     harness.run_case(&case).assert_passed();
//! }
//! # Ok(())
//! # }
//! ```

mod cases;
mod completion;
mod fetcher;
mod runner;

pub use cases::{CaseOutcome, CaseResult, DownloadCase, HarnessReport};
pub use completion::Completion;
pub use fetcher::{fetch_fn, FetchHandle, Fetcher, HttpFetcher};
pub use runner::{BlockingHarness, DownloadHarness, HarnessOptions};
