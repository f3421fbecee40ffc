use serde::{Deserialize, Serialize};

use crate::{EventLevel, EventSource};
use photofetch_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureContext {
    /// Stable error code, when the error type provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Construct a new failure context.
    #[must_use]
    pub fn new(
        code: Option<impl Into<String>>,
        message: impl Into<String>,
        hint: Option<impl Into<String>>,
        retryable: bool,
    ) -> Self {
        Self {
            code: code.map(Into::into),
            message: message.into(),
            hint: hint.map(Into::into),
            retryable,
        }
    }

    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self::new(
            error.user_code(),
            error.user_message().into_owned(),
            error.user_hint(),
            error.is_retryable(),
        )
    }
}

pub mod download;
pub mod harness;

pub use download::*;
pub use harness::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// HTTP download lifecycle
    Download(DownloadEvent),

    /// Download harness case lifecycle
    Harness(HarnessEvent),
}

impl AppEvent {
    /// Default severity and source used when wrapping the event in metadata.
    #[must_use]
    pub fn log_defaults(&self) -> (EventLevel, EventSource) {
        match self {
            AppEvent::Download(event) => {
                let level = match event {
                    DownloadEvent::Started { .. } => EventLevel::Debug,
                    DownloadEvent::Completed { .. } => EventLevel::Info,
                    DownloadEvent::Failed { .. } => EventLevel::Warn,
                };
                (level, EventSource::Download)
            }
            AppEvent::Harness(event) => {
                let level = match event {
                    HarnessEvent::CaseStarted { .. } | HarnessEvent::LateCompletion { .. } => {
                        EventLevel::Debug
                    }
                    HarnessEvent::CasePassed { .. } | HarnessEvent::RunCompleted { .. } => {
                        EventLevel::Info
                    }
                    HarnessEvent::CaseFailed { .. } => EventLevel::Error,
                };
                (level, EventSource::Harness)
            }
        }
    }
}
