//! Download harness error types

use std::borrow::Cow;
use std::time::Duration;

use crate::UserFacingError;
use thiserror::Error;

/// Failure recorded for a single download case.
///
/// Display output follows the form `"<url> failed. <reason>"` or
/// `"<url> timed out"` so the URL is always the first thing a reader sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HarnessError {
    /// The fetch collaborator reported an error through its completion.
    #[error("{url} failed. {message}")]
    Fetch { url: String, message: String },

    /// The completion was not signaled within the timeout budget.
    #[error("{url} timed out after {}s", .timeout.as_secs_f64())]
    Timeout { url: String, timeout: Duration },

    /// The URL string could not be parsed, so no fetch was attempted.
    #[error("{url} is not a valid URL: {message}")]
    InvalidUrl { url: String, message: String },
}

impl HarnessError {
    /// The URL of the case that failed.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Fetch { url, .. } | Self::Timeout { url, .. } | Self::InvalidUrl { url, .. } => {
                url
            }
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl UserFacingError for HarnessError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Timeout { .. } => {
                Some("Increase `harness.timeout_secs` or check that the host is reachable.")
            }
            Self::InvalidUrl { .. } => Some("Fix the URL in the case list."),
            Self::Fetch { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Fetch { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::Fetch { .. } => "harness.fetch_failed",
            Self::Timeout { .. } => "harness.timeout",
            Self::InvalidUrl { .. } => "harness.invalid_url",
        };
        Some(code)
    }
}
