//! Download cases and their outcomes

use photofetch_config::{CaseConfig, SAMPLE_PHOTOS};
use photofetch_errors::HarnessError;
use std::time::Duration;

/// A named URL the harness should be able to download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadCase {
    pub name: String,
    pub url: String,
}

impl DownloadCase {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// The sample photos shipped with the viewer
    #[must_use]
    pub fn samples() -> Vec<Self> {
        SAMPLE_PHOTOS
            .iter()
            .map(|(name, url)| Self::new(*name, *url))
            .collect()
    }

    /// A case named after its URL
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            name: url.clone(),
            url,
        }
    }
}

impl From<CaseConfig> for DownloadCase {
    fn from(case: CaseConfig) -> Self {
        Self::new(case.name, case.url)
    }
}

/// Result of running one case
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Passed { elapsed: Duration },
    Failed { error: HarnessError, elapsed: Duration },
}

impl CaseOutcome {
    #[must_use]
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }

    #[must_use]
    pub fn error(&self) -> Option<&HarnessError> {
        match self {
            Self::Passed { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match self {
            Self::Passed { elapsed } | Self::Failed { elapsed, .. } => *elapsed,
        }
    }

    /// Fail the calling test with the recorded message
    ///
    /// # Panics
    ///
    /// Panics with the failure message when the case did not pass.
    #[track_caller]
    pub fn assert_passed(&self) {
        if let Self::Failed { error, .. } = self {
            panic!("{error}");
        }
    }
}

/// One row of a [`HarnessReport`]
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub case: DownloadCase,
    pub outcome: CaseOutcome,
}

/// Outcomes of a run, in case order
#[derive(Debug, Clone, Default)]
pub struct HarnessReport {
    pub results: Vec<CaseResult>,
    pub elapsed: Duration,
}

impl HarnessReport {
    #[must_use]
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_passed()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Failures in case order
    pub fn failures(&self) -> impl Iterator<Item = &HarnessError> {
        self.results.iter().filter_map(|r| r.outcome.error())
    }
}
