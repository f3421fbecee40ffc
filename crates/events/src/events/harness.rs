use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::FailureContext;

/// Download harness events, one lifecycle per case
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HarnessEvent {
    /// A case began waiting on its completion
    CaseStarted {
        name: String,
        url: String,
        timeout: Duration,
    },

    /// The completion arrived without an error
    CasePassed {
        name: String,
        url: String,
        elapsed: Duration,
    },

    /// The completion reported an error, or the timeout expired first
    CaseFailed {
        name: String,
        url: String,
        elapsed: Duration,
        timed_out: bool,
        failure: FailureContext,
    },

    /// A completion arrived after its waiter had already given up
    LateCompletion { url: String },

    /// Every case in a run has finished
    RunCompleted {
        passed: usize,
        failed: usize,
        elapsed: Duration,
    },
}
