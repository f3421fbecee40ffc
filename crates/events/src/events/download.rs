use serde::{Deserialize, Serialize};

use super::FailureContext;

/// Download lifecycle events emitted by the HTTP fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DownloadEvent {
    Started {
        url: String,
        total_bytes: Option<u64>,
    },
    Completed {
        url: String,
        bytes_downloaded: u64,
        content_type: Option<String>,
    },
    Failed {
        url: String,
        failure: FailureContext,
    },
}
