//! Structured logging integration for events
//!
//! Converts domain events into tracing records with structured fields so the
//! file logs written in debug mode can be consumed by other tools.

use photofetch_events::{AppEvent, DownloadEvent, EventMessage, HarnessEvent};
use tracing::{debug, error, info, warn};

/// Log an event at the level its metadata carries
pub fn log_event_with_tracing(message: &EventMessage) {
    let event = &message.event;
    let meta = &message.meta;

    match event {
        AppEvent::Harness(harness_event) => match harness_event {
            HarnessEvent::CaseStarted { name, url, timeout } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation_id = ?meta.correlation_id,
                    case = %name,
                    url = %url,
                    timeout_ms = timeout.as_millis(),
                    "Case started"
                );
            }
            HarnessEvent::CasePassed { name, url, elapsed } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation_id = ?meta.correlation_id,
                    case = %name,
                    url = %url,
                    elapsed_ms = elapsed.as_millis(),
                    "Case passed"
                );
            }
            HarnessEvent::CaseFailed {
                name,
                url,
                elapsed,
                timed_out,
                failure,
            } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation_id = ?meta.correlation_id,
                    case = %name,
                    url = %url,
                    elapsed_ms = elapsed.as_millis(),
                    timed_out = timed_out,
                    code = ?failure.code,
                    message = %failure.message,
                    "Case failed"
                );
            }
            HarnessEvent::LateCompletion { url } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    url = %url,
                    "Completion arrived after timeout"
                );
            }
            HarnessEvent::RunCompleted {
                passed,
                failed,
                elapsed,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    passed = passed,
                    failed = failed,
                    elapsed_ms = elapsed.as_millis(),
                    "Run completed"
                );
            }
        },

        AppEvent::Download(download_event) => match download_event {
            DownloadEvent::Started { url, total_bytes } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    url = %url,
                    total_bytes = ?total_bytes,
                    "Download started"
                );
            }
            DownloadEvent::Completed {
                url,
                bytes_downloaded,
                content_type,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    url = %url,
                    bytes_downloaded = bytes_downloaded,
                    content_type = ?content_type,
                    "Download completed"
                );
            }
            DownloadEvent::Failed { url, failure } => {
                warn!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    url = %url,
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Download failed"
                );
            }
        },
    }
}
