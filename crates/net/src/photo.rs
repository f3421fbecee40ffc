//! Photo downloads with a one-shot completion callback

use crate::client::NetClient;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use photofetch_errors::{Error, NetworkError};
use photofetch_events::{AppEvent, DownloadEvent, EventEmitter, FailureContext};
use reqwest::header::CONTENT_TYPE;
use tokio::task::JoinHandle;
use url::Url;

/// A fetched photo, kept in memory
#[derive(Debug, Clone)]
pub struct Photo {
    pub url: Url,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl Photo {
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Fetch a photo into memory
///
/// # Errors
///
/// Returns an error if the request fails, the server answers with a non-success
/// status, or the body exceeds the client's size limit.
pub async fn fetch_photo(
    client: &NetClient,
    url: &Url,
    events: &impl EventEmitter,
) -> Result<Photo, Error> {
    let result = fetch_photo_inner(client, url, events).await;

    match &result {
        Ok(photo) => events.emit(AppEvent::Download(DownloadEvent::Completed {
            url: url.to_string(),
            bytes_downloaded: photo.len() as u64,
            content_type: photo.content_type.clone(),
        })),
        Err(e) => events.emit(AppEvent::Download(DownloadEvent::Failed {
            url: url.to_string(),
            failure: FailureContext::from_error(e),
        })),
    }

    result
}

async fn fetch_photo_inner(
    client: &NetClient,
    url: &Url,
    events: &impl EventEmitter,
) -> Result<Photo, Error> {
    let limit = client.config().max_body_size;
    let response = client.get(url.as_str()).await?;

    if !response.status().is_success() {
        return Err(NetworkError::HttpError {
            status: response.status().as_u16(),
            message: response.status().to_string(),
        }
        .into());
    }

    let total_bytes = response.content_length();
    if let Some(size) = total_bytes.filter(|size| *size > limit) {
        return Err(NetworkError::TooLarge { size, limit }.into());
    }

    events.emit(AppEvent::Download(DownloadEvent::Started {
        url: url.to_string(),
        total_bytes,
    }));

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut body = BytesMut::with_capacity(
        usize::try_from(total_bytes.unwrap_or(0).min(limit)).unwrap_or_default(),
    );
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| NetworkError::DownloadFailed(e.to_string()))?;
        let size = (body.len() + chunk.len()) as u64;
        if size > limit {
            return Err(NetworkError::TooLarge { size, limit }.into());
        }
        body.extend_from_slice(&chunk);
    }

    Ok(Photo {
        url: url.clone(),
        content_type,
        bytes: body.freeze(),
    })
}

/// Download a photo on a background task and report through `completion`
///
/// `completion` runs exactly once with either the photo or the error. The
/// returned handle can be aborted to cancel the download, in which case the
/// completion never runs.
///
/// Must be called from within a tokio runtime.
pub fn download_photo<E, F>(client: &NetClient, url: Url, events: E, completion: F) -> JoinHandle<()>
where
    E: EventEmitter + Send + Sync + 'static,
    F: FnOnce(Option<Photo>, Option<Error>) + Send + 'static,
{
    let client = client.clone();
    tokio::spawn(async move {
        match fetch_photo(&client, &url, &events).await {
            Ok(photo) => completion(Some(photo), None),
            Err(e) => completion(None, Some(e)),
        }
    })
}
