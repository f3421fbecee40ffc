#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for photofetch
//!
//! This crate handles the HTTP side of photo downloads: a pooled client with
//! retry logic and the callback-style [`download_photo`] operation the
//! download harness drives.

mod client;
mod photo;

pub use client::{NetClient, NetConfig};
pub use photo::{download_photo, fetch_photo, Photo};

use photofetch_errors::{Error, NetworkError};
use url::Url;

/// Parse and validate a URL
///
/// Only `http` and `https` URLs are accepted.
///
/// # Errors
///
/// Returns an error if the URL string is malformed or uses another scheme.
pub fn parse_url(url: &str) -> Result<Url, Error> {
    let parsed = Url::parse(url)?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(NetworkError::InvalidUrl(format!("unsupported scheme '{other}'")).into()),
    }
}
