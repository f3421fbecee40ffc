//! Fixed values shared by the harness and the CLI
//!
//! The sample photo URLs are the images the photo viewer ships with. They are
//! the default case list when no URLs are configured.

/// Seconds to wait for a download completion before failing the case.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const LOTS_OF_FACES: &str = "https://i.imgur.com/tPzTg7A.jpg";
pub const SUCCESS_KID: &str = "https://i.imgur.com/dZ5wRtb.png";
pub const OVERLY_ATTACHED_GIRLFRIEND: &str = "https://i.imgur.com/UvqEgCv.png";

/// Sample cases as `(name, url)` pairs, in display order.
pub const SAMPLE_PHOTOS: [(&str, &str); 3] = [
    ("lots_of_faces", LOTS_OF_FACES),
    ("success_kid", SUCCESS_KID),
    ("overly_attached_girlfriend", OVERLY_ATTACHED_GIRLFRIEND),
];

/// Directory for debug log files written by the CLI.
pub const LOG_DIR_NAME: &str = "photofetch/logs";
