//! Screen-time extraction boundary.
//!
//! # Responsibility
//! - Define the narrow seam to an external text-recognition engine.
//! - Parse an hour count out of recognized text and classify it against
//!   the daily limit.
//! - Persist uploaded screenshots keyed by original file name.
//!
//! # Invariants
//! - Core carries no dependency on any image or OCR crate.
//! - Recognition failures never propagate past [`read_screen_time`]; the
//!   result degrades to `0.0` hours.

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// Daily screen-time limit in hours. Strictly above it counts as exceeded.
pub const SCREEN_TIME_LIMIT_HOURS: f64 = 2.5;

/// Matches "3h 45m" style durations or "2.5 hours" style decimals.
static HOURS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*h\s*(\d+)\s*m|(\d+\.?\d*)\s*hours?")
        .expect("screen-time pattern must compile")
});

pub type ScreenTimeResult<T> = Result<T, ScreenTimeError>;

/// Failure raised by a text-recognition backend.
#[derive(Debug)]
pub enum ScreenTimeError {
    /// The image bytes could not be decoded by the backend.
    ImageDecode(String),
    /// The recognition engine itself failed.
    Recognition(String),
}

impl Display for ScreenTimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImageDecode(message) => write!(f, "image decode failed: {message}"),
            Self::Recognition(message) => write!(f, "text recognition failed: {message}"),
        }
    }
}

impl Error for ScreenTimeError {}

/// Narrow interface to whatever OCR engine the embedding program wires in.
///
/// Implementations receive raw PNG/JPEG bytes and return the recognized
/// plain text.
pub trait TextRecognizer {
    fn recognize(&self, image: &[u8]) -> ScreenTimeResult<String>;
}

/// Extracts the first hour count found in recognized text.
///
/// `"3h 15m"` parses to `3.25`; `"2.5 hours"` parses to `2.5`. Returns
/// `None` when no duration pattern is present.
pub fn parse_hours(text: &str) -> Option<f64> {
    let captures = HOURS_PATTERN.captures(text)?;

    if let Some(decimal) = captures.get(3) {
        return decimal.as_str().parse::<f64>().ok();
    }

    let hours = captures.get(1)?.as_str().parse::<f64>().ok()?;
    let minutes = captures.get(2)?.as_str().parse::<f64>().ok()?;
    Some(hours + minutes / 60.0)
}

/// Runs recognition over a screenshot and returns extracted hours.
///
/// Fails closed: any backend error or unparseable text yields `0.0` with
/// a warning log, never an error.
pub fn read_screen_time(recognizer: &dyn TextRecognizer, image: &[u8]) -> f64 {
    let text = match recognizer.recognize(image) {
        Ok(text) => text,
        Err(err) => {
            warn!("event=screen_time_read module=screen_time status=error error={err}");
            return 0.0;
        }
    };

    match parse_hours(&text) {
        Some(hours) => hours,
        None => {
            warn!("event=screen_time_read module=screen_time status=no_match");
            0.0
        }
    }
}

/// Presentational classification against [`SCREEN_TIME_LIMIT_HOURS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTimeVerdict {
    WithinLimit,
    Exceeded,
}

/// Hours plus their limit classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTimeReport {
    pub hours: f64,
    pub verdict: ScreenTimeVerdict,
}

/// Classifies an extracted hour count against the fixed limit.
pub fn classify(hours: f64) -> ScreenTimeReport {
    let verdict = if hours > SCREEN_TIME_LIMIT_HOURS {
        ScreenTimeVerdict::Exceeded
    } else {
        ScreenTimeVerdict::WithinLimit
    };
    ScreenTimeReport { hours, verdict }
}

/// Saves an uploaded screenshot under `dir`, keyed by its original file
/// name. Last write wins on a name collision.
///
/// Only the final path component of `original_name` is used, so callers
/// cannot escape `dir`.
pub fn save_screenshot(
    dir: impl AsRef<Path>,
    original_name: &str,
    bytes: &[u8],
) -> std::io::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let file_name = Path::new(original_name)
        .file_name()
        .ok_or_else(|| std::io::Error::other(format!("invalid file name `{original_name}`")))?;
    let target = dir.join(file_name);
    fs::write(&target, bytes)?;
    Ok(target)
}
