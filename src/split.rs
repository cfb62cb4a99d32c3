//! Splits a raw title into its artist part and its song part.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::MalformedTitleError;

/// A run of ASCII hyphens, en dashes or em dashes with whitespace on both
/// sides: " - ", " — ", " -- ", " –– ".
pub static ARTIST_SONG_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+[-–—]+\s+").unwrap());

/// Split on the first separator only; later dashes belong to the song.
///
/// The title is trimmed first, so a leading or trailing dash never counts.
pub fn split_title(raw: &str) -> Result<(&str, &str), MalformedTitleError> {
    let trimmed = raw.trim();
    let sep = ARTIST_SONG_SEPARATOR
        .find(trimmed)
        .ok_or_else(|| MalformedTitleError::MissingSeparator {
            title: raw.to_string(),
        })?;
    Ok((&trimmed[..sep.start()], &trimmed[sep.end()..]))
}
