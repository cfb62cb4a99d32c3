//! Bracketed tag extraction: "We're All Named Bob [rap metal] [1972]".

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// A non-nested `[...]` tag; group 1 is the tag text.
pub static BRACKET_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\[\]]+)\]").unwrap());

/// A tag that is exactly a year in 1900..=2029.
pub static YEAR_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:19\d{2}|20[0-2]\d)$").unwrap());

/// Result of tag extraction on the song part of a title.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaggedSong {
    /// Song text before the first tag, trimmed. Anything after the first
    /// tag (other tags, commentary) is dropped.
    pub song_title: String,
    pub subgenre: Option<String>,
    pub year: Option<u16>,
}

/// Parse a year tag, if `tag` is one.
pub fn parse_year(tag: &str) -> Option<u16> {
    let tag = tag.trim();
    if YEAR_TAG.is_match(tag) {
        tag.parse().ok()
    } else {
        None
    }
}

/// Pull every `[...]` tag out of `raw_song`.
///
/// The first year-like tag becomes the year; the first remaining tag
/// becomes the subgenre.
pub fn extract_tags(raw_song: &str) -> TaggedSong {
    let mut tags = BRACKET_TAG.captures_iter(raw_song).peekable();

    let first_start = match tags.peek().and_then(|caps| caps.get(0)) {
        Some(m) => m.start(),
        None => {
            return TaggedSong {
                song_title: raw_song.trim().to_string(),
                ..TaggedSong::default()
            }
        }
    };

    let mut year = None;
    let mut subgenre = None;
    for caps in tags {
        let tag = &caps[1];
        match (year, parse_year(tag)) {
            (None, Some(parsed)) => {
                debug!(year = parsed, "year tag");
                year = Some(parsed);
            }
            _ => {
                if subgenre.is_none() {
                    let label = tag.trim();
                    if !label.is_empty() {
                        debug!(subgenre = label, "subgenre tag");
                        subgenre = Some(label.to_string());
                    }
                }
            }
        }
    }

    TaggedSong {
        song_title: raw_song[..first_start].trim().to_string(),
        subgenre,
        year,
    }
}
