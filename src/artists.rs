//! Splits the artist part of a title into a primary artist and featured artists.
//!
//! Supported credit styles:
//! - "Eminem ft. Juice WRLD", "Korn feat. Ice Cube"
//! - "Flight Facilities feat. Broods, Reggie Watts, and Saro"
//! - "Yuki Koshimoto & Liam Tillyer", "Artist + Artist"
//! - "Yussef Dayes X Alfa Mist", "Jeremy Flower with Carla Kihlstedt"
//!
//! Names that only look like lists ("Black Country, New Road",
//! "Simon and Garfunkel") are protected by the compound artist dictionary,
//! and "and the" / "& the" is never a split point.

use once_cell::sync::Lazy;
use regex::{Match, Regex};

use crate::dictionary::Dictionary;

/// Featuring markers: " feat. ", " ft. ", " featuring " in any case; the
/// period-less " feat " and " ft " only in lowercase, so "Ft Worth" stays a name.
pub static FEATURING_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+(?:(?i:featuring)\s+|(?i:feat|ft)\.\s*|(?:feat|ft)\s+)").unwrap()
});

/// Conjunctions that split unless followed by "the": ", and ", " and ", "&".
static CONJUNCTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i),?\s+and\s+|\s*&\s*").unwrap());

/// Unconditional list separators: ",", "+", " x ", " with ".
static LIST_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*[,+]\s*|\s+x\s+|\s+with\s+").unwrap());

/// "King Gizzard and the Lizard Wizard", "Jess & the Ancient Ones", "Simon and Theodore".
static FOLLOWED_BY_THE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^the").unwrap());

/// Primary artist plus featured artists, in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistCredit {
    pub artist: String,
    pub featuring: Vec<String>,
}

/// Split `raw_artists` into individual names, in order of appearance.
/// Blank pieces (e.g. from "A, , B") are dropped.
pub fn split_artists(raw_artists: &str, compound_artists: &Dictionary) -> Vec<String> {
    FEATURING_MARKER
        .split(raw_artists)
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .flat_map(|group| {
            if compound_artists.contains(group) {
                vec![group]
            } else {
                split_list(group)
            }
        })
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// First name is the primary artist; `None` if there are no names at all.
pub fn parse_artists(raw_artists: &str, compound_artists: &Dictionary) -> Option<ArtistCredit> {
    let mut names = split_artists(raw_artists, compound_artists).into_iter();
    let artist = names.next()?;
    Some(ArtistCredit {
        artist,
        featuring: names.collect(),
    })
}

/// One left-to-right pass: at each step the earliest separator of either
/// kind becomes the boundary. On a tie the conjunction wins.
fn split_list(group: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut piece_start = 0;
    let mut cursor = 0;

    loop {
        let conjunction = next_conjunction(group, cursor);
        let list = LIST_SEPARATOR.find_at(group, cursor);
        let sep = match (conjunction, list) {
            (Some(c), Some(l)) if l.start() < c.start() => l,
            (Some(c), _) => c,
            (None, Some(l)) => l,
            (None, None) => break,
        };
        parts.push(&group[piece_start..sep.start()]);
        piece_start = sep.end();
        cursor = sep.end();
    }

    parts.push(&group[piece_start..]);
    parts
}

/// Next conjunction at or after `from` that is not followed by "the".
fn next_conjunction(text: &str, mut from: usize) -> Option<Match<'_>> {
    while let Some(m) = CONJUNCTION.find_at(text, from) {
        if !FOLLOWED_BY_THE.is_match(&text[m.end()..]) {
            return Some(m);
        }
        // Retry one character further so a shorter match inside the rejected one is still found.
        from = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
    }
    None
}
