//! Core data models for title parsing.

use serde::{Deserialize, Serialize};

/// Structured form of one submission title.
///
/// Serializes as
/// `{"artist", "featuring", "song_title", "subgenre", "year"}` with `null`
/// for missing optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTitle {
    /// Primary performer, never empty.
    pub artist: String,
    /// Additional performers in order of appearance.
    pub featuring: Vec<String>,
    /// Song name with tags and annotations removed, never empty.
    pub song_title: String,
    pub subgenre: Option<String>,
    /// 1900..=2029 when present.
    pub year: Option<u16>,
}

impl ParsedTitle {
    pub fn new(artist: impl Into<String>, song_title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            featuring: Vec::new(),
            song_title: song_title.into(),
            subgenre: None,
            year: None,
        }
    }

    pub fn with_featuring<I, S>(mut self, featuring: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.featuring = featuring.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_subgenre(mut self, subgenre: impl Into<String>) -> Self {
        self.subgenre = Some(subgenre.into());
        self
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }
}

/// Where a [`ParsedTitle::subgenre`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubgenreSource {
    /// A `[...]` tag.
    Tag,
    /// A parenthetical made only of genre words.
    Parenthetical,
}

/// A parse result together with what was discarded along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub title: ParsedTitle,
    /// Annotations stripped from the song title ("(Live)", "~remix~", ...).
    pub annotations: Vec<String>,
    pub subgenre_source: Option<SubgenreSource>,
}
