//! Submission envelope supplied by the fetch layer, and the merged record
//! written after parsing.

use serde::{Deserialize, Serialize};

use crate::models::ParsedTitle;

/// Flairs that mark a post as something other than a song share.
pub const NON_SONG_FLAIRS: [&str; 3] = ["Discussion", "Contest", "Announcement"];

/// Title marker used by discussion threads posted without a flair.
pub const DISCUSSION_MARKER: &str = "[Discussion]";

/// One post as delivered by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// UTC UNIX timestamp (seconds).
    pub timestamp: i64,
    #[serde(default)]
    pub flair: Option<String>,
    pub raw_title: String,
    #[serde(default)]
    pub author: Option<String>,
}

impl Submission {
    pub fn new(timestamp: i64, raw_title: impl Into<String>) -> Self {
        Self {
            timestamp,
            flair: None,
            raw_title: raw_title.into(),
            author: None,
        }
    }

    pub fn with_flair(mut self, flair: impl Into<String>) -> Self {
        self.flair = Some(flair.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Only song posts carry a parseable "Artist - Song" title.
    pub fn is_song(&self) -> bool {
        let non_song_flair = self
            .flair
            .as_deref()
            .is_some_and(|flair| NON_SONG_FLAIRS.contains(&flair));
        !non_song_flair && !self.raw_title.contains(DISCUSSION_MARKER)
    }
}

/// Envelope fields merged with the parsed title into one flat JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSubmission {
    pub timestamp: i64,
    pub flair: Option<String>,
    pub author: Option<String>,
    pub raw_title: String,
    #[serde(flatten)]
    pub title: ParsedTitle,
}

impl ParsedSubmission {
    pub fn new(submission: &Submission, title: ParsedTitle) -> Self {
        Self {
            timestamp: submission.timestamp,
            flair: submission.flair.clone(),
            author: submission.author.clone(),
            raw_title: submission.raw_title.clone(),
            title,
        }
    }
}
