//! Error types for title parsing and dictionary loading.
//!
//! Library code returns these typed errors; the binary wraps them with
//! `anyhow` context.

use std::path::PathBuf;
use thiserror::Error;

/// A single raw title could not be decomposed.
///
/// Fatal for that title only. Batch callers log it and move on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedTitleError {
    #[error("missing mandatory \" - \" separator between artist(s) and song: {title}")]
    MissingSeparator { title: String },

    #[error("no artist before the \" - \" separator: {title}")]
    EmptyArtist { title: String },

    #[error("no song title left after removing tags: {title}")]
    EmptySongTitle { title: String },
}

impl MalformedTitleError {
    /// The raw title that failed to parse.
    pub fn title(&self) -> &str {
        match self {
            MalformedTitleError::MissingSeparator { title }
            | MalformedTitleError::EmptyArtist { title }
            | MalformedTitleError::EmptySongTitle { title } => title,
        }
    }

    /// Short machine-friendly reason, used in batch stats and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            MalformedTitleError::MissingSeparator { .. } => "missing_separator",
            MalformedTitleError::EmptyArtist { .. } => "empty_artist",
            MalformedTitleError::EmptySongTitle { .. } => "empty_song_title",
        }
    }
}

/// Dictionary files are required; any failure here aborts startup.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dictionary {} is not a JSON array of strings: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
