//! Submission title extraction library - shared modules for the batch binary.
//!
//! Turns "Artist feat. Guest - Song [subgenre] [year]" post titles into
//! [`ParsedTitle`] records using two read-only dictionaries.

pub mod artists;
pub mod batch;
pub mod dictionary;
pub mod error;
pub mod fuzzy;
pub mod misc;
pub mod models;
pub mod parenthetical;
pub mod parser;
pub mod progress;
pub mod safety;
pub mod split;
pub mod submission;
pub mod tags;

pub use dictionary::{Dictionaries, Dictionary};
pub use error::{DictionaryError, MalformedTitleError};
pub use models::{ParseOutcome, ParsedTitle, SubgenreSource};
pub use parser::TitleParser;
pub use submission::{ParsedSubmission, Submission};
