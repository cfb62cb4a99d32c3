//! Read-only lookup tables: compound artist names and genre vocabulary.
//!
//! Both are loaded once from JSON arrays of strings and never mutated.
//! Lookups go through [`crate::fuzzy`], so membership is substring-based.

use rustc_hash::FxHashSet;
use std::path::Path;
use tracing::{debug, info};

use crate::error::DictionaryError;
use crate::fuzzy;

/// Default location of the compound artist dictionary, relative to the crate root.
pub const DEFAULT_COMPOUND_ARTISTS_PATH: &str = "data/compound_artists.json";

/// Default location of the genre vocabulary, relative to the crate root.
pub const DEFAULT_GENRE_WORDS_PATH: &str = "data/genre_words.json";

/// An immutable set of dictionary entries, stored lowercased.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<String>,
}

impl Dictionary {
    /// Build from raw entries. Blank entries are dropped (an empty string
    /// would fuzzily match everything) and duplicates collapse, keeping the
    /// first occurrence.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = FxHashSet::default();
        let mut folded = Vec::new();
        for entry in entries {
            let entry = entry.as_ref().trim().to_lowercase();
            if entry.is_empty() {
                debug!("skipping blank dictionary entry");
                continue;
            }
            if seen.insert(entry.clone()) {
                folded.push(entry);
            }
        }
        Self { entries: folded }
    }

    /// Parse a JSON array of strings.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// Read and parse a dictionary file.
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let json = std::fs::read_to_string(path).map_err(|source| DictionaryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| DictionaryError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fuzzy membership test (see [`fuzzy::matches`]).
    pub fn contains(&self, candidate: &str) -> bool {
        let candidate = candidate.to_lowercase();
        self.entries
            .iter()
            .any(|entry| fuzzy::matches_folded(entry, &candidate))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The parser's configuration: both dictionaries, fully initialised before
/// the first parse and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dictionaries {
    pub compound_artists: Dictionary,
    pub genre_words: Dictionary,
}

impl Dictionaries {
    pub fn new(compound_artists: Dictionary, genre_words: Dictionary) -> Self {
        Self {
            compound_artists,
            genre_words,
        }
    }

    /// Load both dictionary files. Either failure is fatal.
    pub fn load(compound_artists: &Path, genre_words: &Path) -> Result<Self, DictionaryError> {
        let dictionaries = Self::new(Dictionary::load(compound_artists)?, Dictionary::load(genre_words)?);
        info!(
            compound_artists = dictionaries.compound_artists.len(),
            genre_words = dictionaries.genre_words.len(),
            "loaded dictionaries"
        );
        Ok(dictionaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_dictionary_folds_and_dedupes() {
        let dict = Dictionary::new(["Simon and Garfunkel", "simon and garfunkel", "  ", ""]);
        assert_eq!(dict.len(), 1);
        assert!(dict.contains("SIMON AND GARFUNKEL"));
    }

    #[test]
    fn test_dictionary_contains_is_fuzzy() {
        let dict = Dictionary::new(["post-rock", "djent"]);
        assert!(dict.contains("Post"));
        assert!(dict.contains("Djent"));
        assert!(dict.contains("atmospheric djent"));
        assert!(!dict.contains("polka"));
    }

    #[test]
    fn test_from_json() {
        let dict = Dictionary::from_json(r#"["rock", "jazz"]"#).unwrap();
        assert_eq!(dict.len(), 2);
        assert!(Dictionary::from_json(r#"{"rock": 1}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["Black Country, New Road"]"#).unwrap();
        let dict = Dictionary::load(file.path()).unwrap();
        assert!(dict.contains("black country, new road"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = Dictionary::load(&missing).unwrap_err();
        assert!(matches!(err, DictionaryError::Read { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = Dictionary::load(file.path()).unwrap_err();
        assert!(matches!(err, DictionaryError::Parse { .. }));
        assert!(err.to_string().contains("JSON array of strings"));
    }

    #[test]
    fn test_dictionaries_load_both() {
        let mut compound = tempfile::NamedTempFile::new().unwrap();
        write!(compound, r#"["Maps & Atlases"]"#).unwrap();
        let mut genres = tempfile::NamedTempFile::new().unwrap();
        write!(genres, r#"["rock", "metal"]"#).unwrap();

        let dicts = Dictionaries::load(compound.path(), genres.path()).unwrap();
        assert_eq!(dicts.compound_artists.len(), 1);
        assert_eq!(dicts.genre_words.len(), 2);
    }

    #[test]
    fn test_shipped_dictionaries_parse() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let dicts = Dictionaries::load(
            &root.join(DEFAULT_COMPOUND_ARTISTS_PATH),
            &root.join(DEFAULT_GENRE_WORDS_PATH),
        )
        .unwrap();
        assert!(!dicts.compound_artists.is_empty());
        assert!(!dicts.genre_words.is_empty());
    }
}
