//! Infers a subgenre from parenthetical text, for titles that used
//! "(post-rock)" instead of "[post-rock]".

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::dictionary::Dictionary;
use crate::misc::remove_spans;

/// A non-nested `(...)` group; group 1 is the inner text.
pub static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^()]+)\)").unwrap());

/// A "word" is a run of anything except whitespace, '.', '-', '/' or ','.
pub static GENRE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\s.\-/,]+").unwrap());

/// Song title with the inferred subgenre removed, if one was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredSubgenre {
    pub song_title: String,
    pub subgenre: Option<String>,
}

/// True if `text` has at least one word and every word is a genre word.
pub fn is_genre_phrase(text: &str, genre_words: &Dictionary) -> bool {
    let mut words = GENRE_WORD.find_iter(text).map(|m| m.as_str()).peekable();
    words.peek().is_some() && words.all(|word| genre_words.contains(word))
}

/// Pick the first parenthetical made only of genre words, take its text as
/// the subgenre and cut it (and its surrounding whitespace) out of `song`.
///
/// "Hello (It's Me)" is left alone because "It's" is not a genre word.
pub fn infer_subgenre(song: &str, genre_words: &Dictionary) -> InferredSubgenre {
    let found = PARENTHETICAL.captures_iter(song).find_map(|caps| {
        let whole = caps.get(0)?;
        let inner = caps.get(1)?;
        is_genre_phrase(inner.as_str(), genre_words).then(|| (whole.start(), whole.end(), inner.as_str()))
    });

    match found {
        Some((start, end, inner)) => {
            let subgenre = inner.trim().to_string();
            debug!(subgenre = subgenre.as_str(), "inferred subgenre from parenthetical");
            InferredSubgenre {
                song_title: remove_spans(song, &[(start, end)]).trim().to_string(),
                subgenre: Some(subgenre),
            }
        }
        None => InferredSubgenre {
            song_title: song.to_string(),
            subgenre: None,
        },
    }
}
