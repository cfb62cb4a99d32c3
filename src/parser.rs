//! Title parsing pipeline.
//!
//! ```text
//! Bob Marley feat. Bob Dylan, Bob Barker - We're All Named Bob [rap metal] [1972]
//! |-- (1) -|       |------- (2) -------|   |------ (3) ------| |-- (4) --| |(5)-|
//! ```
//!
//! 1. artist (mandatory)  2. featured artists  3. song title (mandatory)
//! 4. subgenre  5. year
//!
//! Stages run in a fixed order: split on the dash separator, split the
//! artist list, extract `[tags]`, strip annotations like "(Live)", and
//! finally infer a "(subgenre)" if no tag supplied one.
//!
//! Nothing else is removed: the raw title is always the artist text, the
//! separator, the song title, the stripped annotations and the tags.

use tracing::debug;

use crate::artists::parse_artists;
use crate::dictionary::Dictionaries;
use crate::error::MalformedTitleError;
use crate::misc::strip_annotations;
use crate::models::{ParseOutcome, ParsedTitle, SubgenreSource};
use crate::parenthetical::infer_subgenre;
use crate::split::split_title;
use crate::tags::extract_tags;

/// Parses raw submission titles against a fixed pair of dictionaries.
///
/// Holds no mutable state, so one parser can be shared across threads.
#[derive(Debug, Clone)]
pub struct TitleParser {
    dictionaries: Dictionaries,
}

impl TitleParser {
    pub fn new(dictionaries: Dictionaries) -> Self {
        Self { dictionaries }
    }

    pub fn dictionaries(&self) -> &Dictionaries {
        &self.dictionaries
    }

    pub fn parse(&self, raw: &str) -> Result<ParsedTitle, MalformedTitleError> {
        self.parse_detailed(raw).map(|outcome| outcome.title)
    }

    /// Like [`TitleParser::parse`], also returning stripped annotations and
    /// where the subgenre came from.
    pub fn parse_detailed(&self, raw: &str) -> Result<ParseOutcome, MalformedTitleError> {
        let (raw_artists, raw_song) = split_title(raw)?;

        let credit = parse_artists(raw_artists, &self.dictionaries.compound_artists).ok_or_else(|| {
            MalformedTitleError::EmptyArtist {
                title: raw.to_string(),
            }
        })?;

        let tagged = extract_tags(raw_song);
        let stripped = strip_annotations(&tagged.song_title);
        let mut song_title = stripped.text.trim().to_string();

        let mut subgenre_source = tagged.subgenre.as_ref().map(|_| SubgenreSource::Tag);
        let mut subgenre = tagged.subgenre;
        if subgenre.is_none() {
            let inferred = infer_subgenre(&song_title, &self.dictionaries.genre_words);
            if inferred.subgenre.is_some() {
                song_title = inferred.song_title;
                subgenre = inferred.subgenre;
                subgenre_source = Some(SubgenreSource::Parenthetical);
            }
        }

        if song_title.is_empty() {
            return Err(MalformedTitleError::EmptySongTitle {
                title: raw.to_string(),
            });
        }

        debug!(
            artist = credit.artist.as_str(),
            song_title = song_title.as_str(),
            featuring = credit.featuring.len(),
            "parsed title"
        );

        Ok(ParseOutcome {
            title: ParsedTitle {
                artist: credit.artist,
                featuring: credit.featuring,
                song_title,
                subgenre,
                year: tagged.year,
            },
            annotations: stripped.removed,
            subgenre_source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use proptest::prelude::*;

    fn parser() -> TitleParser {
        TitleParser::new(Dictionaries::new(
            Dictionary::new([
                "Black Country, New Road",
                "Simon and Garfunkel",
                "Maps & Atlases",
                "Jess & the Ancient Ones",
            ]),
            Dictionary::new(["rock", "post-rock", "metal", "jazz", "djent", "hardstyle", "electronic"]),
        ))
    }

    #[test]
    fn test_full_title() {
        let parsed = parser()
            .parse("Bob Marley feat. Bob Dylan, Bob Barker - We're All Named Bob [rap metal] [1972]")
            .unwrap();
        assert_eq!(
            parsed,
            ParsedTitle::new("Bob Marley", "We're All Named Bob")
                .with_featuring(["Bob Dylan", "Bob Barker"])
                .with_subgenre("rap metal")
                .with_year(1972)
        );
    }

    #[test]
    fn test_and_the_band_name() {
        let parsed = parser().parse("King Gizzard and the Lizard Wizard - Robot Stop").unwrap();
        assert_eq!(parsed.artist, "King Gizzard and the Lizard Wizard");
        assert!(parsed.featuring.is_empty());
        assert_eq!(parsed.song_title, "Robot Stop");
    }

    #[test]
    fn test_ampersand_split() {
        let parsed = parser().parse("Yuki Koshimoto & Liam Tillyer - Song").unwrap();
        assert_eq!(parsed.artist, "Yuki Koshimoto");
        assert_eq!(parsed.featuring, ["Liam Tillyer"]);
    }

    #[test]
    fn test_missing_separator() {
        let err = parser().parse("Just A Song Title [rock]").unwrap_err();
        assert!(matches!(err, MalformedTitleError::MissingSeparator { .. }));
    }

    #[test]
    fn test_known_titles() {
        let cases = [
            ("Alien Alarms - Polygon Sea", ParsedTitle::new("Alien Alarms", "Polygon Sea")),
            (
                "Stephen Malkmus & The Jicks - (Do Not Feed The) Oyster [freak folk / garage rock]",
                ParsedTitle::new("Stephen Malkmus & The Jicks", "(Do Not Feed The) Oyster")
                    .with_subgenre("freak folk / garage rock"),
            ),
            (
                "John Cale & Terry Riley - The Hall of Mirrors in the Palace of Versailles",
                ParsedTitle::new("John Cale", "The Hall of Mirrors in the Palace of Versailles")
                    .with_featuring(["Terry Riley"]),
            ),
            (
                "LITE, DÉ DÉ Mouse - Minatsuki Sunset",
                ParsedTitle::new("LITE", "Minatsuki Sunset").with_featuring(["DÉ DÉ Mouse"]),
            ),
            (
                "Estradasphere - The Bounty Hunter [jazz / avant-garde metal] [2001]",
                ParsedTitle::new("Estradasphere", "The Bounty Hunter")
                    .with_subgenre("jazz / avant-garde metal")
                    .with_year(2001),
            ),
            (
                "Bicurious - T.O.I [indie / math rock]",
                ParsedTitle::new("Bicurious", "T.O.I").with_subgenre("indie / math rock"),
            ),
            (
                "Al Di Meola - Egyptian Danza [oriental jazz-rock]",
                ParsedTitle::new("Al Di Meola", "Egyptian Danza").with_subgenre("oriental jazz-rock"),
            ),
            (
                "Black Country, New Road — Sunglasses",
                ParsedTitle::new("Black Country, New Road", "Sunglasses"),
            ),
        ];

        let parser = parser();
        for (raw, expected) in cases {
            assert_eq!(parser.parse(raw).unwrap(), expected, "title: {}", raw);
        }
    }

    #[test]
    fn test_song_title_keeps_later_dashes() {
        let parsed = parser().parse("Triple Agent - Explorer - Part 2").unwrap();
        assert_eq!(parsed.song_title, "Explorer - Part 2");
    }

    #[test]
    fn test_parenthetical_subgenre_when_no_tag() {
        let outcome = parser().parse_detailed("Some Band - Goodbye (post-rock)").unwrap();
        assert_eq!(outcome.title.song_title, "Goodbye");
        assert_eq!(outcome.title.subgenre.as_deref(), Some("post-rock"));
        assert_eq!(outcome.subgenre_source, Some(SubgenreSource::Parenthetical));
    }

    #[test]
    fn test_bracket_subgenre_beats_parenthetical() {
        let outcome = parser().parse_detailed("Some Band - Goodbye (post-rock) [shoegaze]").unwrap();
        assert_eq!(outcome.title.song_title, "Goodbye (post-rock)");
        assert_eq!(outcome.title.subgenre.as_deref(), Some("shoegaze"));
        assert_eq!(outcome.subgenre_source, Some(SubgenreSource::Tag));
    }

    #[test]
    fn test_annotations_stripped_and_reported() {
        let outcome = parser()
            .parse_detailed("Fleetwood Mac - Big Love (Live) (1987) [soft rock]")
            .unwrap();
        assert_eq!(outcome.title.song_title, "Big Love");
        assert_eq!(outcome.annotations, [" (Live) ", "(1987)"]);
        assert_eq!(outcome.title.year, None);
    }

    #[test]
    fn test_annotation_then_parenthetical_genre() {
        let parsed = parser().parse("Band - Track (Live) (djent)").unwrap();
        assert_eq!(parsed.song_title, "Track");
        assert_eq!(parsed.subgenre.as_deref(), Some("djent"));
    }

    #[test]
    fn test_quoted_title_keeps_quotes() {
        let parsed = parser().parse("Hanggai - \"Mongol Hiimori\" (2014, Mongolia)").unwrap();
        assert_eq!(parsed.song_title, "\"Mongol Hiimori\"");

        let parsed = TitleParser::new(Dictionaries::default()).parse("Band - \"Hello\"").unwrap();
        assert_eq!(parsed.song_title, "\"Hello\"");
    }

    #[test]
    fn test_empty_song_title() {
        let err = parser().parse("Some Band - [rock] [1999]").unwrap_err();
        assert!(matches!(err, MalformedTitleError::EmptySongTitle { .. }));
    }

    #[test]
    fn test_empty_artist() {
        let err = parser().parse("+ - Song").unwrap_err();
        assert!(matches!(err, MalformedTitleError::EmptyArtist { .. }));
    }

    proptest! {
        /// Without tags or genre parentheticals, the song title is the trimmed
        /// text after the separator and no subgenre or year is set.
        #[test]
        fn untagged_titles_keep_song_text(artist in "[A-Z][a-z]{2,10}", song in "[A-Z][a-z]{1,8}( [A-Z][a-z]{1,8}){0,3}") {
            let raw = format!("{} - {}  ", artist, song);
            let parsed = TitleParser::new(Dictionaries::default()).parse(&raw).unwrap();
            prop_assert_eq!(parsed.song_title, song);
            prop_assert_eq!(parsed.subgenre, None);
            prop_assert_eq!(parsed.year, None);
        }

        /// Putting the separator, annotations and tags back around the parsed
        /// fields rebuilds the raw title exactly.
        #[test]
        fn removed_parts_rebuild_raw_title(
            artist in "[A-Z][a-z]{2,10}",
            separator in prop::sample::select(vec![" - ", " -- ", " \u{2013} ", " \u{2014} "]),
            song in "\"?[A-Z][a-z]{1,8}( [A-Z][a-z]{1,8}){0,2}\"?",
            annotation in prop::option::of(prop::sample::select(vec!["(Live)", "(live at Wembley)", "(1999)", "(1990s)", "(RIP)", "~dub mix~"])),
            genre in prop::option::of("[a-z]{3,8}"),
            year in prop::option::of(1900u16..=2029),
        ) {
            let mut tags = String::new();
            if let Some(genre) = &genre {
                tags.push_str(&format!(" [{}]", genre));
            }
            if let Some(year) = year {
                tags.push_str(&format!(" [{}]", year));
            }
            let annotation = annotation.map(|a| format!(" {}", a)).unwrap_or_default();
            let raw = format!("{}{}{}{}{}", artist, separator, song, annotation, tags);

            let outcome = TitleParser::new(Dictionaries::default()).parse_detailed(&raw).unwrap();
            let rebuilt = format!(
                "{}{}{}{}{}",
                outcome.title.artist,
                separator,
                outcome.title.song_title,
                outcome.annotations.concat(),
                tags
            );
            prop_assert_eq!(rebuilt, raw);
            prop_assert_eq!(outcome.title.song_title, song);
            prop_assert_eq!(outcome.title.year, year);
        }

        /// Any in-range year tag becomes the year and never the subgenre.
        #[test]
        fn year_tags_are_extracted(year in 1900u16..=2029, genre in "[a-z]{3,10}") {
            let raw = format!("Artist - Song [{}] [{}]", genre, year);
            let parsed = TitleParser::new(Dictionaries::default()).parse(&raw).unwrap();
            prop_assert_eq!(parsed.year, Some(year));
            prop_assert_eq!(parsed.subgenre, Some(genre));
        }
    }
}
