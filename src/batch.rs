//! Parallel batch parsing of submissions.
//!
//! A malformed title never aborts the batch: it is logged, counted and
//! reported, and the remaining titles are parsed as usual.

use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

use crate::models::SubgenreSource;
use crate::parser::TitleParser;
use crate::progress::{create_progress_bar, log_progress};
use crate::submission::{ParsedSubmission, Submission};

/// How often log-only mode reports batch progress.
const LOG_INTERVAL: u64 = 1_000;

/// A song submission whose title could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub timestamp: i64,
    pub raw_title: String,
    pub reason: &'static str,
    pub message: String,
}

/// Per-batch counters, written alongside the output for inspection.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub total: usize,
    pub non_song: usize,
    pub parsed: usize,
    pub failed: usize,
    pub failures_by_reason: BTreeMap<String, usize>,

    pub with_featuring: usize,
    pub with_year: usize,
    pub with_subgenre: usize,
    /// Subset of `with_subgenre` found in a parenthetical rather than a tag.
    pub inferred_subgenre: usize,
    pub annotations_stripped: usize,
}

impl BatchStats {
    /// Percentage of song submissions that parsed.
    pub fn parse_rate(&self) -> f64 {
        let songs = self.parsed + self.failed;
        if songs == 0 {
            0.0
        } else {
            100.0 * self.parsed as f64 / songs as f64
        }
    }

    pub fn log_summary(&self) {
        info!(
            total = self.total,
            non_song = self.non_song,
            parsed = self.parsed,
            failed = self.failed,
            "batch parsed ({:.1}% of songs)",
            self.parse_rate()
        );
    }
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Parsed songs, newest first.
    pub parsed: Vec<ParsedSubmission>,
    pub failures: Vec<BatchFailure>,
    pub stats: BatchStats,
}

enum Parsed {
    NonSong,
    Song {
        record: ParsedSubmission,
        source: Option<SubgenreSource>,
        annotations: usize,
    },
    Failed(BatchFailure),
}

/// Parse every song submission in parallel; skip the rest.
pub fn parse_submissions(parser: &TitleParser, submissions: &[Submission]) -> BatchReport {
    let total = submissions.len() as u64;
    let pb = create_progress_bar(total, "Parsing titles");
    let done = AtomicU64::new(0);

    let results: Vec<Parsed> = submissions
        .par_iter()
        .map(|submission| {
            let result = parse_one(parser, submission);
            pb.inc(1);
            let current = done.fetch_add(1, Ordering::Relaxed) + 1;
            log_progress("parse", current, total, LOG_INTERVAL);
            result
        })
        .collect();

    let mut report = BatchReport::default();
    report.stats.total = submissions.len();

    for result in results {
        match result {
            Parsed::NonSong => report.stats.non_song += 1,
            Parsed::Song {
                record,
                source,
                annotations,
            } => {
                let stats = &mut report.stats;
                stats.parsed += 1;
                stats.annotations_stripped += annotations;
                if !record.title.featuring.is_empty() {
                    stats.with_featuring += 1;
                }
                if record.title.year.is_some() {
                    stats.with_year += 1;
                }
                if record.title.subgenre.is_some() {
                    stats.with_subgenre += 1;
                }
                if source == Some(SubgenreSource::Parenthetical) {
                    stats.inferred_subgenre += 1;
                }
                report.parsed.push(record);
            }
            Parsed::Failed(failure) => {
                report.stats.failed += 1;
                *report
                    .stats
                    .failures_by_reason
                    .entry(failure.reason.to_string())
                    .or_default() += 1;
                report.failures.push(failure);
            }
        }
    }

    // Stable: equal timestamps keep input order.
    report.parsed.sort_by_key(|record| Reverse(record.timestamp));

    pb.finish_with_message(format!("Parsed {} titles", report.stats.parsed));
    report
}

fn parse_one(parser: &TitleParser, submission: &Submission) -> Parsed {
    if !submission.is_song() {
        return Parsed::NonSong;
    }
    match parser.parse_detailed(&submission.raw_title) {
        Ok(outcome) => Parsed::Song {
            annotations: outcome.annotations.len(),
            source: outcome.subgenre_source,
            record: ParsedSubmission::new(submission, outcome.title),
        },
        Err(err) => {
            warn!(timestamp = submission.timestamp, reason = err.reason(), "skipping title: {}", err);
            Parsed::Failed(BatchFailure {
                timestamp: submission.timestamp,
                raw_title: submission.raw_title.clone(),
                reason: err.reason(),
                message: err.to_string(),
            })
        }
    }
}
