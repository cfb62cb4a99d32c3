use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use title_extract::batch::parse_submissions;
use title_extract::dictionary::{Dictionaries, DEFAULT_COMPOUND_ARTISTS_PATH, DEFAULT_GENRE_WORDS_PATH};
use title_extract::progress::{format_duration, set_log_only};
use title_extract::safety::validate_output_path;
use title_extract::{Submission, TitleParser};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InputFormat {
    /// One raw title per line
    Lines,
    /// JSON array of {timestamp, flair, raw_title, author} objects
    Json,
}

#[derive(Parser)]
#[command(name = "title-extract")]
#[command(about = "Parse \"Artist - Song [subgenre] [year]\" submission titles into JSON")]
struct Args {
    input: PathBuf,

    /// Output JSON file (stdout if omitted)
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "lines")]
    input_format: InputFormat,

    #[arg(long, default_value = DEFAULT_COMPOUND_ARTISTS_PATH)]
    compound_artists: PathBuf,

    #[arg(long, default_value = DEFAULT_GENRE_WORDS_PATH)]
    genre_words: PathBuf,

    /// Write batch statistics (and failures) to this JSON file
    #[arg(long)]
    stats: Option<PathBuf>,

    #[arg(long, default_value = "0")]
    workers: usize,

    /// Hide progress bars and log progress at intervals instead
    #[arg(long)]
    log_only: bool,

    #[arg(long)]
    pretty: bool,
}

fn read_submissions(path: &Path, format: InputFormat) -> Result<Vec<Submission>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open input {}", path.display()))?;

    match format {
        InputFormat::Lines => {
            let mut submissions = Vec::new();
            for line in BufReader::new(file).lines() {
                let line = line.context("Failed to read input line")?;
                let title = line.trim();
                if !title.is_empty() {
                    submissions.push(Submission::new(0, title));
                }
            }
            Ok(submissions)
        }
        InputFormat::Json => serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Input {} is not a JSON array of submissions", path.display())),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("title_extract=info")))
        .init();

    set_log_only(args.log_only);

    if args.workers > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.workers)
            .build_global()
            .context("Failed to set thread pool size")?;
    }

    if let Some(ref output) = args.output {
        validate_output_path(output, &[&args.input, &args.compound_artists, &args.genre_words])?;
    }
    if let Some(ref stats) = args.stats {
        validate_output_path(stats, &[&args.input, &args.compound_artists, &args.genre_words])?;
    }

    let start = Instant::now();

    let dictionaries = Dictionaries::load(&args.compound_artists, &args.genre_words)
        .context("Cannot run without dictionaries")?;
    let parser = TitleParser::new(dictionaries);

    let submissions = read_submissions(&args.input, args.input_format)?;
    info!("Read {} submissions from {:?}", submissions.len(), args.input);

    let report = parse_submissions(&parser, &submissions);
    report.stats.log_summary();

    let json = if args.pretty {
        serde_json::to_string_pretty(&report.parsed)?
    } else {
        serde_json::to_string(&report.parsed)?
    };

    match args.output {
        Some(ref path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write output {}", path.display()))?;
            info!("Wrote {} parsed titles to {:?}", report.parsed.len(), path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }

    if let Some(ref path) = args.stats {
        let summary = serde_json::json!({
            "stats": report.stats,
            "failures": report.failures,
            "elapsed_seconds": start.elapsed().as_secs_f64(),
        });
        std::fs::write(path, serde_json::to_string_pretty(&summary)?)
            .with_context(|| format!("Failed to write stats {}", path.display()))?;
    }

    info!("Done in {}", format_duration(start.elapsed()));
    Ok(())
}
