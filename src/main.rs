//! `weat`: run a Word Embedding Association Test from the command line.
//!
//! # Usage
//!
//! ```bash
//! weat vectors.txt flowers.txt insects.txt pleasant.txt unpleasant.txt
//! weat --parallel --threads 8 --deadline-ms 600000 vectors.txt X.txt Y.txt A.txt B.txt
//! ```
//!
//! Prints the effect size and p-value, each with 16 fractional digits.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use weat::{load_word_list, Embeddings, Weat, WeatConfig};

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "weat")]
#[command(about = "Word Embedding Association Test: effect size and exact permutation p-value")]
struct Args {
    /// Vector file in word2vec/GloVe text format.
    vectors: PathBuf,

    /// Target word list X (one word per line).
    x: PathBuf,

    /// Target word list Y.
    y: PathBuf,

    /// Attribute word list A.
    a: PathBuf,

    /// Attribute word list B.
    b: PathBuf,

    /// JSON configuration file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enumerate partitions in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for parallel enumeration.
    #[arg(long)]
    threads: Option<usize>,

    /// Give up after this many milliseconds instead of reporting a p-value.
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// Use vectors exactly as stored instead of scaling them to unit length.
    #[arg(long)]
    no_normalize: bool,

    /// Output as JSON instead of "d p".
    #[arg(long)]
    json: bool,

    /// Log progress to stderr (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> anyhow::Result<WeatConfig> {
        let mut config = match &self.config {
            Some(path) => WeatConfig::from_path(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => WeatConfig::default(),
        };
        if self.parallel {
            config.parallel = true;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
            config.parallel = true;
        }
        if self.deadline_ms.is_some() {
            config.deadline_ms = self.deadline_ms;
        }
        if self.no_normalize {
            config.normalize = false;
        }
        config.validate()?;
        Ok(config)
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.config()?;

    let store = Embeddings::from_path(&args.vectors, config.normalize)
        .with_context(|| format!("loading vectors from {}", args.vectors.display()))?;

    let mut sets = Vec::with_capacity(4);
    for path in [&args.x, &args.y, &args.a, &args.b] {
        let words = load_word_list(path)
            .with_context(|| format!("reading word list {}", path.display()))?;
        sets.push(words);
    }
    info!(
        x = sets[0].len(),
        y = sets[1].len(),
        a = sets[2].len(),
        b = sets[3].len(),
        "word lists loaded"
    );

    let weat = Weat::with_config(&store, config);
    let report = weat.run_detailed(&sets[0], &sets[1], &sets[2], &sets[3])?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.result);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error: failed to install logger: {}", e);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
