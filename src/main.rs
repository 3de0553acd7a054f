//! Polarity - interactive sentiment filter.
//!
//! # Startup
//!
//! 1. Load `config.toml` (or defaults) and apply command-line overrides
//! 2. Pick the model type from `--mode` or an interactive prompt
//! 3. Load both corpus files and build a classification session
//! 4. Read sentences from stdin until `!q` or end of input
//!
//! # Commands
//!
//! - `!q`: quit
//! - `!reset`: forget every memoized probability
//! - anything else: classify the line

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use polarity::classifier::Classifier;
use polarity::config::Config;
use polarity::corpus::{Corpus, CountingMode};
use polarity::score::{Aggregation, Mode};
use polarity::{PolarityError, Verdict};

const QUIT: &str = "!q";
const RESET: &str = "!reset";

#[derive(Parser, Debug)]
#[command(name = "polarity")]
#[command(about = "Classify sentences as positive or negative from two labeled corpora")]
#[command(version)]
struct Args {
    /// Model type: B/bigram or U/unigram (prompted when omitted)
    #[arg(short, long)]
    mode: Option<String>,

    /// Positive corpus file (name must contain "pos")
    #[arg(long)]
    positive: Option<PathBuf>,

    /// Negative corpus file (name must contain "neg")
    #[arg(long)]
    negative: Option<PathBuf>,

    /// Seed for the bigram smoothing term
    #[arg(long)]
    seed: Option<u64>,

    /// Drop words seen this many times or fewer
    #[arg(long)]
    low: Option<u64>,

    /// Drop words seen this many times or more
    #[arg(long)]
    high: Option<u64>,

    /// Multiply bigram scores instead of keeping the last one
    #[arg(long)]
    product: bool,

    /// Count whole tokens instead of substrings
    #[arg(long)]
    token_counting: bool,

    /// Log per-sentence scores
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.positive {
            config.positive_corpus = path.clone();
        }
        if let Some(path) = &self.negative {
            config.negative_corpus = path.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(low) = self.low {
            config.low_threshold = low;
        }
        if let Some(high) = self.high {
            config.high_threshold = high;
        }
        if self.product {
            config.aggregation = Aggregation::Product;
        }
        if self.token_counting {
            config.counting = CountingMode::Token;
        }
    }
}

fn prompt(message: &str) -> io::Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn select_mode(arg: Option<&str>) -> Result<Mode, PolarityError> {
    let raw = match arg {
        Some(raw) => raw.to_string(),
        None => prompt("Model type [B: BIGRAM | U: UNIGRAM]: ")?.unwrap_or_default(),
    };
    raw.parse()
}

fn render(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Positive => "[+] positive: not filtered",
        Verdict::Negative => "[-] negative: filtered",
        Verdict::Unknown => "[?] unknown",
    }
}

fn run(classifier: &mut Classifier) -> io::Result<()> {
    while let Some(line) = prompt("> ")? {
        match line.trim() {
            QUIT => break,
            RESET => {
                classifier.reset();
                println!("Probability tables cleared");
            }
            sentence => match classifier.classify(sentence) {
                Ok(verdict) => println!("{}", render(verdict)),
                Err(e) => error!("Failed to classify sentence: {}", e),
            },
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = Config::load()?;

    // Persist defaults so users get a concrete config.toml on first run.
    if let Err(err) = config.save() {
        error!("Failed to persist config defaults: {err}");
    }
    args.apply(&mut config);

    let mode = select_mode(args.mode.as_deref())?;
    info!("Learning {} model", mode);

    let positive = Corpus::from_file(&config.positive_corpus, config.counting)?;
    let negative = Corpus::from_file(&config.negative_corpus, config.counting)?;
    let mut classifier = Classifier::new(positive, negative, config.classifier_options(mode))?;

    info!("Model ready. Type a sentence, {} to clear tables, {} to quit", RESET, QUIT);
    run(&mut classifier)?;

    Ok(())
}
