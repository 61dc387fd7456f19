use std::io::{self, Write};
use std::process;

use anyhow::Context;
use clap::{CommandFactory, Parser};

use randompass::corpus::WordCorpus;
use randompass::{GenerationError, GenerationRequest, Mode, SecureSampler};

mod config;

/// Generate a random password or passphrase.
#[derive(Parser)]
#[command(
    name = "randompass",
    override_usage = "randompass [-h|-a|-b|-o|-d|-x|-u] [-e] | [-w] [-e]] number [custom-set]"
)]
struct Args {
    /// Number of characters (or words), a positive integer.
    #[arg(allow_negative_numbers = true)]
    number: Option<String>,
    /// A custom set of characters.
    #[arg(value_name = "custom-set")]
    custom_set: Vec<String>,
    /// Use alphanumeric ASCII only.
    #[arg(short, long)]
    alphanumeric: bool,
    /// Use binary digits only.
    #[arg(short, long)]
    binary: bool,
    /// Use octal digits only.
    #[arg(short, long)]
    octal: bool,
    /// Use decimal digits only.
    #[arg(short, long)]
    decimal: bool,
    /// Use hexadecimal digits only.
    #[arg(short = 'x', long)]
    hexadecimal: bool,
    /// Create a passphrase from English words.
    #[arg(short, long)]
    words: bool,
    /// Mix extra characters in. Uses custom-set if provided, or falls back to ASCII punctuation
    /// marks.
    #[arg(short, long)]
    extra_characters: bool,
    /// Update the word list and exit.
    #[arg(short, long)]
    update_words: bool,
    /// Log more; repeat for even more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Where the cached word list lives. Defaults to `$HOME/.randompass`.
    #[arg(long, env = "RANDOMPASS_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,
    /// Plain word list (one word per line) to build the cache from.
    #[arg(long, env = "RANDOMPASS_WORD_SOURCE")]
    word_source: Option<std::path::PathBuf>,
}

impl Args {
    fn mode_flags(&self) -> [(Mode, bool); 6] {
        [
            (Mode::Alphanumeric, self.alphanumeric),
            (Mode::Binary, self.binary),
            (Mode::Octal, self.octal),
            (Mode::Decimal, self.decimal),
            (Mode::Hexadecimal, self.hexadecimal),
            (Mode::Words, self.words),
        ]
    }

    fn extra(&self) -> Option<Vec<char>> {
        if self.extra_characters {
            Some(self.custom_set.iter().flat_map(|s| s.chars()).collect())
        } else {
            None
        }
    }
}

/// How a run ended, short of a hard failure.
#[derive(Debug, Eq, PartialEq)]
enum Outcome {
    Done,
    Usage(Option<&'static str>),
}

fn run(args: Args) -> Result<Outcome, ProgError> {
    let count = match randompass::request::parse_count(args.number.as_deref()) {
        Ok(n) => n,
        Err(_) if args.number.is_none() && args.update_words => {
            update_words(&args)?;
            return Ok(Outcome::Done);
        }
        Err(_) => return Ok(Outcome::Usage(None)),
    };

    let mut flags = args.mode_flags().to_vec();
    // `-u` takes a slot among the exclusive flags even though it isn't a mode.
    flags.push((Mode::Default, args.update_words));
    let mode = match Mode::from_flags(&flags) {
        Ok(mode) => mode,
        Err(GenerationError::ConflictingOptions) => {
            return Ok(Outcome::Usage(Some("Too many optional arguments given.")))
        }
        Err(err) => return Err(err.into()),
    };

    if args.update_words {
        update_words(&args)?;
        return Ok(Outcome::Done);
    }

    let request = GenerationRequest::new(mode, count, args.extra())?;
    log::debug!("generating with {:?}", request);
    let mut corpus = config::word_corpus(args.data_dir, args.word_source)?;
    let mut sampler = SecureSampler::from_thread_rng();
    let secret = randompass::generate(&request, &mut sampler, &mut corpus)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", secret.as_str()).context("failed to write to stdout")?;
    Ok(Outcome::Done)
}

fn update_words(args: &Args) -> Result<(), ProgError> {
    let mut corpus = config::word_corpus(args.data_dir.clone(), args.word_source.clone())?;
    log::info!("updating the word list from {}", corpus.source().display());
    corpus.refresh()?;
    Ok(())
}

fn print_usage(message: Option<&str>) {
    if let Some(message) = message {
        println!("{message}");
    }
    // Nothing useful left to do if stdout is gone.
    let _ = Args::command().print_help();
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            process::exit(0);
        }
    };
    config::init_logger(args.verbose);

    match run(args) {
        Ok(Outcome::Done) => (),
        Ok(Outcome::Usage(message)) => print_usage(message),
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error("{0}")]
    Generation(#[from] GenerationError),
    #[error("word list error: {0}")]
    Corpus(#[from] randompass::CorpusError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
