//! Where things live, and how loudly we talk about it.

use std::env;
use std::io::Write;
use std::path::PathBuf;

use log::Level;
use randompass::corpus::UNIX_WORDLIST;
use randompass::FileCorpus;

pub(crate) fn word_corpus(
    data_dir: Option<PathBuf>,
    word_source: Option<PathBuf>,
) -> anyhow::Result<FileCorpus> {
    let data_dir = match data_dir {
        Some(p) => p,
        None => default_data_dir()?,
    };
    let word_source = word_source.unwrap_or_else(|| PathBuf::from(UNIX_WORDLIST));
    Ok(FileCorpus::new(data_dir, word_source))
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    let home = env::var_os("HOME")
        .ok_or_else(|| anyhow::anyhow!("HOME is not set; cannot find home directory of user"))?;
    let mut p = PathBuf::from(home);
    p.push(".randompass");
    Ok(p)
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Set up `env_logger`. `RUST_LOG` wins over `-v`. Everything goes to stderr: stdout is for the
/// secret alone.
pub(crate) fn init_logger(verbose: u8) {
    let env = env_logger::Env::default().default_filter_or(level_for(verbose));
    env_logger::Builder::from_env(env)
        .format(|buf, record| {
            let marker = match record.level() {
                Level::Error | Level::Warn => "[!]",
                _ => "[*]",
            };
            writeln!(buf, "{marker} {}", record.args())
        })
        .target(env_logger::Target::Stderr)
        .init();
}
