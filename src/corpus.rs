//! Word lists for passphrase generation.
//!
//! A [`WordCorpus`] hands out an already-filtered list of words and knows how to rebuild its cache
//! from wherever its words come from. Callers own the provider and pass it in; nothing here is
//! global.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where Unix systems usually keep a plain, one-word-per-line dictionary.
pub static UNIX_WORDLIST: &str = "/usr/share/dict/words";

/// Name of the cache file inside a [`FileCorpus`] data directory.
pub static CACHE_FILE_NAME: &str = "words.json";

pub trait WordCorpus {
    /// Return the cached words. Fails with a "not available" error if the cache was never built.
    fn load(&self) -> Result<Vec<String>, CorpusError>;

    /// Fetch the words again and replace the cache.
    fn refresh(&mut self) -> Result<(), CorpusError>;
}

/// Load the corpus, refreshing it once if it has never been fetched.
pub fn load_or_refresh<C: WordCorpus + ?Sized>(corpus: &mut C) -> Result<Vec<String>, CorpusError> {
    match corpus.load() {
        Err(err) if err.is_not_available() => {
            log::info!("word list not available yet; fetching it");
            corpus.refresh()?;
            corpus.load()
        }
        result => result,
    }
}

/// Reduce a raw word list to words worth putting in a passphrase.
///
/// Words are trimmed and lowercased; blanks, repeats, stop-words, words of two characters or
/// fewer, and anything with an apostrophe are dropped. Order is otherwise kept.
pub fn filter_words<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stop_words: HashSet<&str> = STOP_WORDS.iter().copied().collect();
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for word in raw {
        let word = word.as_ref().trim().to_lowercase();
        if word.chars().count() <= 2 || word.contains('\'') || stop_words.contains(word.as_str()) {
            continue;
        }
        if seen.insert(word.clone()) {
            words.push(word);
        }
    }
    words
}

/// A corpus held entirely in memory. Mostly useful for tests and embedding.
pub struct MemoryCorpus {
    source: Vec<String>,
    cached: Option<Vec<String>>,
}

impl MemoryCorpus {
    /// A corpus that will be filled from `source` on the first refresh.
    pub fn new<I, S>(source: I) -> MemoryCorpus
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemoryCorpus {
            source: source.into_iter().map(Into::into).collect(),
            cached: None,
        }
    }

    /// A corpus whose cache is already filled from `source`.
    pub fn refreshed<I, S>(source: I) -> MemoryCorpus
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut corpus = MemoryCorpus::new(source);
        corpus.cached = Some(filter_words(&corpus.source));
        corpus
    }
}

impl WordCorpus for MemoryCorpus {
    fn load(&self) -> Result<Vec<String>, CorpusError> {
        self.cached
            .clone()
            .ok_or_else(|| CorpusErrorRepr::NotAvailable.into())
    }

    fn refresh(&mut self) -> Result<(), CorpusError> {
        self.cached = Some(filter_words(&self.source));
        Ok(())
    }
}

/// A corpus cached as JSON in a data directory, refreshed from a plain word-list file.
pub struct FileCorpus {
    data_dir: PathBuf,
    source: PathBuf,
}

#[derive(Deserialize, Serialize)]
struct CachedWords {
    source: PathBuf,
    words: Vec<String>,
}

impl FileCorpus {
    pub fn new(data_dir: PathBuf, source: PathBuf) -> FileCorpus {
        FileCorpus { data_dir, source }
    }

    pub fn cache_path(&self) -> PathBuf {
        self.data_dir.join(CACHE_FILE_NAME)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    fn write_cache(&self, cached: &CachedWords) -> Result<(), CorpusErrorRepr> {
        fs::create_dir_all(&self.data_dir).map_err(CorpusErrorRepr::Io)?;
        // Write next to the cache and rename over it, so a reader never sees half a file.
        let mut temp_file =
            tempfile::NamedTempFile::new_in(&self.data_dir).map_err(CorpusErrorRepr::Io)?;
        serde_json::to_writer(&mut temp_file, cached).map_err(CorpusErrorRepr::Encode)?;
        temp_file.flush().map_err(CorpusErrorRepr::Io)?;
        temp_file
            .persist(self.cache_path())
            .map_err(|err| CorpusErrorRepr::Io(err.error))?;
        Ok(())
    }
}

impl WordCorpus for FileCorpus {
    fn load(&self) -> Result<Vec<String>, CorpusError> {
        let path = self.cache_path();
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(CorpusErrorRepr::NotAvailable.into())
            }
            Err(err) => return Err(CorpusErrorRepr::Io(err).into()),
        };
        let cached: CachedWords =
            serde_json::from_reader(BufReader::new(file)).map_err(CorpusErrorRepr::Decode)?;
        // A cache built from some other word list is as good as no cache.
        if cached.source != self.source {
            log::info!(
                "cached word list came from {}, not {}",
                cached.source.display(),
                self.source.display()
            );
            return Err(CorpusErrorRepr::NotAvailable.into());
        }
        log::debug!("loaded {} words from {}", cached.words.len(), path.display());
        Ok(cached.words)
    }

    fn refresh(&mut self) -> Result<(), CorpusError> {
        let raw = fs::read_to_string(&self.source).map_err(|err| CorpusErrorRepr::Fetch {
            source_path: self.source.clone(),
            err,
        })?;
        let words = filter_words(raw.lines());
        log::debug!(
            "refreshing word list from {}: kept {} words",
            self.source.display(),
            words.len()
        );
        self.write_cache(&CachedWords {
            source: self.source.clone(),
            words,
        })?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct CorpusError(CorpusErrorRepr);

impl CorpusError {
    /// Whether the corpus has simply never been fetched, which a refresh fixes.
    pub fn is_not_available(&self) -> bool {
        matches!(self.0, CorpusErrorRepr::NotAvailable)
    }
}

impl From<CorpusErrorRepr> for CorpusError {
    fn from(err: CorpusErrorRepr) -> CorpusError {
        CorpusError(err)
    }
}

#[derive(Debug, thiserror::Error)]
enum CorpusErrorRepr {
    #[error("the word list has not been downloaded yet")]
    NotAvailable,
    #[error("I/O error: {0}")]
    Io(io::Error),
    #[error("failed to read the word list at {}: {err}", source_path.display())]
    Fetch { source_path: PathBuf, err: io::Error },
    #[error("failed to decode the cached word list: {0}")]
    Decode(serde_json::Error),
    #[error("failed to encode the word list for caching: {0}")]
    Encode(serde_json::Error),
}

/// English stop-words, as shipped with NLTK.
pub static STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filtering() {
        let words = filter_words([
            "Apple", "apple", "an", "the", "through", "it's", "o'clock", "  zebra ", "", "ox",
            "kiwi",
        ]);
        assert_eq!(words, vec!["apple", "zebra", "kiwi"]);
    }

    #[test]
    fn stop_word_list_is_complete() {
        assert_eq!(STOP_WORDS.len(), 179);
    }

    #[test]
    fn memory_corpus_needs_a_refresh() {
        let mut corpus = MemoryCorpus::new(["lemon", "tiger"]);
        let err = corpus.load().unwrap_err();
        assert!(err.is_not_available());
        corpus.refresh().unwrap();
        assert_eq!(corpus.load().unwrap(), vec!["lemon", "tiger"]);
    }

    #[test]
    fn load_or_refresh_retries_once() {
        let mut corpus = MemoryCorpus::new(["lemon", "tiger", "no"]);
        assert_eq!(load_or_refresh(&mut corpus).unwrap(), vec!["lemon", "tiger"]);
    }

    struct NeverAvailable {
        refreshes: usize,
    }

    impl WordCorpus for NeverAvailable {
        fn load(&self) -> Result<Vec<String>, CorpusError> {
            Err(CorpusErrorRepr::NotAvailable.into())
        }

        fn refresh(&mut self) -> Result<(), CorpusError> {
            self.refreshes += 1;
            Ok(())
        }
    }

    #[test]
    fn second_failure_is_surfaced() {
        let mut corpus = NeverAvailable { refreshes: 0 };
        let err = load_or_refresh(&mut corpus).unwrap_err();
        assert!(err.is_not_available());
        assert_eq!(corpus.refreshes, 1);
    }

    struct Broken;

    impl WordCorpus for Broken {
        fn load(&self) -> Result<Vec<String>, CorpusError> {
            Err(CorpusErrorRepr::Io(io::Error::new(io::ErrorKind::Other, "disk on fire")).into())
        }

        fn refresh(&mut self) -> Result<(), CorpusError> {
            panic!("must not refresh on a hard failure");
        }
    }

    #[test]
    fn hard_failures_are_not_retried() {
        let err = load_or_refresh(&mut Broken).unwrap_err();
        assert!(!err.is_not_available());
    }
}
