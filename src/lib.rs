//! Random passwords from character sets and passphrases from word lists.
//!
//! All randomness flows through [`sampler::SecureSampler`], which only accepts cryptographically
//! secure generators.

use serde::{Deserialize, Serialize};

pub mod charset;
pub mod corpus;
pub mod password_generation;
pub mod request;
pub mod sampler;

pub use charset::CharacterSet;
pub use corpus::{CorpusError, FileCorpus, MemoryCorpus, WordCorpus};
pub use request::{generate, GenerationRequest, Mode};
pub use sampler::SecureSampler;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("the number of characters or words must be a positive integer")]
    InvalidCount,
    #[error("only one of the character-set or word modes can be selected at a time")]
    ConflictingOptions,
    #[error("nothing to choose from: the character set or word list is empty")]
    EmptyDomain,
    #[error("the character set came out empty")]
    EmptyResult,
    #[error(
        "cannot place {requested} extra characters at distinct positions of a {available} \
         character passphrase"
    )]
    InsufficientPositions { requested: usize, available: usize },
    #[error("word list error: {0}")]
    Corpus(#[from] CorpusError),
}

/// A generated password or passphrase. Its `Debug` output never shows the contents.
#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}
