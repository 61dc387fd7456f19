//! What to generate, and the glue that turns a request into a secret.

use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::corpus::{self, WordCorpus};
use crate::password_generation::{expand_passphrase, generate_passphrase, generate_random_password};
use crate::sampler::SecureSampler;
use crate::{charset, GenerationError, Secret};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Printable ASCII, no whitespace.
    #[default]
    Default,
    Alphanumeric,
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
    /// A passphrase of dictionary words.
    Words,
}

impl Mode {
    /// Pick the one mode whose flag is set.
    ///
    /// No flag at all means [`Mode::Default`]; more than one is a conflict.
    pub fn from_flags(flags: &[(Mode, bool)]) -> Result<Mode, GenerationError> {
        let mut selected = flags.iter().filter(|(_, set)| *set).map(|(mode, _)| *mode);
        match (selected.next(), selected.next()) {
            (None, _) => Ok(Mode::Default),
            (Some(mode), None) => Ok(mode),
            (Some(_), Some(_)) => Err(GenerationError::ConflictingOptions),
        }
    }
}

/// Parse a user-supplied count of characters or words. Only positive integers are accepted.
pub fn parse_count(raw: Option<&str>) -> Result<usize, GenerationError> {
    let raw = raw.ok_or(GenerationError::InvalidCount)?;
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(GenerationError::InvalidCount),
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct GenerationRequest {
    mode: Mode,
    count: usize,
    /// `None` leaves extra characters out; `Some` of an empty list means ASCII punctuation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extra: Option<Vec<char>>,
}

impl GenerationRequest {
    pub fn new(
        mode: Mode,
        count: usize,
        extra: Option<Vec<char>>,
    ) -> Result<GenerationRequest, GenerationError> {
        if count == 0 {
            return Err(GenerationError::InvalidCount);
        }
        Ok(GenerationRequest { mode, count, extra })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn extra(&self) -> Option<&[char]> {
        self.extra.as_deref()
    }
}

/// Produce the secret described by `request`.
///
/// The word corpus is only consulted for [`Mode::Words`]; if it was never fetched it gets one
/// refresh before giving up.
pub fn generate<R>(
    request: &GenerationRequest,
    sampler: &mut SecureSampler<R>,
    corpus: &mut dyn WordCorpus,
) -> Result<Secret, GenerationError>
where
    R: Rng + CryptoRng,
{
    if request.count == 0 {
        return Err(GenerationError::InvalidCount);
    }
    match request.mode {
        Mode::Words => {
            let words = corpus::load_or_refresh(corpus)?;
            let phrase = generate_passphrase(sampler, &words, request.count)?;
            match request.extra() {
                Some(extra) => expand_passphrase(sampler, phrase.as_str(), request.count, extra),
                None => Ok(phrase),
            }
        }
        mode => {
            let alphabet = charset::build(mode, request.extra())?;
            generate_random_password(sampler, &alphabet, request.count)
        }
    }
}
