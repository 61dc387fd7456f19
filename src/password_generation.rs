//! Utilities for generating passwords and passphrases.

use rand::{CryptoRng, Rng};

use crate::charset::{CharacterSet, PUNCTUATION};
use crate::sampler::SecureSampler;
use crate::{GenerationError, Secret};

/// Separator written after every word of a passphrase, the last one included.
pub const WORD_SEPARATOR: char = ' ';

/// The fewest extra characters [`expand_passphrase`] will mix in.
pub const MIN_EXTRA_CHARACTERS: usize = 2;

/// Generate a simple, impossible-to-guess password by just randomly sampling the given alphabet.
///
/// Characters are drawn independently, so repeats are expected.
pub fn generate_random_password<R>(
    sampler: &mut SecureSampler<R>,
    alphabet: &CharacterSet,
    len: usize,
) -> Result<Secret, GenerationError>
where
    R: Rng + CryptoRng,
{
    if len == 0 {
        return Err(GenerationError::InvalidCount);
    }
    let mut secret = String::with_capacity(len);
    for _ in 0..len {
        secret.push(*sampler.choice(alphabet.as_slice())?);
    }
    Ok(Secret(secret))
}

/// Generate a passphrase of `words` words drawn independently from `corpus`.
///
/// Each word is followed by [`WORD_SEPARATOR`], so the result ends with one.
pub fn generate_passphrase<R, S>(
    sampler: &mut SecureSampler<R>,
    corpus: &[S],
    words: usize,
) -> Result<Secret, GenerationError>
where
    R: Rng + CryptoRng,
    S: AsRef<str>,
{
    if words == 0 {
        return Err(GenerationError::InvalidCount);
    }
    let mut secret = String::new();
    for _ in 0..words {
        secret.push_str(sampler.choice(corpus)?.as_ref());
        secret.push(WORD_SEPARATOR);
    }
    Ok(Secret(secret))
}

/// Mix extra characters into a passphrase generated from `words` words.
///
/// The number of extra characters is drawn from `[0, words)` and raised to
/// [`MIN_EXTRA_CHARACTERS`] when smaller. They come from `extra`, or from [`PUNCTUATION`] when
/// `extra` is empty, and each one lands right after a distinct character of `phrase`. The
/// characters of `phrase` keep their order.
pub fn expand_passphrase<R>(
    sampler: &mut SecureSampler<R>,
    phrase: &str,
    words: usize,
    extra: &[char],
) -> Result<Secret, GenerationError>
where
    R: Rng + CryptoRng,
{
    if words == 0 {
        return Err(GenerationError::InvalidCount);
    }
    let count = sampler.uniform_index(words)?.max(MIN_EXTRA_CHARACTERS);

    let punctuation: Vec<char>;
    let pool = if extra.is_empty() {
        punctuation = PUNCTUATION.chars().collect();
        &punctuation[..]
    } else {
        extra
    };
    let mut additions = Vec::with_capacity(count);
    for _ in 0..count {
        additions.push(*sampler.choice(pool)?);
    }

    let phrase: Vec<char> = phrase.chars().collect();
    let positions = sampler.distinct_indices(phrase.len(), count)?;
    log::debug!(
        "mixing {} extra characters into a {} character passphrase",
        count,
        phrase.len()
    );

    let mut expanded = String::with_capacity(phrase.len() + count);
    let mut insertions = positions.into_iter().zip(additions).peekable();
    for (idx, ch) in phrase.into_iter().enumerate() {
        expanded.push(ch);
        if let Some((_, addition)) = insertions.next_if(|(pos, _)| *pos == idx) {
            expanded.push(addition);
        }
    }
    Ok(Secret(expanded))
}
