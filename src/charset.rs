//! Character pools for password generation.

use crate::request::Mode;
use crate::GenerationError;

pub static DIGITS: &str = "0123456789";
pub static OCT_DIGITS: &str = "01234567";
pub static HEX_DIGITS_UPPER: &str = "0123456789ABCDEF";
pub static ASCII_LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub static PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// A non-empty pool of unique characters.
///
/// Characters are kept in the order they were first seen, so identical inputs always enumerate
/// identically.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CharacterSet(Vec<char>);

impl CharacterSet {
    /// Collect `chars` into a set, dropping repeats.
    pub fn from_chars<I>(chars: I) -> Result<CharacterSet, GenerationError>
    where
        I: IntoIterator<Item = char>,
    {
        let mut unique = Vec::new();
        for ch in chars {
            if !unique.contains(&ch) {
                unique.push(ch);
            }
        }
        if unique.is_empty() {
            return Err(GenerationError::EmptyResult);
        }
        Ok(CharacterSet(unique))
    }

    pub fn as_slice(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }
}

/// The characters a mode starts from, before any extras are mixed in.
pub fn base_characters(mode: Mode) -> String {
    match mode {
        Mode::Default => printable(),
        Mode::Alphanumeric => format!("{ASCII_LETTERS}{DIGITS}"),
        Mode::Binary => "01".to_owned(),
        Mode::Octal => OCT_DIGITS.to_owned(),
        Mode::Decimal => DIGITS.to_owned(),
        Mode::Hexadecimal => HEX_DIGITS_UPPER.to_owned(),
        // Passphrases draw words, not characters.
        Mode::Words => String::new(),
    }
}

/// Build the character set for `mode`.
///
/// With `extra` set, the given characters are mixed in, or all of [`PUNCTUATION`] if none were
/// given.
pub fn build(mode: Mode, extra: Option<&[char]>) -> Result<CharacterSet, GenerationError> {
    let mut chars: Vec<char> = base_characters(mode).chars().collect();
    match extra {
        Some(custom) if !custom.is_empty() => chars.extend_from_slice(custom),
        Some(_) => chars.extend(PUNCTUATION.chars()),
        None => (),
    }
    let set = CharacterSet::from_chars(chars)?;
    log::debug!("character set for {:?} has {} characters", mode, set.len());
    Ok(set)
}

/// Every printable ASCII character except whitespace.
fn printable() -> String {
    format!("{DIGITS}{ASCII_LETTERS}{PUNCTUATION}")
}
