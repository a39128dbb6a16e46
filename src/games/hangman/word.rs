use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::RoundError;

/// A validated secret word: one or more ASCII letters, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SecretWord(pub(super) String);

impl SecretWord {
    pub fn new(word: &str) -> Result<Self, RoundError> {
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(RoundError::InvalidWord(word.to_string()));
        }
        Ok(Self(word.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Letters in original order, repeats included.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(letter)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for SecretWord {
    type Err = RoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SecretWord {
    type Error = RoundError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<SecretWord> for String {
    fn from(word: SecretWord) -> Self {
        word.0
    }
}

impl AsRef<str> for SecretWord {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecretWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Uppercases a guessed letter, rejecting anything outside A-Z.
pub fn normalize_guess(letter: char) -> Result<char, RoundError> {
    if letter.is_ascii_alphabetic() {
        Ok(letter.to_ascii_uppercase())
    } else {
        Err(RoundError::InvalidGuess(letter.to_string()))
    }
}

/// Parses a typed guess. Surrounding whitespace is ignored; anything other
/// than exactly one letter is an [`RoundError::InvalidGuess`].
pub fn parse_guess(input: &str) -> Result<char, RoundError> {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => {
            normalize_guess(letter).map_err(|_| RoundError::InvalidGuess(trimmed.to_string()))
        }
        _ => Err(RoundError::InvalidGuess(trimmed.to_string())),
    }
}
