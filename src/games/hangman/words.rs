use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, warn};

use super::word::SecretWord;

/// Supplies the secret word for each new round.
pub trait WordProvider {
    fn next_word(&mut self) -> SecretWord;
}

impl<W: WordProvider + ?Sized> WordProvider for Box<W> {
    fn next_word(&mut self) -> SecretWord {
        (**self).next_word()
    }
}

/// Always hands out the same word.
#[derive(Debug, Clone)]
pub struct FixedWord(SecretWord);

impl FixedWord {
    pub const DEFAULT: &'static str = "HANGMAN";

    pub fn new(word: SecretWord) -> Self {
        Self(word)
    }
}

impl Default for FixedWord {
    fn default() -> Self {
        Self(SecretWord(Self::DEFAULT.to_string()))
    }
}

impl WordProvider for FixedWord {
    fn next_word(&mut self) -> SecretWord {
        self.0.clone()
    }
}

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("failed to read word list {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("word list {0} contains no usable words")]
    Empty(String),
}

pub const BUILTIN_WORDS: &[&str] = &[
    "HANGMAN", "GALLOWS", "TERMINAL", "KEYBOARD", "PUZZLE", "LANTERN", "RUSTACEAN", "COMPILER",
    "BORROW", "LIFETIME", "ITERATOR", "CLOSURE", "TRAIT", "MACRO", "THREAD", "SOCKET", "BUFFER",
    "VECTOR", "PATTERN", "JOURNEY",
];

/// Draws words uniformly at random from a validated list.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<SecretWord>,
    rng: StdRng,
}

impl WordList {
    pub fn new(words: Vec<SecretWord>) -> Result<Self, WordListError> {
        Self::with_rng(words, StdRng::from_os_rng())
    }

    pub fn with_rng(words: Vec<SecretWord>, rng: StdRng) -> Result<Self, WordListError> {
        if words.is_empty() {
            return Err(WordListError::Empty("<memory>".into()));
        }
        Ok(Self { words, rng })
    }

    pub fn seeded(words: Vec<SecretWord>, seed: u64) -> Result<Self, WordListError> {
        Self::with_rng(words, StdRng::seed_from_u64(seed))
    }

    pub fn builtin() -> Self {
        let words = BUILTIN_WORDS
            .iter()
            .map(|w| SecretWord(w.to_string()))
            .collect();
        Self {
            words,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Parses newline-separated words. Blank lines and `#` comments are
    /// skipped; entries that are not plain words are dropped with a warning.
    pub fn parse(source: &str, name: &str) -> Result<Vec<SecretWord>, WordListError> {
        let mut words = Vec::new();
        for (lineno, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match SecretWord::new(line) {
                Ok(word) => words.push(word),
                Err(e) => warn!(list = name, line = lineno + 1, error = %e, "skipping word"),
            }
        }
        if words.is_empty() {
            return Err(WordListError::Empty(name.to_string()));
        }
        Ok(words)
    }

    pub fn from_file(path: &Path) -> Result<Self, WordListError> {
        let source = fs::read_to_string(path).map_err(|source| WordListError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let words = Self::parse(&source, &path.display().to_string())?;
        debug!(path = %path.display(), count = words.len(), "loaded word list");
        Self::new(words)
    }

    pub fn words(&self) -> &[SecretWord] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordProvider for WordList {
    fn next_word(&mut self) -> SecretWord {
        match self.words.choose(&mut self.rng) {
            Some(word) => word.clone(),
            // Non-empty by construction.
            None => FixedWord::default().next_word(),
        }
    }
}
