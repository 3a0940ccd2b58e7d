use crate::config::ConfigError;
use include_dir::{include_dir, Dir};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use std::fmt;

static VOCAB_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/vocab");

/// A single falling word: non-empty, lowercase ascii letters only
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word(String);

impl Word {
    pub fn new(text: impl Into<String>) -> Result<Self, ConfigError> {
        let text = text.into();
        if text.is_empty() || !text.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(ConfigError::InvalidWord(text));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of letter slots; one byte per letter since words are ascii
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn letter_at(&self, idx: usize) -> Option<char> {
        self.0.as_bytes().get(idx).map(|b| *b as char)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize, Clone, Debug)]
struct Vocabulary {
    #[allow(dead_code)]
    name: String,
    words: Vec<String>,
}

/// The words shipped with the game
pub fn builtin_vocabulary() -> Vec<String> {
    VOCAB_DIR
        .get_file("default.json")
        .and_then(|file| file.contents_utf8())
        .and_then(|contents| serde_json::from_str::<Vocabulary>(contents).ok())
        .map(|vocab| vocab.words)
        .unwrap_or_default()
}

/// Fixed vocabulary with a uniform random picker
pub struct WordBank {
    words: Vec<Word>,
    rng: StdRng,
}

impl fmt::Debug for WordBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordBank")
            .field("words", &self.words)
            .finish_non_exhaustive()
    }
}

impl WordBank {
    pub fn new(words: &[String]) -> Result<Self, ConfigError> {
        Self::with_rng(words, StdRng::from_entropy())
    }

    pub fn with_rng(words: &[String], rng: StdRng) -> Result<Self, ConfigError> {
        let words = words
            .iter()
            .map(|w| Word::new(w.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        if words.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }

        Ok(Self { words, rng })
    }

    pub fn next_word(&mut self) -> Word {
        // construction guarantees at least one word
        self.words
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| self.words[0].clone())
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }
}
