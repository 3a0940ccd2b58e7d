use crate::word_bank::Word;

/// Result of feeding one letter to the matcher
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchResult {
    /// prefix was already full; the letter was dropped
    Unchanged,
    Building,
    Completed,
    /// full length but wrong somewhere; stays on screen until backspaced
    Mismatch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Correct,
    Incorrect,
    Empty,
}

/// One letter box as the player sees it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub letter: Option<char>,
    pub state: SlotState,
}

/// Typed prefix for the active word
#[derive(Debug, Clone)]
pub struct TypingMatcher {
    word: Word,
    typed: Vec<char>,
}

impl TypingMatcher {
    pub fn new(word: Word) -> Self {
        Self {
            word,
            typed: Vec::new(),
        }
    }

    /// Switch to a new word with an empty prefix
    pub fn reset(&mut self, word: Word) {
        self.word = word;
        self.typed.clear();
    }

    pub fn append_letter(&mut self, c: char) -> MatchResult {
        let idx = self.typed.len();
        if idx >= self.word.len() {
            return MatchResult::Unchanged;
        }

        self.typed.push(c);

        if self.typed.len() < self.word.len() {
            MatchResult::Building
        } else if self.typed.iter().copied().eq(self.word.as_str().chars()) {
            MatchResult::Completed
        } else {
            MatchResult::Mismatch
        }
    }

    /// Returns the removed letter, if any
    pub fn delete_last_letter(&mut self) -> Option<char> {
        self.typed.pop()
    }

    pub fn slot_state(&self, idx: usize) -> SlotState {
        match self.typed.get(idx) {
            Some(c) if self.word.letter_at(idx) == Some(*c) => SlotState::Correct,
            Some(_) => SlotState::Incorrect,
            None => SlotState::Empty,
        }
    }

    pub fn slot(&self, idx: usize) -> Slot {
        Slot {
            letter: self.typed.get(idx).copied(),
            state: self.slot_state(idx),
        }
    }

    pub fn slots(&self) -> Vec<Slot> {
        (0..self.word.len()).map(|idx| self.slot(idx)).collect()
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn typed(&self) -> String {
        self.typed.iter().collect()
    }

    pub fn typed_len(&self) -> usize {
        self.typed.len()
    }
}
