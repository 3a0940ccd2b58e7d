use crate::config::FloorPolicy;
use crate::store::KeyValueStore;
use std::fmt;
use std::time::Duration;

pub const BEST_SCORE_KEY: &str = "fallingWordsBestScore";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloorOutcome {
    SessionOver,
    Continue,
}

/// Current and best score plus the correct-character tally for throughput
pub struct ScoreTracker {
    current: i64,
    best: i64,
    correct_chars: u64,
    policy: FloorPolicy,
    store: Box<dyn KeyValueStore>,
}

impl fmt::Debug for ScoreTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoreTracker")
            .field("current", &self.current)
            .field("best", &self.best)
            .field("correct_chars", &self.correct_chars)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ScoreTracker {
    /// Builds a tracker and loads the stored best score
    pub fn new(policy: FloorPolicy, store: Box<dyn KeyValueStore>) -> Self {
        let mut tracker = Self {
            current: 0,
            best: 0,
            correct_chars: 0,
            policy,
            store,
        };
        tracker.best = tracker.load_best();
        tracker
    }

    /// Stored best score; anything missing or unparsable counts as 0.
    ///
    /// The whole trimmed value must be an integer: `"12abc"` and `"3.7"` are treated
    /// as corrupt rather than read up to the first non-digit.
    pub fn load_best(&self) -> i64 {
        match self.store.get(BEST_SCORE_KEY) {
            Some(raw) => raw.trim().parse::<i64>().unwrap_or_else(|_| {
                log::warn!("stored best score {:?} is not a number, using 0", raw);
                0
            }),
            None => 0,
        }
    }

    pub fn persist_best(&mut self) {
        if let Err(e) = self.store.set(BEST_SCORE_KEY, &self.best.to_string()) {
            log::warn!("failed to persist best score {}: {}", self.best, e);
        }
    }

    pub fn reset_session(&mut self) {
        self.current = 0;
        self.correct_chars = 0;
    }

    /// Returns true when the word set a new best
    pub fn on_word_completed(&mut self) -> bool {
        self.current += 1;
        if self.current > self.best {
            self.best = self.current;
            self.persist_best();
            true
        } else {
            false
        }
    }

    pub fn on_floor_reached(&mut self) -> FloorOutcome {
        match self.policy {
            FloorPolicy::Strict => FloorOutcome::SessionOver,
            FloorPolicy::Lenient {
                penalty,
                game_over_below,
            } => {
                self.current = self.current.saturating_sub(penalty);
                if self.current < game_over_below {
                    FloorOutcome::SessionOver
                } else {
                    FloorOutcome::Continue
                }
            }
        }
    }

    pub fn add_correct_chars(&mut self, count: u64) {
        self.correct_chars += count;
    }

    /// Correct characters per second
    pub fn throughput(&self, elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            self.correct_chars as f64 / secs
        } else {
            0.0
        }
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    pub fn best(&self) -> i64 {
        self.best
    }

    pub fn correct_chars(&self) -> u64 {
        self.correct_chars
    }
}
