use crate::typing::SlotState;
use crate::word_bank::Word;
use std::time::Duration;

/// Discrete player intents delivered to the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Letter(char),
    Backspace,
    StartRequested,
    StopRequested,
}

/// Everything the presentation layer needs to redraw, in emission order
#[derive(Clone, Debug, PartialEq)]
pub enum RenderEvent {
    SessionStarted {
        best: i64,
    },
    WordChanged {
        word: Word,
        slots: usize,
    },
    SlotUpdated {
        index: usize,
        letter: Option<char>,
        state: SlotState,
    },
    PositionUpdated {
        y: f64,
    },
    ScoreUpdated {
        current: i64,
        best: i64,
    },
    ClockUpdated {
        elapsed: Duration,
        throughput: f64,
    },
    /// word hit the floor but the session goes on
    WordMissed {
        word: Word,
    },
    SessionEnded {
        final_score: i64,
        best: i64,
    },
    SessionStopped,
}
