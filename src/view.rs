use crate::events::RenderEvent;
use crate::typing::{Slot, SlotState};
use crate::word_bank::Word;
use std::time::Duration;

/// Final numbers shown on the game over overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    pub score: i64,
    pub best: i64,
}

/// What the screen shows, rebuilt purely from render events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    pub word: Option<Word>,
    pub slots: Vec<Slot>,
    pub y: f64,
    pub current: i64,
    pub best: i64,
    pub elapsed: Duration,
    pub throughput: f64,
    pub words_missed: u32,
    pub final_score: Option<FinalScore>,
}

impl View {
    pub fn new(best: i64) -> Self {
        Self {
            best,
            ..Self::default()
        }
    }

    pub fn apply(&mut self, event: &RenderEvent) {
        match event {
            RenderEvent::SessionStarted { best } => {
                *self = Self::new(*best);
            }
            RenderEvent::WordChanged { word, slots } => {
                self.word = Some(word.clone());
                self.slots = vec![
                    Slot {
                        letter: None,
                        state: SlotState::Empty,
                    };
                    *slots
                ];
            }
            RenderEvent::SlotUpdated {
                index,
                letter,
                state,
            } => {
                if let Some(slot) = self.slots.get_mut(*index) {
                    *slot = Slot {
                        letter: *letter,
                        state: *state,
                    };
                }
            }
            RenderEvent::PositionUpdated { y } => self.y = *y,
            RenderEvent::ScoreUpdated { current, best } => {
                self.current = *current;
                self.best = *best;
            }
            RenderEvent::ClockUpdated {
                elapsed,
                throughput,
            } => {
                self.elapsed = *elapsed;
                self.throughput = *throughput;
            }
            RenderEvent::WordMissed { .. } => self.words_missed += 1,
            RenderEvent::SessionEnded { final_score, best } => {
                self.best = *best;
                self.final_score = Some(FinalScore {
                    score: *final_score,
                    best: *best,
                });
            }
            RenderEvent::SessionStopped => {
                *self = Self::new(self.best);
            }
        }
    }

    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a RenderEvent>) {
        for event in events {
            self.apply(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn word_change_resets_slots() {
        let mut view = View::new(3);
        view.apply(&RenderEvent::WordChanged {
            word: word("cat"),
            slots: 3,
        });
        view.apply(&RenderEvent::SlotUpdated {
            index: 0,
            letter: Some('c'),
            state: SlotState::Correct,
        });
        assert_eq!(view.slots[0].letter, Some('c'));

        view.apply(&RenderEvent::WordChanged {
            word: word("dog"),
            slots: 3,
        });
        assert!(view.slots.iter().all(|s| s.state == SlotState::Empty));
        assert_eq!(view.word, Some(word("dog")));
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let mut view = View::new(0);
        view.apply(&RenderEvent::SlotUpdated {
            index: 4,
            letter: Some('x'),
            state: SlotState::Incorrect,
        });
        assert!(view.slots.is_empty());
    }

    #[test]
    fn session_end_and_stop() {
        let mut view = View::new(2);
        view.apply_all(&[
            RenderEvent::SessionStarted { best: 2 },
            RenderEvent::ScoreUpdated {
                current: 4,
                best: 4,
            },
            RenderEvent::SessionEnded {
                final_score: 4,
                best: 4,
            },
        ]);
        assert_eq!(view.final_score, Some(FinalScore { score: 4, best: 4 }));

        view.apply(&RenderEvent::SessionStopped);
        assert_eq!(view, View::new(4));
    }
}
