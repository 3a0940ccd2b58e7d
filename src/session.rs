use crate::clock::{Clock, SystemClock};
use crate::config::GameSettings;
use crate::events::{InputEvent, RenderEvent};
use crate::fall::{FallController, FallEvent};
use crate::schedule::{Schedule, Tick, TickKind};
use crate::score::{FloorOutcome, ScoreTracker};
use crate::store::KeyValueStore;
use crate::typing::{MatchResult, SlotState, TypingMatcher};
use crate::word_bank::{Word, WordBank};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionState {
    Idle,
    Running,
    Over,
}

/// One player's game: owns the word, the fall, the score and both timers
#[derive(Debug)]
pub struct GameSession<C: Clock = SystemClock> {
    settings: GameSettings,
    bank: WordBank,
    matcher: TypingMatcher,
    fall: FallController,
    score: ScoreTracker,
    schedule: Schedule,
    clock: C,
    state: SessionState,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    events: Vec<RenderEvent>,
}

impl<C: Clock> GameSession<C> {
    pub fn new(
        settings: GameSettings,
        mut bank: WordBank,
        store: Box<dyn KeyValueStore>,
        clock: C,
    ) -> Self {
        let matcher = TypingMatcher::new(bank.next_word());
        let fall = FallController::new(settings.fall);
        let score = ScoreTracker::new(settings.floor_policy, store);

        Self {
            settings,
            bank,
            matcher,
            fall,
            score,
            schedule: Schedule::new(),
            clock,
            state: SessionState::Idle,
            started_at: None,
            ended_at: None,
            events: Vec::new(),
        }
    }

    /// Idle/Over -> Running. Ignored while already running.
    pub fn start(&mut self) {
        if self.state == SessionState::Running {
            return;
        }

        // leftover ticks from a previous run must never reach the new one
        self.schedule.cancel_all();

        self.score.reset_session();
        self.matcher = TypingMatcher::new(self.bank.next_word());
        self.fall.reset_speed();
        self.fall.reset(self.settings.fall.spawn_offset);

        let now = self.clock.now();
        self.started_at = Some(now);
        self.ended_at = None;
        self.state = SessionState::Running;
        self.schedule.arm(
            now,
            self.settings.fall_interval,
            self.settings.clock_interval,
        );

        log::info!(
            "session started, best {} speed {:.2}",
            self.score.best(),
            self.fall.speed()
        );

        self.emit(RenderEvent::SessionStarted {
            best: self.score.best(),
        });
        self.emit_score();
        self.emit_word();
        self.emit(RenderEvent::ClockUpdated {
            elapsed: Duration::ZERO,
            throughput: 0.0,
        });
    }

    /// Running/Over -> Idle. Both timers are cancelled before this returns.
    pub fn stop(&mut self) {
        if self.state == SessionState::Idle {
            return;
        }

        self.schedule.cancel_all();
        log::info!(
            "session stopped at score {} (was {})",
            self.score.current(),
            self.state
        );
        self.state = SessionState::Idle;
        self.started_at = None;
        self.ended_at = None;
        self.emit(RenderEvent::SessionStopped);
    }

    pub fn handle_input(&mut self, input: InputEvent) {
        match input {
            InputEvent::StartRequested => self.start(),
            InputEvent::StopRequested => self.stop(),
            InputEvent::Letter(c) => self.type_letter(c),
            InputEvent::Backspace => self.backspace(),
        }
    }

    fn type_letter(&mut self, c: char) {
        if self.state != SessionState::Running {
            return;
        }
        let c = c.to_ascii_lowercase();
        if !c.is_ascii_lowercase() {
            log::trace!("ignoring key {:?}", c);
            return;
        }

        let result = self.matcher.append_letter(c);
        if result == MatchResult::Unchanged {
            return;
        }

        let index = self.matcher.typed_len() - 1;
        if self.matcher.slot_state(index) == SlotState::Correct {
            self.score.add_correct_chars(1);
        }
        self.emit_slot(index);

        match result {
            MatchResult::Completed => self.complete_word(),
            MatchResult::Mismatch => {
                log::debug!(
                    "typed {:?} does not match {}",
                    self.matcher.typed(),
                    self.matcher.word()
                );
            }
            MatchResult::Building | MatchResult::Unchanged => {}
        }
    }

    fn backspace(&mut self) {
        if self.state != SessionState::Running {
            return;
        }
        if self.matcher.delete_last_letter().is_some() {
            self.emit_slot(self.matcher.typed_len());
        }
    }

    fn complete_word(&mut self) {
        let new_best = self.score.on_word_completed();
        self.fall.increase_speed(self.settings.speed_step);
        log::debug!(
            "completed {} -> score {}{}, speed {:.2}",
            self.matcher.word(),
            self.score.current(),
            if new_best { " (new best)" } else { "" },
            self.fall.speed()
        );
        self.emit_score();
        self.spawn_word();
    }

    fn spawn_word(&mut self) {
        let word = self.bank.next_word();
        self.matcher.reset(word);
        self.fall.reset(self.settings.fall.spawn_offset);
        self.emit_word();
    }

    /// Runs every tick that is due now. Stops early if a tick ends the session.
    pub fn advance(&mut self) {
        let now = self.clock.now();
        while let Some(tick) = self.schedule.pop_due(now) {
            self.handle_tick(tick);
        }
    }

    /// Applies one tick; ticks from an earlier epoch are dropped
    pub fn handle_tick(&mut self, tick: Tick) {
        if self.state != SessionState::Running || tick.epoch != self.schedule.epoch() {
            return;
        }

        match tick.kind {
            TickKind::Fall => self.fall_tick(),
            TickKind::Clock => self.clock_tick(),
        }
    }

    fn fall_tick(&mut self) {
        let event = self.fall.tick();
        if event != FallEvent::Resting {
            self.emit(RenderEvent::PositionUpdated {
                y: self.fall.position(),
            });
        }

        if event != FallEvent::FloorReached {
            return;
        }

        log::debug!(
            "{} reached the floor at {:.1}",
            self.matcher.word(),
            self.fall.position()
        );

        match self.score.on_floor_reached() {
            FloorOutcome::SessionOver => self.game_over(),
            FloorOutcome::Continue => {
                self.emit(RenderEvent::WordMissed {
                    word: self.matcher.word().clone(),
                });
                self.emit_score();
                self.spawn_word();
            }
        }
    }

    fn clock_tick(&mut self) {
        let elapsed = self.elapsed();
        self.emit(RenderEvent::ClockUpdated {
            elapsed,
            throughput: self.score.throughput(elapsed),
        });
    }

    fn game_over(&mut self) {
        self.schedule.cancel_all();
        self.state = SessionState::Over;
        self.ended_at = Some(self.clock.now());

        log::info!(
            "game over: score {} best {}",
            self.score.current(),
            self.score.best()
        );

        self.emit(RenderEvent::SessionEnded {
            final_score: self.score.current(),
            best: self.score.best(),
        });
    }

    /// How long the event loop may block before the next tick is due
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.schedule
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(self.clock.now()))
    }

    pub fn drain_events(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Time since start; frozen at game over, zero when idle
    pub fn elapsed(&self) -> Duration {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            (Some(start), None) => self.clock.now().saturating_duration_since(start),
            _ => Duration::ZERO,
        }
    }

    pub fn throughput(&self) -> f64 {
        self.score.throughput(self.elapsed())
    }

    fn emit(&mut self, event: RenderEvent) {
        self.events.push(event);
    }

    fn emit_score(&mut self) {
        self.emit(RenderEvent::ScoreUpdated {
            current: self.score.current(),
            best: self.score.best(),
        });
    }

    fn emit_word(&mut self) {
        let word = self.matcher.word().clone();
        let slots = word.len();
        self.emit(RenderEvent::WordChanged { word, slots });
        self.emit(RenderEvent::PositionUpdated {
            y: self.fall.position(),
        });
    }

    fn emit_slot(&mut self, index: usize) {
        let slot = self.matcher.slot(index);
        self.emit(RenderEvent::SlotUpdated {
            index,
            letter: slot.letter,
            state: slot.state,
        });
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn current_score(&self) -> i64 {
        self.score.current()
    }

    pub fn best_score(&self) -> i64 {
        self.score.best()
    }

    pub fn active_word(&self) -> &Word {
        self.matcher.word()
    }

    pub fn matcher(&self) -> &TypingMatcher {
        &self.matcher
    }

    pub fn position(&self) -> f64 {
        self.fall.position()
    }

    pub fn speed(&self) -> f64 {
        self.fall.speed()
    }

    pub fn correct_chars(&self) -> u64 {
        self.score.correct_chars()
    }

    pub fn timers_armed(&self) -> bool {
        self.schedule.is_armed()
    }

    pub fn epoch(&self) -> u64 {
        self.schedule.epoch()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
