use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;

use wordfall::clock::ManualClock;
use wordfall::config::{Config, FloorPolicy};
use wordfall::input::play_input;
use wordfall::runtime::{ChannelSource, GameEvent, Runner};
use wordfall::store::MemoryStore;
use wordfall::view::View;
use wordfall::{GameSession, SessionState, WordBank};

fn session(words: &[&str], policy: FloorPolicy) -> (GameSession<ManualClock>, ManualClock) {
    let settings = Config {
        vocabulary: Some(words.iter().map(|w| w.to_string()).collect()),
        floor_policy: policy,
        ..Config::default()
    }
    .validate()
    .unwrap();
    let bank = WordBank::with_rng(&settings.vocabulary, StdRng::seed_from_u64(3)).unwrap();
    let clock = ManualClock::new();
    let session = GameSession::new(
        settings,
        bank,
        Box::new(MemoryStore::new()),
        clock.clone(),
    );
    (session, clock)
}

fn key(c: char) -> GameEvent {
    GameEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

// Headless loop built from the runtime pieces without a TTY: keys come through a channel,
// time only moves when the runner wakes up.
#[test]
fn headless_typing_flow_scores() {
    let (mut session, clock) = session(&["hi"], FloorPolicy::Strict);
    let mut view = View::new(session.best_score());

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(ChannelSource::new(rx), Duration::from_millis(5));

    session.start();
    for c in "hihi".chars() {
        tx.send(key(c)).unwrap();
    }

    for _ in 0..20u32 {
        match runner.step(Some(Duration::from_millis(1))) {
            GameEvent::Key(k) => {
                if let Some(input) = play_input(&k) {
                    session.handle_input(input);
                }
            }
            GameEvent::Resize => {}
            GameEvent::Wake => clock.advance(Duration::from_millis(30)),
            GameEvent::InputClosed => panic!("sender is still alive"),
        }
        session.advance();
        view.apply_all(&session.drain_events());
    }

    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.current_score(), 2);
    assert_eq!(view.current, 2);
    assert_eq!(view.best, 2);
    assert_eq!(view.word.as_ref().map(|w| w.as_str()), Some("hi"));
    assert!(view.y > 0.0);
}

#[test]
fn headless_game_over_by_floor() {
    let (mut session, clock) = session(&["keyboard"], FloorPolicy::Strict);
    let mut view = View::new(0);
    session.start();

    // 360 units at 1.3 per 30ms tick is 276 ticks; give it plenty
    for _ in 0..400u32 {
        clock.advance(Duration::from_millis(30));
        session.advance();
        view.apply_all(&session.drain_events());
        if session.state() == SessionState::Over {
            break;
        }
    }

    assert_eq!(session.state(), SessionState::Over);
    assert!(view.final_score.is_some());
    assert_eq!(session.time_until_next_tick(), None);
    // 358 / 1.3 rounds up to 276 fall ticks
    assert_eq!(session.elapsed(), Duration::from_millis(276 * 30));
}

#[test]
fn headless_escape_stops_session() {
    let (mut session, clock) = session(&["cat"], FloorPolicy::Strict);
    session.start();

    let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
    session.handle_input(play_input(&esc).unwrap());

    assert_eq!(session.state(), SessionState::Idle);
    clock.advance(Duration::from_secs(30));
    session.advance();
    assert_eq!(session.state(), SessionState::Idle);
}
