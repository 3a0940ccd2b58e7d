use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// What the event loop wakes up for
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    /// the wait ran out; run due ticks and redraw
    Wake,
    /// nothing can send input any more; the loop has to end
    InputClosed,
}

/// Where the loop waits for input
pub trait EventSource {
    fn wait(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Events arriving over a channel, either from the terminal reader thread or from a test
pub struct ChannelSource {
    rx: Receiver<GameEvent>,
}

impl ChannelSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }

    /// Starts a thread that forwards key presses and resizes from the terminal.
    /// The channel closes when the terminal can no longer be read.
    pub fn terminal() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || forward_terminal_events(tx));
        Self::new(rx)
    }
}

impl EventSource for ChannelSource {
    fn wait(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

fn forward_terminal_events(tx: Sender<GameEvent>) {
    loop {
        let forwarded = match event::read() {
            // some platforms report releases too
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Release => continue,
            Ok(Event::Key(key)) => GameEvent::Key(key),
            Ok(Event::Resize(_, _)) => GameEvent::Resize,
            Ok(_) => continue,
            Err(e) => {
                log::error!("terminal input reader stopped: {}", e);
                return;
            }
        };
        if tx.send(forwarded).is_err() {
            return;
        }
    }
}

/// Turns "wait for input or the next session tick" into one blocking call
pub struct Runner<S: EventSource> {
    source: S,
    idle_wait: Duration,
}

impl<S: EventSource> Runner<S> {
    /// `idle_wait` bounds every wait, so the screen refreshes even with no timer armed
    pub fn new(source: S, idle_wait: Duration) -> Self {
        Self { source, idle_wait }
    }

    pub fn step(&self, until_tick: Option<Duration>) -> GameEvent {
        let timeout = until_tick.map_or(self.idle_wait, |d| d.min(self.idle_wait));

        match self.source.wait(timeout) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => GameEvent::Wake,
            Err(RecvTimeoutError::Disconnected) => GameEvent::InputClosed,
        }
    }
}
