use crate::events::InputEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Keys that mean something while a word is falling
pub fn play_input(key: &KeyEvent) -> Option<InputEvent> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    match key.code {
        KeyCode::Char(c) => Some(InputEvent::Letter(c)),
        KeyCode::Backspace | KeyCode::Delete => Some(InputEvent::Backspace),
        KeyCode::Esc => Some(InputEvent::StopRequested),
        _ => None,
    }
}
