use ratatui::Frame;

use crate::{
    ui::{render_guidelines, render_menu, render_play},
    App, AppState,
};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Title screen with best score and the start prompt
pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_menu(app, f.area(), f.buffer_mut());
    }
}

pub struct GuidelinesScreen;

impl Screen for GuidelinesScreen {
    fn render(&self, _app: &App, f: &mut Frame) {
        render_guidelines(f.area(), f.buffer_mut());
    }
}

/// Play area, letter boxes and, once the session is over, the game over overlay
pub struct PlayScreen;

impl Screen for PlayScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_play(app, f.area(), f.buffer_mut());
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Menu => Box::new(MenuScreen),
        AppState::Guidelines => Box::new(GuidelinesScreen),
        AppState::Playing => Box::new(PlayScreen),
    }
}
