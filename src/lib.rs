// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod events;
pub mod fall;
pub mod input;
pub mod runtime;
pub mod schedule;
pub mod score;
pub mod session;
pub mod store;
pub mod typing;
pub mod util;
pub mod view;
pub mod word_bank;

pub use config::{Config, ConfigError, FloorPolicy, GameSettings};
pub use events::{InputEvent, RenderEvent};
pub use session::{GameSession, SessionState};
pub use word_bank::{Word, WordBank};
