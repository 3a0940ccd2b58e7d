mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::OpenOptions,
    io::{self, stdin},
    path::{Path, PathBuf},
    time::Duration,
};
use wordfall::{
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore, FloorPolicy},
    input::{is_quit, play_input},
    runtime::{ChannelSource, EventSource, GameEvent, Runner},
    store::{JsonFileStore, KeyValueStore},
    view::View,
    GameSession, InputEvent, SessionState, WordBank,
};

/// Upper bound on how long the loop sleeps when no session timer is armed
const IDLE_WAIT: Duration = Duration::from_millis(100);

/// falling-word typing game
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type each falling word before it reaches the floor. Every finished word scores a point and speeds up the next one."
)]
pub struct Cli {
    /// config file to use instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// comma separated words to play with instead of the built-in list
    #[clap(short = 'w', long, value_delimiter = ',')]
    words: Option<Vec<String>>,

    /// missed words cost a point instead of ending the game (game over below -5)
    #[clap(long)]
    lenient: bool,

    /// distance a word falls per tick at the start of a game
    #[clap(long)]
    start_speed: Option<f64>,

    /// speed added after each finished word
    #[clap(long)]
    speed_step: Option<f64>,

    /// speed cap
    #[clap(long)]
    max_speed: Option<f64>,

    /// milliseconds between fall ticks
    #[clap(long)]
    fall_interval_ms: Option<u64>,

    /// append logs to this file; RUST_LOG sets the level (default info)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// print the effective configuration as JSON and exit
    #[clap(long)]
    print_config: bool,

    /// write the effective configuration to the config file and exit
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Layer command line flags over the loaded config
    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(words) = &self.words {
            config.vocabulary = Some(words.iter().map(|w| w.trim().to_string()).collect());
        }
        if self.lenient {
            config.floor_policy = FloorPolicy::lenient();
        }
        if let Some(speed) = self.start_speed {
            config.start_speed = speed;
        }
        if let Some(step) = self.speed_step {
            config.speed_step = step;
        }
        if let Some(max) = self.max_speed {
            config.max_speed = max;
        }
        if let Some(ms) = self.fall_interval_ms {
            config.fall_interval_ms = ms;
        }
        config
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    fn load_config(&self) -> Config {
        self.apply_overrides(self.config_store().load())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Menu,
    Guidelines,
    Playing,
}

pub struct App {
    pub session: GameSession,
    pub view: View,
    pub state: AppState,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: GameSession) -> Self {
        let view = View::new(session.best_score());
        Self {
            session,
            view,
            state: AppState::Menu,
            should_quit: false,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if is_quit(&key) {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Menu => match key.code {
                KeyCode::Enter | KeyCode::Char('s') => {
                    self.session.handle_input(InputEvent::StartRequested);
                    self.state = AppState::Playing;
                }
                KeyCode::Char('g') | KeyCode::Char('?') => self.state = AppState::Guidelines,
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            AppState::Guidelines => self.state = AppState::Menu,
            AppState::Playing => match self.session.state() {
                SessionState::Running => match play_input(&key) {
                    Some(InputEvent::StopRequested) => self.back_to_menu(),
                    Some(input) => self.session.handle_input(input),
                    None => {}
                },
                SessionState::Over => match key.code {
                    KeyCode::Char('r') | KeyCode::Enter => {
                        self.session.handle_input(InputEvent::StartRequested)
                    }
                    KeyCode::Char('m') | KeyCode::Esc => self.back_to_menu(),
                    KeyCode::Char('q') => self.should_quit = true,
                    _ => {}
                },
                SessionState::Idle => self.state = AppState::Menu,
            },
        }
    }

    fn back_to_menu(&mut self) {
        self.session.handle_input(InputEvent::StopRequested);
        self.state = AppState::Menu;
    }

    /// Run due ticks and fold the resulting events into the view
    pub fn sync(&mut self) {
        self.session.advance();
        let events = self.session.drain_events();
        self.view.apply_all(&events);
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = cli.load_config();

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let settings = match config.validate() {
        Ok(settings) => settings,
        Err(e) => Cli::command()
            .error(ErrorKind::ValueValidation, e)
            .exit(),
    };

    if cli.save_config {
        let store = cli.config_store();
        store.save(&config)?;
        println!("saved config to {}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let bank = WordBank::new(&settings.vocabulary)?;
    let store = JsonFileStore::new();
    log::info!(
        "starting with {} words, best score kept in {}",
        bank.words().len(),
        store.path().display()
    );
    let store: Box<dyn KeyValueStore> = Box::new(store);
    let mut app = App::new(GameSession::new(settings, bank, store, SystemClock));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    // stop the session before tearing down so nothing fires during cleanup
    app.session.handle_input(InputEvent::StopRequested);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(ChannelSource::terminal(), IDLE_WAIT);
    run_loop(terminal, app, &runner)
}

fn run_loop<B: Backend, S: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<S>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        match runner.step(app.session.time_until_next_tick()) {
            GameEvent::Key(key) => app.on_key(key),
            GameEvent::Resize | GameEvent::Wake => {}
            GameEvent::InputClosed => {
                log::warn!("terminal input closed, leaving");
                break;
            }
        }

        app.sync();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
