pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use sevenmin::{
    app_dirs::AppDirs,
    chime::{Chime, SilentChime, TerminalBell},
    config::{Config, ConfigStore, FileConfigStore},
    logging::init_file_logging,
    plan::WorkoutPlan,
    runtime::{AppEvent, AppEventSource, CrosstermEventSource, FixedTicker, Runner, Ticker},
    session::{bundled_session_names, spawn_fetch, FileSessionLoader, SessionError, WorkoutSession},
    workout::{Workout, WorkoutEvent},
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use tracing::{info, warn};

/// seven minute workout timer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A seven minute workout timer: alternating exercise and rest intervals with a countdown, pause/resume, reset and a chime on every transition."
)]
pub struct Cli {
    /// seconds per exercise
    #[clap(short = 'a', long)]
    active_secs: Option<u64>,

    /// seconds per rest break
    #[clap(short = 'r', long)]
    rest_secs: Option<u64>,

    /// rest before the first exercise as well
    #[clap(long)]
    leading_break: bool,

    /// go straight into the first exercise, overriding a saved --leading-break
    #[clap(long, conflicts_with = "leading_break")]
    no_leading_break: bool,

    /// comma separated list of exercises to cycle through
    #[clap(short = 'e', long, value_delimiter = ',')]
    exercises: Option<Vec<String>>,

    /// session file to read from the workouts directory
    #[clap(short = 's', long)]
    session: Option<String>,

    /// directory containing the `workouts/` folder (defaults to the current directory)
    #[clap(long)]
    workouts_root: Option<PathBuf>,

    /// do not ring the terminal bell between intervals
    #[clap(short = 'm', long)]
    mute: bool,

    /// ring the bell again, overriding a saved --mute
    #[clap(long, conflicts_with = "mute")]
    no_mute: bool,

    /// persist the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,

    /// list the sessions bundled with the binary and exit
    #[clap(long)]
    list_sessions: bool,

    /// log debug output, including every tick
    #[clap(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    /// Layer command line flags over the stored configuration
    fn apply(&self, mut config: Config) -> Config {
        if let Some(secs) = self.active_secs {
            config.active_secs = secs;
        }
        if let Some(secs) = self.rest_secs {
            config.rest_secs = secs;
        }
        if self.leading_break {
            config.leading_break = true;
        } else if self.no_leading_break {
            config.leading_break = false;
        }
        if let Some(exercises) = &self.exercises {
            config.exercises = exercises
                .iter()
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect();
        }
        if self.session.is_some() {
            config.session = self.session.clone();
        }
        if self.workouts_root.is_some() {
            config.workouts_root = self.workouts_root.clone();
        }
        if self.mute {
            config.mute = true;
        } else if self.no_mute {
            config.mute = false;
        }
        config
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    None,
    Loading(String),
    Loaded {
        name: String,
        session: WorkoutSession,
    },
    Failed {
        name: String,
        reason: String,
    },
}

#[derive(Debug)]
pub struct App {
    pub workout: Workout,
    pub session: SessionStatus,
}

impl App {
    pub fn new(plan: WorkoutPlan, chime: Box<dyn Chime>) -> Self {
        Self {
            workout: Workout::new(plan, chime),
            session: SessionStatus::None,
        }
    }

    /// Handle a key press. Returns false when the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return true;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Enter | KeyCode::Char('n') => {
                self.workout.start_next_action();
            }
            KeyCode::Char(' ') => {
                // Space starts from the markers and pauses everywhere else
                if self.workout.awaiting_input() {
                    self.workout.start_next_action();
                } else {
                    self.workout.pause_toggle();
                }
            }
            KeyCode::Char('p') => self.workout.pause_toggle(),
            KeyCode::Char('r') => self.workout.reset(),
            _ => {}
        }
        true
    }

    pub fn on_tick(&mut self) {
        if let Some(WorkoutEvent::Advanced { from, to }) = self.workout.on_tick() {
            info!(from, to, "interval expired");
        }
    }

    pub fn on_session_loaded(&mut self, name: String, result: Result<WorkoutSession, SessionError>) {
        self.session = match result {
            Ok(session) => {
                info!(
                    session = %name,
                    exercises = ?session.workout,
                    "loaded workout session"
                );
                SessionStatus::Loaded { name, session }
            }
            Err(e) => {
                warn!(session = %name, "failed to load workout session: {e}");
                SessionStatus::Failed {
                    name,
                    reason: e.to_string(),
                }
            }
        };
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.list_sessions {
        for name in bundled_session_names() {
            println!("{name}");
        }
        return Ok(());
    }

    if let Some(log_path) = AppDirs::log_path() {
        if let Err(e) = init_file_logging(&log_path, cli.verbose) {
            eprintln!("logging disabled, cannot open {}: {e}", log_path.display());
        }
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!("saved config to {}", store.path().display());
    }

    let plan = match WorkoutPlan::from_config(&config.plan_config()) {
        Ok(plan) => plan,
        Err(e) => Cli::command().error(ErrorKind::InvalidValue, e).exit(),
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let chime: Box<dyn Chime> = if config.mute {
        Box::new(SilentChime)
    } else {
        Box::new(TerminalBell)
    };
    let mut app = App::new(plan, chime);
    info!(
        actions = app.workout.plan().len(),
        total_secs = app.workout.total_duration(),
        "starting workout"
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = CrosstermEventSource::new();
    if let Some(name) = &config.session {
        let root = config
            .workouts_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        spawn_fetch(FileSessionLoader::new(root), name.clone(), events.sender());
        app.session = SessionStatus::Loading(name.clone());
    }
    let mut runner = Runner::new(events, FixedTicker::default());

    let result = start_tui(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: AppEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if !app.on_key(key) {
                    break;
                }
            }
            AppEvent::SessionLoaded { name, result } => app.on_session_loaded(name, result),
        }
    }

    info!("quit");
    Ok(())
}
