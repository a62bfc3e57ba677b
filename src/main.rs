pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
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
    io::{self, stdin},
    path::PathBuf,
};
use studytrack::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging::init_file_logging,
    runtime::{ChannelEventSource, Clock, EventSource, FixedTicker, Runner, StudyEvent, Ticker},
    DailyGoal, StudyError, Tracker,
};
use tracing::info;

/// terminal study-session timer with a journal and daily goal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Time your study sessions, keep a journal of completed sessions and track today's total against a daily goal."
)]
pub struct Cli {
    /// daily goal in seconds (overrides the config file)
    #[clap(short = 'g', long, value_parser = DailyGoal::parse)]
    goal: Option<DailyGoal>,

    /// how often the screen refreshes without input, in milliseconds
    #[clap(short = 't', long)]
    tick_rate: Option<u64>,

    /// read settings from this file instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// write the effective settings to the config file and exit
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Apply command line overrides on top of the loaded config
    fn resolve(&self, base: Config) -> Config {
        Config {
            daily_goal_secs: self.goal.map(|g| g.secs()).unwrap_or(base.daily_goal_secs),
            tick_rate_ms: self.tick_rate.unwrap_or(base.tick_rate_ms),
        }
    }

    fn config_store(&self) -> FileConfigStore {
        self.config
            .as_ref()
            .map(FileConfigStore::with_path)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Journal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub tracker: Tracker,
    pub view: View,
    /// Highlighted journal row.
    pub selected: usize,
    /// Goal text being typed, `None` when not editing.
    pub goal_input: Option<String>,
}

impl App {
    pub fn new(goal: DailyGoal) -> Self {
        Self {
            tracker: Tracker::new(goal),
            view: View::Home,
            selected: 0,
            goal_input: None,
        }
    }

    /// Credit seconds reported by the runner; returns how many counted.
    pub fn credit(&mut self, seconds: u64) -> u64 {
        if seconds == 0 {
            return 0;
        }
        self.tracker.advance(seconds)
    }

    pub fn is_timing(&self) -> bool {
        self.tracker.timer().is_running()
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Home => View::Journal,
            View::Journal => View::Home,
        };
        self.clamp_selection();
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tracker.journal().len() {
            self.selected += 1;
        }
    }

    pub fn delete_selected(&mut self) {
        self.tracker.delete_entry(self.selected);
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.tracker.journal().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn begin_goal_edit(&mut self) {
        self.goal_input = Some(self.tracker.goal().secs().to_string());
    }

    pub fn commit_goal(&mut self) {
        if let Some(text) = self.goal_input.take() {
            self.tracker.set_goal_text(&text);
        }
    }

    pub fn cancel_goal(&mut self) {
        self.goal_input = None;
    }

    pub fn is_editing_goal(&self) -> bool {
        self.goal_input.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        // ctrl+c to quit, even while editing
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        if let Some(input) = self.goal_input.as_mut() {
            match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => input.push(c),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Enter => self.commit_goal(),
                KeyCode::Esc => self.cancel_goal(),
                _ => {}
            }
            return Action::Continue;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Action::Quit,
            KeyCode::Tab | KeyCode::Char('j') => self.toggle_view(),
            _ => match self.view {
                View::Home => match key.code {
                    KeyCode::Char('s') => {
                        self.tracker.start();
                    }
                    KeyCode::Char('p') => {
                        self.tracker.pause();
                    }
                    KeyCode::Char('r') => {
                        self.tracker.resume();
                    }
                    KeyCode::Char('x') => {
                        self.tracker.stop();
                    }
                    KeyCode::Char('g') => self.begin_goal_edit(),
                    _ => {}
                },
                View::Journal => match key.code {
                    KeyCode::Up => self.select_prev(),
                    KeyCode::Down => self.select_next(),
                    KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
                    KeyCode::Char('b') | KeyCode::Backspace => self.view = View::Home,
                    _ => {}
                },
            },
        }
        Action::Continue
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(log_path) = AppDirs::log_path() {
        // the app works without a log file
        let _ = init_file_logging(&log_path);
    }

    let store = cli.config_store();
    let config = cli.resolve(store.load());

    if cli.save_config {
        store.save(&config)?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, StudyError::NotATty).exit();
    }

    info!(
        goal = config.daily_goal_secs,
        tick_rate_ms = config.tick_rate_ms,
        "starting"
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runner = Runner::new(
        ChannelEventSource::crossterm(),
        FixedTicker::new(config.tick_interval()),
    );
    let mut app = App::new(config.daily_goal());
    let result = start_tui(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    info!(
        entries = app.tracker.journal().len(),
        total = app.tracker.total(),
        "exiting"
    );

    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T, C>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let step = runner.step(app.is_timing());

        // seconds earned before the event count even if the event pauses or stops
        let mut redraw = app.credit(step.seconds) > 0;

        match step.event {
            StudyEvent::Tick => {}
            StudyEvent::Resize => redraw = true,
            StudyEvent::Key(key) => {
                if app.handle_key(key) == Action::Quit {
                    break;
                }
                redraw = true;
            }
        }

        if redraw {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
    }

    Ok(())
}
