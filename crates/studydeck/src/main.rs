//! Studydeck - terminal study tracker
//!
//! Pick a subject, run Pomodoro sessions against it, watch the days add up.

mod app;
mod dialog;
mod session;
mod ticker;
mod timeline;
mod ui;

use anyhow::{anyhow, bail, Result};
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pomodoro::{PomodoroSettings, SettingsStore, SubjectCatalog};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use studydeck_core::{logging, Config, Paths, TimerConfig};
use tracing::{info, warn};

use app::{App, Flow};
use ticker::Ticker;

/// Longest the loop blocks on input when no tick is pending
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "studydeck")]
#[command(about = "Terminal study tracker with a Pomodoro timer")]
#[command(version)]
#[command(after_help = r#"EXAMPLES:
    studydeck                       # Sample subjects, 25/5/20 minute timer
    studydeck --focus 50            # Longer focus sessions
    studydeck --no-pomodoro         # Single countdown, no breaks
    studydeck --tick 0.05           # Fast clock for trying things out

KEY BINDINGS:
    q           Quit
    ?           Toggle help overlay
    h/l         Previous/next day in the date strip
    t           Jump to today
    j/k, Up/Dn  Select subject
    Enter       Open subject
    Space       Start/pause timer
    r           Reset (twice in a row clears the session count)
    s           Skip to the next phase
    o           Pomodoro settings
    m           Music on/off
    Esc         Back to the subject list

FILES:
    ~/.config/studydeck/config.json     Timer defaults and exam label
    ~/.config/studydeck/subjects.json   Subject list (sample data if missing)
    ~/.local/share/studydeck/studydeck.log"#)]
struct Args {
    /// Config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Subject list (JSON array)
    #[arg(long)]
    subjects: Option<PathBuf>,

    /// Seconds of wall time per timer second
    #[arg(long)]
    tick: Option<f64>,

    /// Log file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Focus length in minutes
    #[arg(long, value_name = "MINS")]
    focus: Option<u32>,

    /// Short break length in minutes
    #[arg(long, value_name = "MINS")]
    short_break: Option<u32>,

    /// Long break length in minutes
    #[arg(long, value_name = "MINS")]
    long_break: Option<u32>,

    /// Single countdown without breaks
    #[arg(long)]
    no_pomodoro: bool,

    /// Write the effective config back to the config file and exit
    #[arg(long)]
    save_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let paths = Paths::new();

    logging::init_file(&args.log.clone().unwrap_or_else(|| paths.log_file()))?;

    let config_path = args.config.clone().unwrap_or_else(|| paths.config_file());
    let mut config = Config::load(&config_path)?;
    apply_overrides(&mut config, &args);

    if args.save_config {
        config.save(&config_path)?;
        println!("Saved {}", config_path.display());
        return Ok(());
    }

    let tick = tick_period(config.tick_interval)?;

    let settings = PomodoroSettings::from_config(&config.timer);
    if let Err(e) = settings.validate() {
        warn!(error = %e, "Invalid timer settings");
    }
    let settings = SettingsStore::new(settings);

    let subjects_path = args.subjects.clone().unwrap_or_else(|| paths.subjects_file());
    let catalog = SubjectCatalog::load_or_sample(&subjects_path)?;

    info!(
        subjects = catalog.len(),
        focus = settings.settings().focus_minutes,
        pomodoro = settings.settings().use_pomodoro_mode,
        "Starting"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(config.label, catalog, settings, Local::now().date_naive());
    let ticker = Ticker::new(tick);
    info!(tick_ms = ticker.period().as_millis() as u64, "Tick source ready");
    let result = run_app(&mut terminal, &mut app, ticker);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    info!("Exiting");
    Ok(())
}

/// Command-line values win over the config file
fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(tick) = args.tick {
        config.tick_interval = tick;
    }
    apply_timer_overrides(&mut config.timer, args);
}

fn apply_timer_overrides(timer: &mut TimerConfig, args: &Args) {
    if let Some(minutes) = args.focus {
        timer.focus_minutes = minutes;
    }
    if let Some(minutes) = args.short_break {
        timer.short_break_minutes = minutes;
    }
    if let Some(minutes) = args.long_break {
        timer.long_break_minutes = minutes;
    }
    if args.no_pomodoro {
        timer.use_pomodoro_mode = false;
    }
}

fn tick_period(seconds: f64) -> Result<Duration> {
    if !seconds.is_finite() || seconds <= 0.0 {
        bail!("Tick interval must be a positive number of seconds, got {}", seconds);
    }
    Duration::try_from_secs_f64(seconds)
        .map_err(|e| anyhow!("Tick interval out of range, got {}: {}", seconds, e))
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, mut ticker: Ticker) -> Result<()> {
    loop {
        app.roll_date(Local::now().date_naive());
        terminal.draw(|f| ui::draw(f, app))?;

        let now = Instant::now();
        ticker.sync(app.timer_running(), now);

        if event::poll(ticker.timeout(now, IDLE_POLL))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.on_key(key.code) == Flow::Quit {
                    return Ok(());
                }
            }
        }

        // A key may have paused or closed the session; drop its pending tick
        let now = Instant::now();
        ticker.sync(app.timer_running(), now);
        if ticker.fire(now) {
            app.on_tick();
        }
    }
}
