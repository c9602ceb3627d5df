//! Application state and logic

use chrono::NaiveDate;
use crossterm::event::KeyCode;
use pomodoro::{StudyLedger, SubjectCatalog, SettingsStore, TickOutcome};
use tracing::{debug, info};

use crate::dialog::SettingsDialog;
use crate::session::SessionView;
use crate::timeline::DateTimeline;

/// Whether the event loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Application state
pub struct App {
    pub label: String,
    pub catalog: SubjectCatalog,
    pub settings: SettingsStore,
    pub timeline: DateTimeline,
    pub ledger: StudyLedger,
    /// Cursor in the subject list
    pub selected: usize,
    /// Open study session; `None` shows the subject list
    pub session: Option<SessionView>,
    pub show_help: bool,
}

impl App {
    pub fn new(label: String, catalog: SubjectCatalog, settings: SettingsStore, today: NaiveDate) -> Self {
        Self {
            label,
            catalog,
            settings,
            timeline: DateTimeline::new(today),
            ledger: StudyLedger::new(),
            selected: 0,
            session: None,
            show_help: false,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.timeline.today()
    }

    /// True while a countdown is running; the tick source follows this
    pub fn timer_running(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_running())
    }

    /// Keep the date strip on the current day
    pub fn roll_date(&mut self, today: NaiveDate) {
        if today != self.timeline.today() {
            info!(%today, "Date changed");
            self.timeline.recenter(today);
        }
    }

    /// One elapsed second of the countdown
    pub fn on_tick(&mut self) {
        let today = self.today();
        let settings = *self.settings.settings();
        if let Some(session) = self.session.as_mut() {
            if let TickOutcome::Transitioned(t) = session.tick(&settings, &mut self.ledger, today) {
                debug!(to = t.to.as_str(), seconds = t.seconds, "Next phase loaded");
            }
        }
    }

    pub fn on_key(&mut self, code: KeyCode) -> Flow {
        if self.show_help {
            match code {
                KeyCode::Char('q') => return Flow::Quit,
                KeyCode::Char('?') | KeyCode::Esc => self.show_help = false,
                _ => {}
            }
            return Flow::Continue;
        }

        if self.dialog_open() {
            self.dialog_key(code);
            return Flow::Continue;
        }

        match code {
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('h') | KeyCode::Left => self.timeline.select_prev(),
            KeyCode::Char('l') | KeyCode::Right => self.timeline.select_next(),
            KeyCode::Char('t') => self.timeline.select_today(),
            _ if self.session.is_some() => self.session_key(code),
            _ => return self.dashboard_key(code),
        }
        Flow::Continue
    }

    fn dashboard_key(&mut self, code: KeyCode) -> Flow {
        match code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Enter | KeyCode::Char(' ') => self.open_selected(),
            _ => {}
        }
        Flow::Continue
    }

    fn session_key(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b')) {
            self.close_session();
            return;
        }

        let settings = *self.settings.settings();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match code {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('p') => {
                session.toggle_timer();
            }
            KeyCode::Char('r') => session.reset(&settings),
            KeyCode::Char('s') | KeyCode::Char('n') => session.skip(&settings),
            KeyCode::Char('m') => {
                session.toggle_music();
            }
            KeyCode::Char('o') => session.dialog = Some(SettingsDialog::new()),
            _ => {}
        }
    }

    fn dialog_key(&mut self, code: KeyCode) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if matches!(code, KeyCode::Esc | KeyCode::Char('o') | KeyCode::Char('q')) {
            session.dialog = None;
            return;
        }
        let Some(dialog) = session.dialog.as_mut() else {
            return;
        };
        match code {
            KeyCode::Char('j') | KeyCode::Down => dialog.next(self.settings.settings()),
            KeyCode::Char('k') | KeyCode::Up => dialog.prev(),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char('l') | KeyCode::Right => {
                dialog.increase(&mut self.settings)
            }
            KeyCode::Char('-') | KeyCode::Char('h') | KeyCode::Left => dialog.decrease(&mut self.settings),
            KeyCode::Enter | KeyCode::Char(' ') => dialog.activate(&mut self.settings),
            _ => {}
        }
    }

    pub fn dialog_open(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.dialog.is_some())
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.catalog.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn open_selected(&mut self) {
        if let Some(subject) = self.catalog.get(self.selected) {
            self.session = Some(SessionView::open(subject.clone(), self.settings.settings()));
        }
    }

    pub fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            info!(
                subject = %session.subject().id,
                focused = session.today_seconds(),
                "Session closed"
            );
        }
    }
}
