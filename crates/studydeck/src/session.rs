//! Study session screen state
//!
//! Pairs one subject with a Pomodoro engine and the time focused since the
//! screen opened. The whole thing is dropped when the user navigates back,
//! taking the timer with it.

use chrono::NaiveDate;
use pomodoro::{Phase, PomodoroEngine, PomodoroSettings, StudyLedger, Subject, TickOutcome};
use tracing::info;

use crate::dialog::SettingsDialog;

/// Background music toggle. Playback is a silent placeholder loop, so only
/// the on/off state is tracked.
#[derive(Debug, Default)]
pub struct Soundtrack {
    playing: bool,
}

impl Soundtrack {
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        info!(playing = self.playing, "Soundtrack toggled");
        self.playing
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

pub struct SessionView {
    subject: Subject,
    engine: PomodoroEngine,
    today_seconds: u64,
    total_seconds: u64,
    soundtrack: Soundtrack,
    /// Open settings dialog, if any
    pub dialog: Option<SettingsDialog>,
}

impl SessionView {
    pub fn open(subject: Subject, settings: &PomodoroSettings) -> Self {
        info!(subject = %subject.id, title = %subject.title, "Session opened");
        Self {
            total_seconds: subject.time_spent,
            subject,
            engine: PomodoroEngine::new(settings),
            today_seconds: 0,
            soundtrack: Soundtrack::default(),
            dialog: None,
        }
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn engine(&self) -> &PomodoroEngine {
        &self.engine
    }

    /// Focus time since this screen opened
    pub fn today_seconds(&self) -> u64 {
        self.today_seconds
    }

    /// The subject's cumulative time plus what was focused here
    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn soundtrack(&self) -> &Soundtrack {
        &self.soundtrack
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn toggle_timer(&mut self) -> bool {
        self.engine.toggle()
    }

    pub fn reset(&mut self, settings: &PomodoroSettings) {
        self.engine.reset(settings);
    }

    pub fn skip(&mut self, settings: &PomodoroSettings) {
        self.engine.skip(settings);
    }

    pub fn toggle_music(&mut self) -> bool {
        self.soundtrack.toggle()
    }

    /// One elapsed second. Focus seconds are credited to the subject and to
    /// `today` in the ledger.
    pub fn tick(
        &mut self,
        settings: &PomodoroSettings,
        ledger: &mut StudyLedger,
        today: NaiveDate,
    ) -> TickOutcome {
        let outcome = self.engine.tick(settings);
        if outcome.elapsed_in() == Some(Phase::Focus) {
            self.today_seconds += 1;
            self.total_seconds += 1;
            ledger.record(today, 1);
        }
        outcome
    }

    /// `break`, `focused` or `paused`
    pub fn status_label(&self) -> &'static str {
        match (self.engine.phase(), self.engine.is_running()) {
            (Phase::Break, _) => "break",
            (Phase::Focus, true) => "focused",
            (Phase::Focus, false) => "paused",
        }
    }

    pub fn progress_percent(&self, settings: &PomodoroSettings) -> f64 {
        self.engine.progress_percent(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomodoro::SubjectCatalog;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 18).unwrap()
    }

    fn open(settings: &PomodoroSettings) -> SessionView {
        let subject = SubjectCatalog::sample().get(2).unwrap().clone();
        SessionView::open(subject, settings)
    }

    #[test]
    fn test_open_starts_paused_in_focus() {
        let settings = PomodoroSettings::default();
        let session = open(&settings);
        assert_eq!(session.status_label(), "paused");
        assert_eq!(session.engine().remaining_seconds(), 25 * 60);
        assert_eq!(session.today_seconds(), 0);
        assert_eq!(session.total_seconds(), session.subject().time_spent);
        assert!(session.dialog.is_none());
    }

    #[test]
    fn test_focus_ticks_are_credited() {
        let settings = PomodoroSettings::default();
        let mut ledger = StudyLedger::new();
        let mut session = open(&settings);
        let base = session.total_seconds();

        assert_eq!(session.tick(&settings, &mut ledger, today()), TickOutcome::Idle);
        assert_eq!(session.today_seconds(), 0);

        session.toggle_timer();
        assert_eq!(session.status_label(), "focused");
        for _ in 0..90 {
            session.tick(&settings, &mut ledger, today());
        }
        assert_eq!(session.today_seconds(), 90);
        assert_eq!(session.total_seconds(), base + 90);
        assert_eq!(ledger.seconds_on(today()), 90);
    }

    #[test]
    fn test_break_ticks_are_not_credited() {
        let settings = PomodoroSettings::default();
        let mut ledger = StudyLedger::new();
        let mut session = open(&settings);

        session.skip(&settings);
        assert_eq!(session.status_label(), "break");
        session.toggle_timer();
        for _ in 0..10 {
            session.tick(&settings, &mut ledger, today());
        }
        assert_eq!(session.today_seconds(), 0);
        assert_eq!(ledger.total(), 0);
        assert_eq!(session.engine().remaining_seconds(), 5 * 60 - 10);
    }

    #[test]
    fn test_transition_tick_is_credited_and_pauses() {
        let settings = PomodoroSettings {
            focus_minutes: 1,
            ..PomodoroSettings::default()
        };
        let mut ledger = StudyLedger::new();
        let mut session = open(&settings);
        session.toggle_timer();
        for _ in 0..60 {
            session.tick(&settings, &mut ledger, today());
        }
        assert_eq!(session.today_seconds(), 60);
        assert!(!session.is_running());
        assert_eq!(session.status_label(), "break");
    }

    #[test]
    fn test_music_toggle() {
        let settings = PomodoroSettings::default();
        let mut session = open(&settings);
        assert!(!session.soundtrack().is_playing());
        assert!(session.toggle_music());
        assert!(!session.toggle_music());
    }
}
