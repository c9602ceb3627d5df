//! Pomodoro countdown engine
//!
//! The engine alternates between focus and break phases. It never reads a
//! clock: the caller invokes [`PomodoroEngine::tick`] once per elapsed second
//! while the timer runs. Every phase change pauses the timer, so the user
//! starts each phase explicitly.
//!
//! Settings are passed into each call rather than stored. Changing them never
//! resizes the countdown in progress; the new values apply from the next
//! phase that gets loaded.

use tracing::{debug, info};

use crate::settings::{PomodoroSettings, SettingField};

/// Every third completed focus session earns the long break
pub const LONG_BREAK_EVERY: u32 = 3;

/// Progress reference when pomodoro mode is off (25 minutes)
pub const REFERENCE_SECONDS: u32 = 25 * 60;

/// Which countdown is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Focus,
    Break,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Focus => "focus",
            Phase::Break => "break",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Phase::Focus => Phase::Break,
            Phase::Break => Phase::Focus,
        }
    }
}

/// Observable timer state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub is_running: bool,
    pub phase: Phase,
    /// Focus phases finished, by the countdown or by skipping
    pub completed_focus_sessions: u32,
    /// Number of skips
    pub session_count: u32,
    /// Resets since the last phase change (0 or 1)
    pub reset_streak: u8,
}

/// A phase change. The new phase is loaded and paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    /// Length of the newly loaded countdown
    pub seconds: u32,
}

/// What a call to [`PomodoroEngine::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer paused, or nothing left to count; no time elapsed
    Idle,
    /// One second came off the countdown
    Counted(Phase),
    /// The countdown ran out and the next phase was loaded
    Transitioned(Transition),
    /// Pomodoro mode is off and the countdown ran out; the timer stopped
    Finished(Phase),
}

impl TickOutcome {
    /// Phase the elapsed second belonged to, if one elapsed
    pub fn elapsed_in(&self) -> Option<Phase> {
        match self {
            TickOutcome::Idle => None,
            TickOutcome::Counted(phase) | TickOutcome::Finished(phase) => Some(*phase),
            TickOutcome::Transitioned(t) => Some(t.from),
        }
    }
}

/// Focus/break countdown state machine
#[derive(Debug, Clone)]
pub struct PomodoroEngine {
    state: TimerState,
    /// Length the current countdown was loaded with
    phase_seconds: u32,
}

impl PomodoroEngine {
    /// Fresh engine: paused at the start of a focus phase
    pub fn new(settings: &PomodoroSettings) -> Self {
        let seconds = settings.seconds(SettingField::Focus);
        Self {
            state: TimerState {
                remaining_seconds: seconds,
                is_running: false,
                phase: Phase::Focus,
                completed_focus_sessions: 0,
                session_count: 0,
                reset_streak: 0,
            },
            phase_seconds: seconds,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn phase_seconds(&self) -> u32 {
        self.phase_seconds
    }

    /// Returns false if the timer was already running
    pub fn start(&mut self) -> bool {
        if self.state.is_running {
            return false;
        }
        self.state.is_running = true;
        debug!(phase = self.state.phase.as_str(), remaining = self.state.remaining_seconds, "Timer started");
        true
    }

    /// Returns false if the timer was already paused
    pub fn pause(&mut self) -> bool {
        if !self.state.is_running {
            return false;
        }
        self.state.is_running = false;
        debug!(phase = self.state.phase.as_str(), remaining = self.state.remaining_seconds, "Timer paused");
        true
    }

    /// Start if paused, pause if running. Returns the new running state.
    pub fn toggle(&mut self) -> bool {
        if self.state.is_running {
            self.pause();
        } else {
            self.start();
        }
        self.state.is_running
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self, settings: &PomodoroSettings) -> TickOutcome {
        if !self.state.is_running {
            return TickOutcome::Idle;
        }

        let phase = self.state.phase;

        if !settings.use_pomodoro_mode {
            if self.state.remaining_seconds == 0 {
                self.state.is_running = false;
                return TickOutcome::Idle;
            }
            self.state.remaining_seconds -= 1;
            if self.state.remaining_seconds == 0 {
                self.state.is_running = false;
                info!(phase = phase.as_str(), "Countdown finished");
                return TickOutcome::Finished(phase);
            }
            return TickOutcome::Counted(phase);
        }

        if self.state.remaining_seconds <= 1 {
            let transition = self.advance(settings);
            info!(
                from = transition.from.as_str(),
                to = transition.to.as_str(),
                completed = self.state.completed_focus_sessions,
                "Phase complete"
            );
            return TickOutcome::Transitioned(transition);
        }

        self.state.remaining_seconds -= 1;
        TickOutcome::Counted(phase)
    }

    /// Reload the current phase and pause. A second reset in a row also
    /// clears the session counters.
    pub fn reset(&mut self, settings: &PomodoroSettings) {
        let seconds = self.phase_length(self.state.phase, settings);
        self.load(seconds);
        self.state.is_running = false;
        self.state.reset_streak += 1;

        if self.state.reset_streak >= 2 {
            self.state.session_count = 0;
            self.state.completed_focus_sessions = 0;
            self.state.reset_streak = 0;
            info!("Double reset, session counters cleared");
        } else {
            debug!(phase = self.state.phase.as_str(), "Timer reset");
        }
    }

    /// Jump to the next phase now, counting it as a session
    pub fn skip(&mut self, settings: &PomodoroSettings) -> Transition {
        let transition = self.advance(settings);
        self.state.session_count += 1;
        info!(
            from = transition.from.as_str(),
            to = transition.to.as_str(),
            sessions = self.state.session_count,
            "Phase skipped"
        );
        transition
    }

    /// Share of the current countdown already elapsed, 0 to 100
    pub fn progress_percent(&self, settings: &PomodoroSettings) -> f64 {
        let duration = if settings.use_pomodoro_mode {
            self.phase_seconds
        } else {
            REFERENCE_SECONDS
        };
        let duration = f64::from(duration.max(1));
        let remaining = f64::from(self.state.remaining_seconds);
        ((duration - remaining) / duration * 100.0).clamp(0.0, 100.0)
    }

    /// Break length after `completed` focus sessions, in seconds
    pub fn break_seconds(completed: u32, settings: &PomodoroSettings) -> u32 {
        if completed % LONG_BREAK_EVERY == 0 {
            settings.seconds(SettingField::LongBreak)
        } else {
            settings.seconds(SettingField::ShortBreak)
        }
    }

    fn phase_length(&self, phase: Phase, settings: &PomodoroSettings) -> u32 {
        match phase {
            Phase::Focus => settings.seconds(SettingField::Focus),
            Phase::Break => Self::break_seconds(self.state.completed_focus_sessions, settings),
        }
    }

    fn advance(&mut self, settings: &PomodoroSettings) -> Transition {
        let from = self.state.phase;
        if from == Phase::Focus {
            self.state.completed_focus_sessions += 1;
        }
        let to = from.next();
        let seconds = self.phase_length(to, settings);

        self.state.phase = to;
        self.load(seconds);
        self.state.is_running = false;
        self.state.reset_streak = 0;

        Transition { from, to, seconds }
    }

    fn load(&mut self, seconds: u32) {
        self.state.remaining_seconds = seconds;
        self.phase_seconds = seconds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(focus: u32, short: u32, long: u32) -> PomodoroSettings {
        PomodoroSettings {
            focus_minutes: focus,
            short_break_minutes: short,
            long_break_minutes: long,
            use_pomodoro_mode: true,
        }
    }

    /// Run the current phase to completion and return the transition
    fn finish_phase(engine: &mut PomodoroEngine, settings: &PomodoroSettings) -> Transition {
        engine.start();
        loop {
            if let TickOutcome::Transitioned(t) = engine.tick(settings) {
                return t;
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let s = PomodoroSettings::default();
        let engine = PomodoroEngine::new(&s);
        assert_eq!(
            engine.state(),
            &TimerState {
                remaining_seconds: 25 * 60,
                is_running: false,
                phase: Phase::Focus,
                completed_focus_sessions: 0,
                session_count: 0,
                reset_streak: 0,
            }
        );
        assert_eq!(engine.progress_percent(&s), 0.0);
    }

    #[test]
    fn test_tick_while_paused_is_idle() {
        let s = PomodoroSettings::default();
        let mut engine = PomodoroEngine::new(&s);
        assert_eq!(engine.tick(&s), TickOutcome::Idle);
        assert_eq!(engine.remaining_seconds(), 25 * 60);
    }

    #[test]
    fn test_n_ticks_count_down_then_transition_once() {
        let s = settings(1, 1, 2);
        let duration = 60;

        for n in 0..=duration {
            let mut engine = PomodoroEngine::new(&s);
            engine.start();
            let mut transitions = 0;
            for _ in 0..n {
                if let TickOutcome::Transitioned(_) = engine.tick(&s) {
                    transitions += 1;
                }
            }
            if n < duration {
                assert_eq!(transitions, 0, "n = {}", n);
                assert_eq!(engine.remaining_seconds(), duration - n);
                assert_eq!(engine.phase(), Phase::Focus);
            } else {
                assert_eq!(transitions, 1);
                assert_eq!(engine.phase(), Phase::Break);
            }
        }
    }

    #[test]
    fn test_full_length_focus_phase() {
        let s = PomodoroSettings::default();
        let mut engine = PomodoroEngine::new(&s);
        engine.start();
        for _ in 0..(25 * 60 - 1) {
            assert_eq!(engine.tick(&s), TickOutcome::Counted(Phase::Focus));
        }
        assert_eq!(engine.remaining_seconds(), 1);

        let outcome = engine.tick(&s);
        assert_eq!(
            outcome,
            TickOutcome::Transitioned(Transition {
                from: Phase::Focus,
                to: Phase::Break,
                seconds: 5 * 60,
            })
        );
        assert_eq!(outcome.elapsed_in(), Some(Phase::Focus));
        assert!(!engine.is_running());
        assert_eq!(engine.state().completed_focus_sessions, 1);
        assert_eq!(engine.state().session_count, 0);
    }

    #[test]
    fn test_break_to_focus_reloads_focus() {
        let s = settings(2, 1, 3);
        let mut engine = PomodoroEngine::new(&s);
        finish_phase(&mut engine, &s);

        let t = finish_phase(&mut engine, &s);
        assert_eq!(t.from, Phase::Break);
        assert_eq!(t.to, Phase::Focus);
        assert_eq!(engine.remaining_seconds(), 120);
        assert!(!engine.is_running());
        assert_eq!(engine.state().completed_focus_sessions, 1);
    }

    #[test]
    fn test_every_third_break_is_long() {
        let s = settings(1, 2, 7);
        let mut engine = PomodoroEngine::new(&s);

        for k in 1..=9 {
            let to_break = finish_phase(&mut engine, &s);
            assert_eq!(to_break.to, Phase::Break);
            assert_eq!(engine.state().completed_focus_sessions, k);
            let expected = if k % 3 == 0 { 7 * 60 } else { 2 * 60 };
            assert_eq!(to_break.seconds, expected, "after focus session {}", k);
            assert_eq!(engine.remaining_seconds(), expected);

            let to_focus = finish_phase(&mut engine, &s);
            assert_eq!(to_focus.to, Phase::Focus);
        }
    }

    #[test]
    fn test_start_and_pause_are_idempotent() {
        let s = PomodoroSettings::default();
        let mut engine = PomodoroEngine::new(&s);
        assert!(engine.start());
        assert!(!engine.start());
        assert!(engine.is_running());
        assert!(engine.pause());
        assert!(!engine.pause());
        assert!(!engine.is_running());
    }

    #[test]
    fn test_toggle() {
        let s = PomodoroSettings::default();
        let mut engine = PomodoroEngine::new(&s);
        assert!(engine.toggle());
        assert!(!engine.toggle());
    }

    #[test]
    fn test_skip_always_counts_a_session() {
        let s = PomodoroSettings::default();
        let mut engine = PomodoroEngine::new(&s);
        engine.start();

        let t = engine.skip(&s);
        assert_eq!(t.to, Phase::Break);
        assert_eq!(engine.state().session_count, 1);
        assert_eq!(engine.state().completed_focus_sessions, 1);
        assert_eq!(engine.remaining_seconds(), 5 * 60);
        assert!(!engine.is_running());

        engine.start();
        let t = engine.skip(&s);
        assert_eq!(t.to, Phase::Focus);
        assert_eq!(engine.state().session_count, 2);
        assert_eq!(engine.state().completed_focus_sessions, 1);
        assert_eq!(engine.remaining_seconds(), 25 * 60);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_skip_uses_long_break_rule() {
        let s = PomodoroSettings::default();
        let mut engine = PomodoroEngine::new(&s);
        engine.skip(&s);
        engine.skip(&s);
        engine.skip(&s);
        engine.skip(&s);
        let t = engine.skip(&s);
        assert_eq!(engine.state().completed_focus_sessions, 3);
        assert_eq!(t.seconds, 20 * 60);
    }

    #[test]
    fn test_single_reset_reloads_phase() {
        let s = PomodoroSettings::default();
        let mut engine = PomodoroEngine::new(&s);
        engine.skip(&s);
        engine.start();
        for _ in 0..30 {
            engine.tick(&s);
        }

        engine.reset(&s);
        assert_eq!(engine.phase(), Phase::Break);
        assert_eq!(engine.remaining_seconds(), 5 * 60);
        assert!(!engine.is_running());
        assert_eq!(engine.state().reset_streak, 1);
        assert_eq!(engine.state().session_count, 1);
        assert_eq!(engine.state().completed_focus_sessions, 1);
    }

    #[test]
    fn test_double_reset_clears_counters() {
        let s = PomodoroSettings::default();
        let mut engine = PomodoroEngine::new(&s);
        engine.skip(&s);
        engine.skip(&s);
        engine.skip(&s);
        assert_eq!(engine.state().session_count, 3);
        assert_eq!(engine.state().completed_focus_sessions, 2);

        engine.reset(&s);
        engine.reset(&s);
        assert_eq!(engine.state().session_count, 0);
        assert_eq!(engine.state().completed_focus_sessions, 0);
        assert_eq!(engine.state().reset_streak, 0);
    }

    #[test]
    fn test_transition_between_resets_breaks_the_streak() {
        let s = settings(1, 1, 1);
        let mut engine = PomodoroEngine::new(&s);
        engine.skip(&s);

        engine.reset(&s);
        finish_phase(&mut engine, &s);
        assert_eq!(engine.state().reset_streak, 0);
        engine.reset(&s);

        assert_eq!(engine.state().session_count, 1);
        assert_eq!(engine.state().completed_focus_sessions, 1);
        assert_eq!(engine.state().reset_streak, 1);
    }

    #[test]
    fn test_reset_in_break_uses_count_before_clearing() {
        let s = settings(25, 5, 20);
        let mut engine = PomodoroEngine::new(&s);
        engine.skip(&s);
        engine.reset(&s);
        engine.reset(&s);
        assert_eq!(engine.phase(), Phase::Break);
        assert_eq!(engine.remaining_seconds(), 5 * 60);
        assert_eq!(engine.state().completed_focus_sessions, 0);
    }

    #[test]
    fn test_progress_bounds() {
        let s = settings(1, 1, 1);
        let mut engine = PomodoroEngine::new(&s);
        assert_eq!(engine.progress_percent(&s), 0.0);

        engine.start();
        for _ in 0..30 {
            engine.tick(&s);
        }
        assert!((engine.progress_percent(&s) - 50.0).abs() < f64::EPSILON);

        let mut off = s;
        off.use_pomodoro_mode = false;
        let mut single = PomodoroEngine::new(&off);
        single.start();
        for _ in 0..60 {
            single.tick(&off);
        }
        assert_eq!(single.remaining_seconds(), 0);
        assert_eq!(single.progress_percent(&off), 100.0);
    }

    #[test]
    fn test_settings_change_does_not_resize_countdown() {
        let s = PomodoroSettings::default();
        let mut engine = PomodoroEngine::new(&s);
        engine.start();
        engine.tick(&s);

        let shorter = settings(10, 5, 20);
        engine.tick(&shorter);
        assert_eq!(engine.remaining_seconds(), 25 * 60 - 2);
        assert_eq!(engine.phase_seconds(), 25 * 60);
        assert!(engine.progress_percent(&shorter) < 1.0);

        engine.reset(&shorter);
        assert_eq!(engine.remaining_seconds(), 10 * 60);
    }

    #[test]
    fn test_without_pomodoro_mode_counts_down_once() {
        let s = PomodoroSettings {
            focus_minutes: 1,
            use_pomodoro_mode: false,
            ..PomodoroSettings::default()
        };
        let mut engine = PomodoroEngine::new(&s);
        engine.start();
        for _ in 0..59 {
            assert_eq!(engine.tick(&s), TickOutcome::Counted(Phase::Focus));
        }
        assert_eq!(engine.tick(&s), TickOutcome::Finished(Phase::Focus));
        assert_eq!(engine.remaining_seconds(), 0);
        assert_eq!(engine.phase(), Phase::Focus);
        assert!(!engine.is_running());

        engine.start();
        assert_eq!(engine.tick(&s), TickOutcome::Idle);
        assert!(!engine.is_running());
        assert_eq!(engine.state().completed_focus_sessions, 0);
    }

    #[test]
    fn test_progress_uses_reference_without_pomodoro_mode() {
        let s = PomodoroSettings {
            focus_minutes: 10,
            use_pomodoro_mode: false,
            ..PomodoroSettings::default()
        };
        let engine = PomodoroEngine::new(&s);
        let expected = (1500.0 - 600.0) / 1500.0 * 100.0;
        assert!((engine.progress_percent(&s) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_zero_duration_settings_never_divide_by_zero() {
        let s = settings(0, 0, 0);
        let mut engine = PomodoroEngine::new(&s);
        assert_eq!(engine.remaining_seconds(), 60);
        let t = engine.skip(&s);
        assert_eq!(t.seconds, 60);
        assert!(engine.progress_percent(&s).is_finite());
    }

    #[test]
    fn test_huge_durations_load_without_overflow() {
        let s = settings(80_000_000, 5, 20);
        let mut engine = PomodoroEngine::new(&s);
        assert_eq!(engine.remaining_seconds(), u32::MAX);
        assert_eq!(engine.progress_percent(&s), 0.0);

        engine.skip(&s);
        engine.skip(&s);
        assert_eq!(engine.remaining_seconds(), u32::MAX);
        engine.reset(&s);
        assert_eq!(engine.remaining_seconds(), u32::MAX);
    }

    #[test]
    fn test_reset_after_finished_without_pomodoro_mode() {
        let s = PomodoroSettings {
            focus_minutes: 1,
            use_pomodoro_mode: false,
            ..PomodoroSettings::default()
        };
        let mut engine = PomodoroEngine::new(&s);
        engine.start();
        for _ in 0..59 {
            engine.tick(&s);
        }
        assert_eq!(engine.tick(&s), TickOutcome::Finished(Phase::Focus));
        assert_eq!(engine.remaining_seconds(), 0);

        engine.reset(&s);
        assert_eq!(engine.phase(), Phase::Focus);
        assert_eq!(engine.remaining_seconds(), 60);
        assert!(!engine.is_running());
        assert_eq!(engine.state().completed_focus_sessions, 0);
        assert_eq!(engine.state().session_count, 0);
    }

    #[test]
    fn test_skip_without_pomodoro_mode_still_counts() {
        let s = PomodoroSettings {
            focus_minutes: 10,
            use_pomodoro_mode: false,
            ..PomodoroSettings::default()
        };
        let mut engine = PomodoroEngine::new(&s);
        engine.start();
        let t = engine.skip(&s);
        assert_eq!(t.from, Phase::Focus);
        assert_eq!(t.to, Phase::Break);
        assert!(!engine.is_running());
        assert_eq!(engine.state().session_count, 1);
        assert_eq!(engine.state().completed_focus_sessions, 1);

        engine.start();
        engine.tick(&s);
        assert_eq!(engine.remaining_seconds(), 5 * 60 - 1);
    }
}
