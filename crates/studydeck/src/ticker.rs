//! Periodic tick source for the countdown
//!
//! The ticker is armed only while the timer runs. Disarming discards the
//! pending deadline, so a paused or closed session never receives a tick.

use std::time::{Duration, Instant};

const MIN_PERIOD: Duration = Duration::from_millis(10);

pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            next: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    /// Arm or disarm to match whether the timer is running
    pub fn sync(&mut self, running: bool, now: Instant) {
        match (running, self.next) {
            (true, None) => self.next = Some(now + self.period),
            (false, Some(_)) => self.next = None,
            _ => {}
        }
    }

    /// How long the event loop may block waiting for input
    pub fn timeout(&self, now: Instant, idle: Duration) -> Duration {
        match self.next {
            Some(next) => next.saturating_duration_since(now).min(idle),
            None => idle,
        }
    }

    /// Consume one firing if it is due
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next {
            Some(next) if now >= next => {
                self.next = Some(next + self.period);
                true
            }
            _ => false,
        }
    }
}
