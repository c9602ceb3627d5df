//! Focused time per day, kept in memory for the current run

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Seconds of focus time recorded against each date
#[derive(Debug, Clone, Default)]
pub struct StudyLedger {
    days: BTreeMap<NaiveDate, u64>,
}

impl StudyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, date: NaiveDate, seconds: u64) {
        if seconds == 0 {
            return;
        }
        *self.days.entry(date).or_insert(0) += seconds;
    }

    pub fn seconds_on(&self, date: NaiveDate) -> u64 {
        self.days.get(&date).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.days.values().sum()
    }

    /// Consecutive studied days ending today. A streak that reached
    /// yesterday still counts while today has nothing recorded yet.
    pub fn streak(&self, today: NaiveDate) -> u32 {
        let mut day = if self.seconds_on(today) > 0 {
            Some(today)
        } else {
            today.pred_opt()
        };

        let mut streak = 0;
        while let Some(date) = day {
            if self.seconds_on(date) == 0 {
                break;
            }
            streak += 1;
            day = date.pred_opt();
        }
        streak
    }
}
