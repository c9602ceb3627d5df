//! Date strip shown above every screen
//!
//! Three weeks of days centred on today. The selection stays inside the strip.

use chrono::{Datelike, Duration, NaiveDate};

/// Days shown before today
pub const DAYS_BEFORE: usize = 10;
/// Total days in the strip
pub const DAYS_SHOWN: usize = 21;

/// One day in the strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCell {
    pub date: NaiveDate,
    /// Short month name, e.g. "Mar"
    pub month: String,
    /// Day of month
    pub day: u32,
    /// Short weekday name, e.g. "Tue"
    pub weekday: String,
    pub is_today: bool,
}

#[derive(Debug, Clone)]
pub struct DateTimeline {
    today: NaiveDate,
    start: NaiveDate,
    selected: usize,
}

impl DateTimeline {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            start: today - Duration::days(DAYS_BEFORE as i64),
            selected: DAYS_BEFORE,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn cells(&self) -> Vec<DateCell> {
        self.start
            .iter_days()
            .take(DAYS_SHOWN)
            .map(|date| DateCell {
                date,
                month: date.format("%b").to_string(),
                day: date.day(),
                weekday: date.format("%a").to_string(),
                is_today: date == self.today,
            })
            .collect()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.start + Duration::days(self.selected as i64)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < DAYS_SHOWN {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_today(&mut self) {
        self.selected = DAYS_BEFORE;
    }

    /// Select `date` if it is in the strip
    pub fn select(&mut self, date: NaiveDate) -> bool {
        let offset = (date - self.start).num_days();
        if (0..DAYS_SHOWN as i64).contains(&offset) {
            self.selected = offset as usize;
            true
        } else {
            false
        }
    }

    /// Move the strip when the day changes, keeping the selected date if it
    /// is still visible
    pub fn recenter(&mut self, today: NaiveDate) {
        if today == self.today {
            return;
        }
        let selected = self.selected_date();
        *self = Self::new(today);
        self.select(selected);
    }
}
