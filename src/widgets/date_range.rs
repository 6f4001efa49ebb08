//! Check-in / check-out picker state (rendering-agnostic)

use chrono::{Duration, NaiveDate};

pub const DEFAULT_NIGHTS: u32 = 2;
pub const DEFAULT_MAX_NIGHTS: u32 = 30;

/// Which end of the stay the arrow keys move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFocus {
    CheckIn,
    CheckOut,
}

/// Selected stay dates
///
/// Invariants: `check_in >= today`, `1 <= nights() <= max_nights`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeState {
    check_in: NaiveDate,
    check_out: NaiveDate,
    focus: DateFocus,
    today: NaiveDate,
    max_nights: u32,
}

impl DateRangeState {
    /// Start the stay tomorrow for `default_nights`
    pub fn new(today: NaiveDate, default_nights: u32, max_nights: u32) -> Self {
        let max_nights = max_nights.max(1);
        let nights = default_nights.clamp(1, max_nights);
        let check_in = today.succ_opt().unwrap_or(today);
        let check_out = add_days(check_in, nights as i64).unwrap_or(check_in);

        Self {
            check_in,
            check_out,
            focus: DateFocus::CheckIn,
            today,
            max_nights,
        }
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn focus(&self) -> DateFocus {
        self.focus
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn nights(&self) -> u32 {
        self.check_out
            .signed_duration_since(self.check_in)
            .num_days()
            .max(0) as u32
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            DateFocus::CheckIn => DateFocus::CheckOut,
            DateFocus::CheckOut => DateFocus::CheckIn,
        };
    }

    /// Move the focused date by `days`. Returns true if anything changed.
    ///
    /// Moving check-in carries check-out along so the stay length is kept.
    /// Check-out is clamped to `[check_in + 1, check_in + max_nights]`.
    pub fn shift_focused(&mut self, days: i64) -> bool {
        match self.focus {
            DateFocus::CheckIn => {
                let nights = self.nights() as i64;
                let Some(moved) = add_days(self.check_in, days) else {
                    return false;
                };
                let check_in = moved.max(self.today);
                let Some(check_out) = add_days(check_in, nights) else {
                    return false;
                };
                if check_in == self.check_in {
                    return false;
                }
                self.check_in = check_in;
                self.check_out = check_out;
                true
            }
            DateFocus::CheckOut => {
                let (Some(earliest), Some(latest), Some(moved)) = (
                    add_days(self.check_in, 1),
                    add_days(self.check_in, self.max_nights as i64),
                    add_days(self.check_out, days),
                ) else {
                    return false;
                };
                let check_out = moved.clamp(earliest, latest);
                if check_out == self.check_out {
                    return false;
                }
                self.check_out = check_out;
                true
            }
        }
    }

    /// Move the stay so it starts on `today` again if the day rolled over
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
        if self.check_in < today {
            let nights = self.nights() as i64;
            self.check_in = today;
            self.check_out = add_days(today, nights).unwrap_or(today);
        }
    }
}

fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}
