//! Search criteria store
//!
//! Owns the chosen destination, stay dates and guest counts. Panels never
//! write these fields directly; they send a `SearchUpdate` through `apply()`.

use crate::data::{Destination, GuestCounts, GuestField, GuestLimits};
use crate::widgets::DateRangeState;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchUpdate {
    SetDestination(Destination),
    ClearDestination,
    ShiftDate { days: i64 },
    ToggleDateFocus,
    AdjustGuests { field: GuestField, delta: i32 },
    /// The calendar day rolled over
    SetToday(NaiveDate),
    Reset,
}

/// Snapshot of everything needed to look up rooms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub destination: Option<Destination>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: u32,
    pub guests: GuestCounts,
}

pub struct SearchStore {
    destination: Option<Destination>,
    dates: DateRangeState,
    guests: GuestCounts,
    limits: GuestLimits,
    default_nights: u32,
    max_nights: u32,
}

impl SearchStore {
    pub fn new(today: NaiveDate, default_nights: u32, max_nights: u32, limits: GuestLimits) -> Self {
        Self {
            destination: None,
            dates: DateRangeState::new(today, default_nights, max_nights),
            guests: GuestCounts::default().clamped(&limits),
            limits,
            default_nights,
            max_nights,
        }
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    pub fn dates(&self) -> &DateRangeState {
        &self.dates
    }

    pub fn guests(&self) -> GuestCounts {
        self.guests
    }

    pub fn limits(&self) -> &GuestLimits {
        &self.limits
    }

    pub fn is_complete(&self) -> bool {
        self.destination.is_some()
    }

    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            destination: self.destination.clone(),
            check_in: self.dates.check_in(),
            check_out: self.dates.check_out(),
            nights: self.dates.nights(),
            guests: self.guests,
        }
    }

    /// Apply an update. Returns true if the store changed.
    pub fn apply(&mut self, update: SearchUpdate) -> bool {
        match update {
            SearchUpdate::SetDestination(destination) => {
                if self.destination.as_ref() == Some(&destination) {
                    return false;
                }
                tracing::info!("Destination set to {}", destination.name);
                self.destination = Some(destination);
                true
            }
            SearchUpdate::ClearDestination => self.destination.take().is_some(),
            SearchUpdate::ShiftDate { days } => self.dates.shift_focused(days),
            SearchUpdate::ToggleDateFocus => {
                self.dates.toggle_focus();
                true
            }
            SearchUpdate::AdjustGuests { field, delta } => {
                self.guests.adjust(field, delta, &self.limits)
            }
            SearchUpdate::SetToday(today) => {
                if today == self.dates.today() {
                    return false;
                }
                self.dates.set_today(today);
                true
            }
            SearchUpdate::Reset => {
                let today = self.dates.today();
                self.destination = None;
                self.dates = DateRangeState::new(today, self.default_nights, self.max_nights);
                self.guests = GuestCounts::default().clamped(&self.limits);
                tracing::debug!("Search criteria reset");
                true
            }
        }
    }
}
