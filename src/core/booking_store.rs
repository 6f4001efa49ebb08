//! Room booking cart
//!
//! Holds the rooms picked for the current search and confirms them against
//! the search criteria. Like the search store, all changes go through
//! `apply()`.

use crate::core::search_store::SearchCriteria;
use crate::data::{BookingStatus, RoomOffer};
use crate::format::{format_date_range, format_destination, format_guests, format_nights, format_price};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum BookingUpdate {
    AddRoom(RoomOffer),
    RemoveRoom(usize),
    Clear,
    Confirm,
}

/// Why a booking change was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingRejection {
    AlreadyConfirmed,
    NoDestination,
    EmptyCart,
    RoomCountMismatch { requested: u8, booked: usize },
    NotEnoughCapacity { guests: u32, capacity: u32 },
    NoSuchRoom(usize),
}

impl fmt::Display for BookingRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyConfirmed => write!(f, "Booking already confirmed - clear it to start over"),
            Self::NoDestination => write!(f, "Choose a destination first"),
            Self::EmptyCart => write!(f, "Add at least one room"),
            Self::RoomCountMismatch { requested, booked } => write!(
                f,
                "You asked for {} room(s) but selected {}",
                requested, booked
            ),
            Self::NotEnoughCapacity { guests, capacity } => write!(
                f,
                "Selected rooms sleep {} but there are {} guests",
                capacity, guests
            ),
            Self::NoSuchRoom(index) => write!(f, "No room at position {}", index + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    Changed,
    Unchanged,
    Rejected(BookingRejection),
}

pub struct BookingStore {
    rooms: Vec<RoomOffer>,
    status: BookingStatus,
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingStore {
    pub fn new() -> Self {
        Self {
            rooms: Vec::new(),
            status: BookingStatus::Draft,
        }
    }

    pub fn rooms(&self) -> &[RoomOffer] {
        &self.rooms
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn capacity(&self) -> u32 {
        self.rooms.iter().map(|r| r.max_occupancy as u32).sum()
    }

    pub fn total_cents(&self, nights: u32) -> u64 {
        self.rooms.iter().map(|r| r.stay_cents(nights)).sum()
    }

    /// Apply a cart change against the current search
    pub fn apply(&mut self, update: BookingUpdate, criteria: &SearchCriteria) -> BookingOutcome {
        if self.status == BookingStatus::Confirmed && update != BookingUpdate::Clear {
            return BookingOutcome::Rejected(BookingRejection::AlreadyConfirmed);
        }

        match update {
            BookingUpdate::AddRoom(offer) => {
                if criteria.destination.is_none() {
                    return BookingOutcome::Rejected(BookingRejection::NoDestination);
                }
                tracing::debug!("Adding {} at {}", offer.room_type, offer.hotel);
                self.rooms.push(offer);
                BookingOutcome::Changed
            }
            BookingUpdate::RemoveRoom(index) => {
                if index >= self.rooms.len() {
                    return BookingOutcome::Rejected(BookingRejection::NoSuchRoom(index));
                }
                self.rooms.remove(index);
                BookingOutcome::Changed
            }
            BookingUpdate::Clear => {
                if self.rooms.is_empty() && self.status == BookingStatus::Draft {
                    return BookingOutcome::Unchanged;
                }
                self.rooms.clear();
                self.status = BookingStatus::Draft;
                BookingOutcome::Changed
            }
            BookingUpdate::Confirm => match self.check_confirmable(criteria) {
                Ok(()) => {
                    self.status = BookingStatus::Confirmed;
                    tracing::info!(
                        rooms = self.rooms.len(),
                        total_cents = self.total_cents(criteria.nights),
                        "Booking confirmed"
                    );
                    BookingOutcome::Changed
                }
                Err(rejection) => {
                    tracing::debug!("Booking rejected: {}", rejection);
                    BookingOutcome::Rejected(rejection)
                }
            },
        }
    }

    fn check_confirmable(&self, criteria: &SearchCriteria) -> Result<(), BookingRejection> {
        if criteria.destination.is_none() {
            return Err(BookingRejection::NoDestination);
        }
        if self.rooms.is_empty() {
            return Err(BookingRejection::EmptyCart);
        }
        if self.rooms.len() != criteria.guests.rooms as usize {
            return Err(BookingRejection::RoomCountMismatch {
                requested: criteria.guests.rooms,
                booked: self.rooms.len(),
            });
        }
        let guests = criteria.guests.total_guests();
        let capacity = self.capacity();
        if capacity < guests {
            return Err(BookingRejection::NotEnoughCapacity { guests, capacity });
        }
        Ok(())
    }

    /// Plain-text summary for the clipboard
    pub fn summary(&self, criteria: &SearchCriteria, currency_symbol: &str) -> String {
        let mut lines = Vec::new();
        let status = match self.status {
            BookingStatus::Draft => "Draft booking",
            BookingStatus::Confirmed => "Confirmed booking",
        };
        lines.push(status.to_string());
        if let Some(ref destination) = criteria.destination {
            lines.push(format_destination(destination));
        }
        lines.push(format!(
            "{} ({})",
            format_date_range(criteria.check_in, criteria.check_out),
            format_nights(criteria.nights)
        ));
        lines.push(format_guests(&criteria.guests));
        for room in &self.rooms {
            lines.push(format!(
                "  {} - {}: {} / night",
                room.hotel,
                room.room_type,
                format_price(room.nightly_rate_cents, currency_symbol)
            ));
        }
        lines.push(format!(
            "Total: {}",
            format_price(self.total_cents(criteria.nights), currency_symbol)
        ));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Destination, GuestCounts};
    use chrono::NaiveDate;

    fn criteria(rooms: u8, adults: u8, children: u8) -> SearchCriteria {
        SearchCriteria {
            destination: Some(Destination::new("Vienna", "Vienna", "Austria", 344)),
            check_in: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 6, 4).unwrap(),
            nights: 3,
            guests: GuestCounts {
                adults,
                children,
                rooms,
            },
        }
    }

    fn double() -> RoomOffer {
        RoomOffer::new("Vienna Grand Hotel", "Double", 12_000, 2)
    }

    fn family() -> RoomOffer {
        RoomOffer::new("Vienna Grand Hotel", "Family Suite", 22_000, 4)
    }

    #[test]
    fn test_add_requires_destination() {
        let mut store = BookingStore::new();
        let mut no_destination = criteria(1, 2, 0);
        no_destination.destination = None;

        assert_eq!(
            store.apply(BookingUpdate::AddRoom(double()), &no_destination),
            BookingOutcome::Rejected(BookingRejection::NoDestination)
        );
        assert!(store.rooms().is_empty());
    }

    #[test]
    fn test_totals_and_capacity() {
        let mut store = BookingStore::new();
        let c = criteria(2, 4, 2);
        store.apply(BookingUpdate::AddRoom(double()), &c);
        store.apply(BookingUpdate::AddRoom(family()), &c);

        assert_eq!(store.capacity(), 6);
        assert_eq!(store.total_cents(3), (12_000 + 22_000) * 3);
    }

    #[test]
    fn test_confirm_checks_room_count_and_capacity() {
        let mut store = BookingStore::new();
        let c = criteria(1, 2, 2);

        assert_eq!(
            store.apply(BookingUpdate::Confirm, &c),
            BookingOutcome::Rejected(BookingRejection::EmptyCart)
        );

        store.apply(BookingUpdate::AddRoom(double()), &c);
        assert_eq!(
            store.apply(BookingUpdate::Confirm, &c),
            BookingOutcome::Rejected(BookingRejection::NotEnoughCapacity {
                guests: 4,
                capacity: 2
            })
        );

        store.apply(BookingUpdate::AddRoom(family()), &c);
        assert_eq!(
            store.apply(BookingUpdate::Confirm, &c),
            BookingOutcome::Rejected(BookingRejection::RoomCountMismatch {
                requested: 1,
                booked: 2
            })
        );

        store.apply(BookingUpdate::RemoveRoom(0), &c);
        assert_eq!(store.apply(BookingUpdate::Confirm, &c), BookingOutcome::Changed);
        assert_eq!(store.status(), BookingStatus::Confirmed);
    }

    #[test]
    fn test_confirmed_cart_is_locked_until_cleared() {
        let mut store = BookingStore::new();
        let c = criteria(1, 2, 0);
        store.apply(BookingUpdate::AddRoom(double()), &c);
        store.apply(BookingUpdate::Confirm, &c);

        assert_eq!(
            store.apply(BookingUpdate::AddRoom(double()), &c),
            BookingOutcome::Rejected(BookingRejection::AlreadyConfirmed)
        );
        assert_eq!(store.apply(BookingUpdate::Clear, &c), BookingOutcome::Changed);
        assert_eq!(store.status(), BookingStatus::Draft);
        assert!(store.rooms().is_empty());
        assert_eq!(store.apply(BookingUpdate::Clear, &c), BookingOutcome::Unchanged);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = BookingStore::new();
        let c = criteria(1, 2, 0);
        assert_eq!(
            store.apply(BookingUpdate::RemoveRoom(3), &c),
            BookingOutcome::Rejected(BookingRejection::NoSuchRoom(3))
        );
    }

    #[test]
    fn test_summary_lists_rooms_and_total() {
        let mut store = BookingStore::new();
        let c = criteria(1, 2, 0);
        store.apply(BookingUpdate::AddRoom(double()), &c);

        let summary = store.summary(&c, "$");
        assert!(summary.starts_with("Draft booking\nVienna, Austria\n"));
        assert!(summary.contains("Jun 1 - Jun 4, 2026 (3 nights)"));
        assert!(summary.contains("2 adults, 1 room"));
        assert!(summary.contains("Vienna Grand Hotel - Double: $120.00 / night"));
        assert!(summary.ends_with("Total: $360.00"));
    }

    #[test]
    fn test_rejection_messages() {
        let msg = BookingRejection::NotEnoughCapacity {
            guests: 5,
            capacity: 4,
        }
        .to_string();
        assert_eq!(msg, "Selected rooms sleep 4 but there are 5 guests");
    }
}
