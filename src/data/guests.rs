//! Guest and room counts for a search.

use serde::{Deserialize, Serialize};

/// Which counter a guest adjustment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuestField {
    Adults,
    Children,
    Rooms,
}

impl GuestField {
    pub const ALL: [GuestField; 3] = [GuestField::Adults, GuestField::Children, GuestField::Rooms];

    pub fn label(&self) -> &'static str {
        match self {
            GuestField::Adults => "Adults",
            GuestField::Children => "Children",
            GuestField::Rooms => "Rooms",
        }
    }
}

/// Upper bounds for the guest picker (lower bounds are fixed: 1 adult, 0 children, 1 room)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestLimits {
    pub max_adults: u8,
    pub max_children: u8,
    pub max_rooms: u8,
}

impl Default for GuestLimits {
    fn default() -> Self {
        Self {
            max_adults: 16,
            max_children: 8,
            max_rooms: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuestCounts {
    pub adults: u8,
    pub children: u8,
    pub rooms: u8,
}

impl Default for GuestCounts {
    fn default() -> Self {
        Self {
            adults: 2,
            children: 0,
            rooms: 1,
        }
    }
}

impl GuestCounts {
    pub fn total_guests(&self) -> u32 {
        self.adults as u32 + self.children as u32
    }

    pub fn get(&self, field: GuestField) -> u8 {
        match field {
            GuestField::Adults => self.adults,
            GuestField::Children => self.children,
            GuestField::Rooms => self.rooms,
        }
    }

    /// Allowed range for a field given the other counters.
    ///
    /// Every room needs at least one adult, so adults never drop below the
    /// room count and rooms never exceed the adult count.
    pub fn bounds(&self, field: GuestField, limits: &GuestLimits) -> (u8, u8) {
        let max_adults = limits.max_adults.max(1);
        match field {
            GuestField::Adults => (self.rooms.clamp(1, max_adults), max_adults),
            GuestField::Children => (0, limits.max_children),
            GuestField::Rooms => {
                let max_rooms = limits.max_rooms.min(self.adults).min(max_adults);
                (1, max_rooms.max(1))
            }
        }
    }

    /// Pull every counter inside `limits`, keeping at least one adult per room
    pub fn clamped(self, limits: &GuestLimits) -> Self {
        let adults = self.adults.clamp(1, limits.max_adults.max(1));
        let max_rooms = limits.max_rooms.min(adults).max(1);
        Self {
            adults,
            children: self.children.min(limits.max_children),
            rooms: self.rooms.clamp(1, max_rooms),
        }
    }

    /// Apply a delta to one counter, saturating at its bounds.
    /// Returns true if the counter changed.
    pub fn adjust(&mut self, field: GuestField, delta: i32, limits: &GuestLimits) -> bool {
        let (min, max) = self.bounds(field, limits);
        let current = self.get(field) as i32;
        let next = (current + delta).clamp(min as i32, max as i32) as u8;
        if next as i32 == current {
            return false;
        }

        match field {
            GuestField::Adults => self.adults = next,
            GuestField::Children => self.children = next,
            GuestField::Rooms => self.rooms = next,
        }
        true
    }
}
