/// A bookable room at a hotel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomOffer {
    pub hotel: String,
    pub room_type: String,
    /// Price per night in the smallest currency unit
    pub nightly_rate_cents: u64,
    pub max_occupancy: u8,
}

impl RoomOffer {
    pub fn new(hotel: &str, room_type: &str, nightly_rate_cents: u64, max_occupancy: u8) -> Self {
        Self {
            hotel: hotel.to_string(),
            room_type: room_type.to_string(),
            nightly_rate_cents,
            max_occupancy,
        }
    }

    /// Price of this room for a stay of `nights`
    pub fn stay_cents(&self, nights: u32) -> u64 {
        self.nightly_rate_cents.saturating_mul(nights as u64)
    }
}

/// Lifecycle of the booking cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Draft,
    Confirmed,
}
