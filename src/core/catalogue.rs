//! Local room catalogue.
//!
//! There is no booking backend, so offers are generated deterministically
//! from the destination: the same destination always lists the same hotels
//! and prices.

use crate::data::{Destination, RoomOffer};

const HOTEL_STYLES: [&str; 6] = [
    "Grand Hotel",
    "Eco Lodge",
    "Harbour Inn",
    "City Suites",
    "Garden House",
    "Old Town Rooms",
];

/// (room type, base nightly rate in cents, occupancy)
const ROOM_TYPES: [(&str, u64, u8); 4] = [
    ("Single", 7_900, 1),
    ("Double", 11_900, 2),
    ("Family Suite", 21_900, 4),
    ("Dormitory Bed", 3_500, 1),
];

/// Offers shown for a destination, cheapest first
pub fn offers_for(destination: &Destination) -> Vec<RoomOffer> {
    let seed = name_seed(&destination.name);
    let hotels = 2 + (seed % 3) as usize;

    let mut offers = Vec::new();
    for h in 0..hotels {
        let style = HOTEL_STYLES[((seed % HOTEL_STYLES.len() as u64) as usize + h) % HOTEL_STYLES.len()];
        let hotel = format!("{} {}", destination.name, style);
        // Each hotel lists two or three room types
        let types = 2 + ((seed >> (h + 1)) % 2) as usize;
        for t in 0..types {
            let (room_type, base, occupancy) = ROOM_TYPES[(h + t) % ROOM_TYPES.len()];
            // Up to +45% on the base rate, in whole dollars
            let markup = (seed.wrapping_mul(31).wrapping_add((h * 7 + t) as u64) % 46) * base / 100;
            let rate = (base + markup) / 100 * 100;
            offers.push(RoomOffer::new(&hotel, room_type, rate, occupancy));
        }
    }

    offers.sort_by(|a, b| {
        a.nightly_rate_cents
            .cmp(&b.nightly_rate_cents)
            .then_with(|| a.hotel.cmp(&b.hotel))
    });
    offers
}

/// FNV-1a over the lowercase name
fn name_seed(name: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in name.to_lowercase().bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kyoto() -> Destination {
        Destination::new("Kyoto", "Kansai", "Japan", 356)
    }

    #[test]
    fn test_offers_are_deterministic() {
        assert_eq!(offers_for(&kyoto()), offers_for(&kyoto()));
    }

    #[test]
    fn test_offers_sorted_by_price() {
        let offers = offers_for(&kyoto());
        assert!(offers.len() >= 4);
        for pair in offers.windows(2) {
            assert!(pair[0].nightly_rate_cents <= pair[1].nightly_rate_cents);
        }
    }

    #[test]
    fn test_offers_named_after_destination() {
        for offer in offers_for(&kyoto()) {
            assert!(offer.hotel.starts_with("Kyoto "));
            assert!(offer.max_occupancy >= 1);
            assert_eq!(offer.nightly_rate_cents % 100, 0);
        }
    }
}
