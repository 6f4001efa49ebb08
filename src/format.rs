//! Display formatting helpers shared by every panel.

use crate::data::{Destination, GuestCounts};
use chrono::{Datelike, NaiveDate};

/// Format an amount in the smallest currency unit, e.g. `123450` -> `$1,234.50`
pub fn format_price(cents: u64, currency_symbol: &str) -> String {
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}{}.{:02}", currency_symbol, grouped, fraction)
}

/// `Mar 3 - Mar 7, 2026`, or `Dec 30, 2026 - Jan 2, 2027` across years
pub fn format_date_range(check_in: NaiveDate, check_out: NaiveDate) -> String {
    if check_in.year() == check_out.year() {
        format!(
            "{} - {}",
            check_in.format("%b %-d"),
            check_out.format("%b %-d, %Y")
        )
    } else {
        format!(
            "{} - {}",
            check_in.format("%b %-d, %Y"),
            check_out.format("%b %-d, %Y")
        )
    }
}

pub fn format_nights(nights: u32) -> String {
    plural(nights, "night", "nights")
}

/// `2 adults, 1 child, 1 room` (children left out when there are none)
pub fn format_guests(counts: &GuestCounts) -> String {
    let mut parts = vec![plural(counts.adults as u32, "adult", "adults")];
    if counts.children > 0 {
        parts.push(plural(counts.children as u32, "child", "children"));
    }
    parts.push(plural(counts.rooms as u32, "room", "rooms"));
    parts.join(", ")
}

/// `Lisbon, Portugal`
pub fn format_destination(destination: &Destination) -> String {
    format!("{}, {}", destination.name, destination.country)
}

/// Progress row for the tip rotator, e.g. `● ○ ○ ○`
pub fn progress_markers(count: usize, active: usize) -> String {
    (0..count)
        .map(|i| if i == active { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

fn plural(n: u32, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, plural)
    }
}
