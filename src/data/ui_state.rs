//! UI State - Focus and status state
//!
//! This module contains UI state that is independent of rendering.
//! The TUI frontend reads from these structures.

/// Panels on the search screen, in Tab order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Panel {
    /// Destination combobox
    Destination,
    /// Check-in / check-out picker
    Dates,
    /// Adults / children / rooms counters
    Guests,
    /// Room offers for the chosen destination
    Offers,
    /// Booking cart
    Cart,
}

impl Panel {
    pub const ORDER: [Panel; 5] = [
        Panel::Destination,
        Panel::Dates,
        Panel::Guests,
        Panel::Offers,
        Panel::Cart,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Panel::Destination => "Where to?",
            Panel::Dates => "Dates",
            Panel::Guests => "Guests",
            Panel::Offers => "Rooms",
            Panel::Cart => "Your booking",
        }
    }

    pub fn next(self) -> Panel {
        let index = Self::ORDER.iter().position(|p| *p == self).unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Panel {
        let index = Self::ORDER.iter().position(|p| *p == self).unwrap_or(0);
        Self::ORDER[(index + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Panels where printable keys edit text instead of triggering shortcuts
    pub fn takes_text(&self) -> bool {
        matches!(self, Panel::Destination)
    }
}

/// Application UI state
#[derive(Clone, Debug)]
pub struct UiState {
    /// Panel that receives keyboard input
    pub focused: Panel,

    /// Status bar text
    pub status_text: String,

    /// Cursor in the offers list
    pub offer_cursor: usize,

    /// Cursor in the booking cart
    pub cart_cursor: usize,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            focused: Panel::Destination,
            status_text: String::from("Type a city, then Tab through dates and guests"),
            offer_cursor: 0,
            cart_cursor: 0,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status_text = text.into();
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_order_wraps() {
        assert_eq!(Panel::Destination.next(), Panel::Dates);
        assert_eq!(Panel::Cart.next(), Panel::Destination);
        assert_eq!(Panel::Destination.previous(), Panel::Cart);
        assert_eq!(Panel::Offers.previous(), Panel::Guests);
    }
}
