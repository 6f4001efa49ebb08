//! Shared action vocabulary for the search screen.
//!
//! Translates raw `KeyEvent`s into semantic `UiAction`s based on which panel
//! has focus, so the core never matches on key codes itself.

use crate::data::Panel;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// All possible screen actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Quit,

    // Panel focus
    FocusNext,
    FocusPrevious,

    // Navigation within a panel
    NavigateUp,
    NavigateDown,
    Decrease, // Left / '-'
    Increase, // Right / '+'

    // Selection/Confirmation
    Select, // Enter
    Cancel, // Esc

    // Booking
    AddRoom,        // 'a'
    RemoveRoom,     // 'd' / Delete
    ConfirmBooking, // 'c'
    ClearBooking,   // 'x'
    CopySummary,    // 'y'

    ToggleTips,  // 't'
    ResetSearch, // 'r'

    /// Key goes to the destination text field
    TextInput,

    // No action (key not bound or not applicable in this panel)
    None,
}

/// Route a key event to a UiAction based on the focused panel
pub fn route_input(key: KeyEvent, panel: Panel) -> UiAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => UiAction::Quit,
            KeyCode::Char('t') => UiAction::ToggleTips,
            _ if panel.takes_text() => UiAction::TextInput,
            _ => UiAction::None,
        };
    }

    match key.code {
        KeyCode::Tab => return UiAction::FocusNext,
        KeyCode::BackTab => return UiAction::FocusPrevious,
        KeyCode::Esc => return UiAction::Cancel,
        KeyCode::Enter => return UiAction::Select,
        KeyCode::Up => return UiAction::NavigateUp,
        KeyCode::Down => return UiAction::NavigateDown,
        _ => {}
    }

    if panel.takes_text() {
        return UiAction::TextInput;
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('-') => UiAction::Decrease,
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => UiAction::Increase,
        KeyCode::Char(' ') if panel == Panel::Offers => UiAction::AddRoom,
        KeyCode::Char('a') => UiAction::AddRoom,
        KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => UiAction::RemoveRoom,
        KeyCode::Char('c') => UiAction::ConfirmBooking,
        KeyCode::Char('x') => UiAction::ClearBooking,
        KeyCode::Char('y') => UiAction::CopySummary,
        KeyCode::Char('t') => UiAction::ToggleTips,
        KeyCode::Char('r') => UiAction::ResetSearch,
        KeyCode::Char('q') => UiAction::Quit,
        _ => UiAction::None,
    }
}
