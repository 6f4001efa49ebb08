//! TUI Frontend (ratatui-based)
//!
//! This module implements the Frontend trait using ratatui for terminal rendering.
//! It wraps crossterm for event handling and terminal management.

pub mod app;
pub mod cart;
pub mod date_picker;
pub mod destination_input;
pub mod guest_picker;
pub mod offers;
pub mod tip_rotator;

pub use app::TuiFrontend;

use ratatui::{
    style::{Color, Style},
    widgets::{Block, BorderType, Borders},
};

/// Bordered panel; the focused panel gets a highlighted border
pub(crate) fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let (border_type, color) = if focused {
        (BorderType::Thick, Color::Cyan)
    } else {
        (BorderType::Plain, Color::Gray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", title))
}
