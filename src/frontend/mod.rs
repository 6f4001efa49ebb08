//! Frontend abstraction layer
//!
//! This module defines the `Frontend` trait the TUI implements.
//! It provides a unified interface for event polling, rendering, and cleanup.

pub mod events;
pub mod tui;

use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

/// Frontend trait
///
/// The Frontend trait separates rendering concerns from business logic.
/// A frontend reads `AppCore` state and draws it; it never updates the
/// stores directly.
pub trait Frontend {
    /// Poll for user input events
    ///
    /// Returns all pending events (keyboard, resize, paste) converted to the
    /// frontend-agnostic `FrontendEvent` enum, or an empty list on timeout.
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current application state
    ///
    /// Called whenever the core sets `needs_render`. The argument is the
    /// `AppCore`; mutable because the frontend may sync widget state
    /// (e.g. the destination text field) from it.
    fn render(&mut self, app: &mut dyn std::any::Any) -> Result<()>;

    /// Cleanup and shutdown the frontend
    ///
    /// Restores the terminal before the application exits.
    fn cleanup(&mut self) -> Result<()>;

    /// Current terminal size in characters
    fn size(&self) -> (u16, u16);
}
