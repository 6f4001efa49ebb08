//! Data layer - Pure records without UI coupling
//!
//! This module contains the static records the application works with
//! (tips, destinations, room offers), the guest counts shared by the
//! search and booking stores, and focus/status UI state.
//! NO imports from frontend/ or any rendering code.

pub mod booking;
pub mod destination;
pub mod guests;
pub mod tips;
pub mod ui_state;

pub use booking::*;
pub use destination::*;
pub use guests::*;
pub use tips::*;
pub use ui_state::*;
