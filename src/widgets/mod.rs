//! Widget state structs (rendering-agnostic)
//!
//! This module contains state-only structures for the interactive panels.
//! These structs hold data and provide methods for state manipulation,
//! but contain no rendering logic. The TUI frontend renders them with ratatui.

pub mod date_range;
pub mod destination_search;
pub mod guest_picker;
pub mod tip_rotator;

pub use date_range::{DateFocus, DateRangeState};
pub use destination_search::DestinationSearchState;
pub use guest_picker::GuestPickerState;
pub use tip_rotator::{RotationStep, RotationTiming, TipRotator};
