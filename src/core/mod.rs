//! Core application logic layer
//!
//! This module contains the stores, the tip rotation timer, and the
//! action handling that ties them together.
//! NO imports from frontend/ or rendering code.
//! Core updates data structures in the data layer, frontends read and render.

pub mod actions;
pub mod app_core;
pub mod booking_store;
pub mod catalogue;
pub mod scheduler;
pub mod search_store;
pub mod tip_panel;

pub use actions::{route_input, UiAction};
pub use app_core::AppCore;
pub use booking_store::BookingStore;
pub use scheduler::RotationEvent;
pub use search_store::SearchCriteria;
