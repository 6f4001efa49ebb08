use crate::clipboard::ClipboardSink;
use crate::config::Config;
use crate::core::actions::UiAction;
use crate::core::booking_store::{BookingOutcome, BookingStore, BookingUpdate};
use crate::core::catalogue::offers_for;
use crate::core::scheduler::RotationEvent;
use crate::core::search_store::{SearchStore, SearchUpdate};
use crate::core::tip_panel::TipPanel;
use crate::data::{BookingStatus, Destination, GuestField, Panel, RoomOffer, TipItem, UiState};
use crate::format::{format_destination, format_price};
use crate::widgets::{DestinationSearchState, GuestPickerState, RotationTiming, TipRotator};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use tokio::sync::mpsc;

/// Core application state (frontend-agnostic)
///
/// AppCore owns the stores and panel states and turns `UiAction`s and timer
/// steps into store updates. The TUI frontend only reads from it.
pub struct AppCore {
    /// Application configuration
    pub config: Config,

    /// Destination, dates and guests
    pub search: SearchStore,

    /// Rooms picked for the current search
    pub booking: BookingStore,

    /// Destination combobox
    pub destination_search: DestinationSearchState,

    /// Which guest counter +/- adjusts
    pub guest_picker: GuestPickerState,

    /// Focus, cursors and status bar
    pub ui_state: UiState,

    /// Offers for the chosen destination
    offers: Vec<RoomOffer>,

    tips: Vec<TipItem>,
    timing: RotationTiming,

    /// Mounted tip rotator (None while the tips panel is hidden)
    tip_panel: Option<TipPanel>,

    /// Bumped on every mount so steps from an old timer are ignored
    tip_generation: u64,

    rotation_tx: mpsc::UnboundedSender<RotationEvent>,

    clipboard: Box<dyn ClipboardSink>,

    /// Application running flag
    pub running: bool,

    /// Set when state changed and the frontend should redraw
    pub needs_render: bool,
}

impl AppCore {
    /// Build the core. Nothing is mounted yet; call `mount_tips()` from
    /// inside the runtime to start the rotator.
    pub fn new(
        config: Config,
        destinations: Vec<Destination>,
        tips: Vec<TipItem>,
        today: NaiveDate,
        rotation_tx: mpsc::UnboundedSender<RotationEvent>,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Result<Self> {
        let timing = config.rotation_timing()?;
        let search = SearchStore::new(
            today,
            config.search.default_nights,
            config.search.max_nights,
            config.search.guests,
        );
        let destination_search =
            DestinationSearchState::new(destinations, config.search.max_suggestions);

        tracing::debug!(
            destinations = destination_search.catalogue_len(),
            tips = tips.len(),
            "AppCore initialized"
        );

        Ok(Self {
            config,
            search,
            booking: BookingStore::new(),
            destination_search,
            guest_picker: GuestPickerState::new(),
            ui_state: UiState::new(),
            offers: Vec::new(),
            tips,
            timing,
            tip_panel: None,
            tip_generation: 0,
            rotation_tx,
            clipboard,
            running: true,
            needs_render: true,
        })
    }

    pub fn offers(&self) -> &[RoomOffer] {
        &self.offers
    }

    pub fn tip_rotator(&self) -> Option<&TipRotator> {
        self.tip_panel.as_ref().map(TipPanel::rotator)
    }

    pub fn tips_mounted(&self) -> bool {
        self.tip_panel.is_some()
    }

    /// Start the tip rotator. No-op if it is already mounted.
    pub fn mount_tips(&mut self) -> Result<()> {
        if self.tip_panel.is_some() {
            return Ok(());
        }
        let generation = self.tip_generation + 1;
        let panel = TipPanel::mount(
            self.tips.clone(),
            self.timing,
            generation,
            self.rotation_tx.clone(),
        )
        .context("Failed to start tip rotator")?;
        self.tip_generation = generation;
        self.tip_panel = Some(panel);
        self.needs_render = true;
        Ok(())
    }

    /// Stop the tip rotator and drop its state
    pub fn unmount_tips(&mut self) {
        if let Some(panel) = self.tip_panel.take() {
            panel.unmount();
            self.needs_render = true;
        }
    }

    pub fn toggle_tips(&mut self) {
        if self.tip_panel.is_some() {
            self.unmount_tips();
            self.ui_state.set_status("Tips hidden (t to show)");
        } else if let Err(e) = self.mount_tips() {
            tracing::warn!("{:#}", e);
            self.ui_state.set_status(format!("{:#}", e));
        } else {
            self.ui_state.set_status("Tips shown");
        }
        self.needs_render = true;
    }

    /// Feed a timer step to the mounted rotator. Returns true if it changed.
    pub fn handle_rotation_event(&mut self, event: RotationEvent) -> bool {
        let Some(panel) = self.tip_panel.as_mut() else {
            tracing::debug!(
                generation = event.generation,
                "Rotation step arrived with no tips mounted"
            );
            return false;
        };
        let changed = panel.handle_event(event);
        if changed {
            self.needs_render = true;
        }
        changed
    }

    /// Stop timers before exit
    pub fn shutdown(&mut self) {
        self.unmount_tips();
        self.running = false;
    }

    /// Keep the earliest check-in date current across midnight
    pub fn refresh_today(&mut self, today: NaiveDate) {
        if self.search.apply(SearchUpdate::SetToday(today)) {
            tracing::info!("Day rolled over to {}", today);
            self.needs_render = true;
        }
    }

    /// Destination text changed in the input field
    pub fn set_destination_query(&mut self, query: &str) {
        if query == self.destination_search.query() {
            return;
        }
        // Rejected edits are undone when the input resyncs on the next render
        self.needs_render = true;
        if self.booking_locked("changing the destination") {
            return;
        }
        let had_selection = self.destination_search.selected().is_some();
        self.destination_search.set_query(query);
        if had_selection && self.destination_search.selected().is_none() {
            self.change_destination(None);
        }
    }

    pub fn handle_action(&mut self, action: UiAction) {
        match action {
            UiAction::None | UiAction::TextInput => return,
            UiAction::Quit => {
                self.running = false;
                return;
            }
            UiAction::FocusNext => self.set_focus(self.ui_state.focused.next()),
            UiAction::FocusPrevious => self.set_focus(self.ui_state.focused.previous()),
            UiAction::ToggleTips => self.toggle_tips(),
            UiAction::AddRoom => self.add_room(),
            UiAction::RemoveRoom => self.remove_room(),
            UiAction::ConfirmBooking => self.update_booking(BookingUpdate::Confirm),
            UiAction::ClearBooking => self.update_booking(BookingUpdate::Clear),
            UiAction::CopySummary => self.copy_summary(),
            UiAction::ResetSearch => self.reset_search(),
            _ => match self.ui_state.focused {
                Panel::Destination => self.destination_action(action),
                Panel::Dates => self.dates_action(action),
                Panel::Guests => self.guests_action(action),
                Panel::Offers => self.offers_action(action),
                Panel::Cart => self.cart_action(action),
            },
        }
        self.needs_render = true;
    }

    fn set_focus(&mut self, panel: Panel) {
        if self.ui_state.focused == Panel::Destination {
            self.destination_search.close();
        }
        self.ui_state.focused = panel;
    }

    fn destination_action(&mut self, action: UiAction) {
        match action {
            UiAction::NavigateDown => self.destination_search.highlight_next(),
            UiAction::NavigateUp => self.destination_search.highlight_previous(),
            UiAction::Select => {
                if self.booking_locked("changing the destination") {
                    return;
                }
                if let Some(destination) = self.destination_search.commit() {
                    self.ui_state
                        .set_status(format!("Showing rooms in {}", format_destination(&destination)));
                    self.change_destination(Some(destination));
                    self.ui_state.focused = Panel::Dates;
                } else if self.destination_search.query().trim().is_empty() {
                    self.ui_state.set_status("Type a city name");
                } else {
                    self.ui_state.set_status("No destination matches that search");
                }
            }
            UiAction::Cancel => {
                if self.destination_search.is_open() {
                    self.destination_search.close();
                } else if !self.booking_locked("changing the destination") {
                    self.destination_search.clear();
                    self.change_destination(None);
                }
            }
            _ => {}
        }
    }

    fn dates_action(&mut self, action: UiAction) {
        let days = match action {
            UiAction::Decrease => -1,
            UiAction::Increase => 1,
            UiAction::NavigateUp => -7,
            UiAction::NavigateDown => 7,
            UiAction::Select => {
                self.search.apply(SearchUpdate::ToggleDateFocus);
                return;
            }
            _ => return,
        };
        if self.booking_locked("changing dates") {
            return;
        }
        if !self.search.apply(SearchUpdate::ShiftDate { days }) {
            self.ui_state.set_status(format!(
                "Stays run from today for 1 to {} nights",
                self.config.search.max_nights
            ));
        }
    }

    fn guests_action(&mut self, action: UiAction) {
        let delta = match action {
            UiAction::NavigateUp => {
                self.guest_picker.focus_previous();
                return;
            }
            UiAction::NavigateDown | UiAction::Select => {
                self.guest_picker.focus_next();
                return;
            }
            UiAction::Decrease => -1,
            UiAction::Increase => 1,
            _ => return,
        };

        if self.booking_locked("changing guests") {
            return;
        }
        let field = self.guest_picker.focused();
        if !self.search.apply(SearchUpdate::AdjustGuests { field, delta }) {
            let guests = self.search.guests();
            let (min, max) = guests.bounds(field, self.search.limits());
            let hint = match field {
                GuestField::Adults if delta < 0 => " (one adult per room)",
                GuestField::Rooms if delta > 0 => " (one adult per room)",
                _ => "",
            };
            self.ui_state.set_status(format!(
                "{} must stay between {} and {}{}",
                field.label(),
                min,
                max,
                hint
            ));
        }
    }

    fn offers_action(&mut self, action: UiAction) {
        match action {
            UiAction::NavigateUp => {
                self.ui_state.offer_cursor = self.ui_state.offer_cursor.saturating_sub(1);
            }
            UiAction::NavigateDown => {
                if self.ui_state.offer_cursor + 1 < self.offers.len() {
                    self.ui_state.offer_cursor += 1;
                }
            }
            UiAction::Select => self.add_room(),
            _ => {}
        }
    }

    fn cart_action(&mut self, action: UiAction) {
        match action {
            UiAction::NavigateUp => {
                self.ui_state.cart_cursor = self.ui_state.cart_cursor.saturating_sub(1);
            }
            UiAction::NavigateDown => {
                if self.ui_state.cart_cursor + 1 < self.booking.rooms().len() {
                    self.ui_state.cart_cursor += 1;
                }
            }
            UiAction::Select => self.update_booking(BookingUpdate::Confirm),
            _ => {}
        }
    }

    /// Switch destination. The cart belongs to the old destination, so it is cleared.
    fn change_destination(&mut self, destination: Option<Destination>) {
        let changed = match destination {
            Some(destination) => {
                self.offers = offers_for(&destination);
                self.search.apply(SearchUpdate::SetDestination(destination))
            }
            None => {
                self.offers.clear();
                self.search.apply(SearchUpdate::ClearDestination)
            }
        };
        self.ui_state.offer_cursor = 0;
        if changed && !self.booking.rooms().is_empty() {
            let criteria = self.search.criteria();
            self.booking.apply(BookingUpdate::Clear, &criteria);
            self.ui_state.cart_cursor = 0;
            tracing::debug!("Cart cleared after destination change");
        }
    }

    fn add_room(&mut self) {
        let Some(offer) = self.offers.get(self.ui_state.offer_cursor).cloned() else {
            self.ui_state.set_status("Pick a destination to see rooms");
            return;
        };
        let label = format!("{} - {}", offer.hotel, offer.room_type);
        let criteria = self.search.criteria();
        match self.booking.apply(BookingUpdate::AddRoom(offer), &criteria) {
            BookingOutcome::Rejected(reason) => self.ui_state.set_status(reason.to_string()),
            _ => self.ui_state.set_status(format!("Added {}", label)),
        }
    }

    fn remove_room(&mut self) {
        self.update_booking(BookingUpdate::RemoveRoom(self.ui_state.cart_cursor));
        let rooms = self.booking.rooms().len();
        if self.ui_state.cart_cursor >= rooms {
            self.ui_state.cart_cursor = rooms.saturating_sub(1);
        }
    }

    fn update_booking(&mut self, update: BookingUpdate) {
        let criteria = self.search.criteria();
        let message = match (&update, self.booking.apply(update.clone(), &criteria)) {
            (_, BookingOutcome::Rejected(reason)) => reason.to_string(),
            (_, BookingOutcome::Unchanged) => return,
            (BookingUpdate::Confirm, BookingOutcome::Changed) => format!(
                "Booking confirmed: {}",
                format_price(
                    self.booking.total_cents(criteria.nights),
                    &self.config.booking.currency_symbol
                )
            ),
            (BookingUpdate::Clear, BookingOutcome::Changed) => {
                self.ui_state.cart_cursor = 0;
                "Booking cleared".to_string()
            }
            (BookingUpdate::RemoveRoom(_), BookingOutcome::Changed) => "Room removed".to_string(),
            (BookingUpdate::AddRoom(_), BookingOutcome::Changed) => "Room added".to_string(),
        };
        self.ui_state.set_status(message);
    }

    fn copy_summary(&mut self) {
        let criteria = self.search.criteria();
        let summary = self
            .booking
            .summary(&criteria, &self.config.booking.currency_symbol);
        match self.clipboard.copy(&summary) {
            Ok(()) => self.ui_state.set_status("Booking summary copied"),
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {:#}", e);
                self.ui_state.set_status(format!("Copy failed: {:#}", e));
            }
        }
    }

    /// A confirmed booking pins the search it was confirmed against
    fn booking_locked(&mut self, change: &str) -> bool {
        if self.booking.status() != BookingStatus::Confirmed {
            return false;
        }
        self.ui_state
            .set_status(format!("Clear the confirmed booking (x) before {}", change));
        true
    }

    fn reset_search(&mut self) {
        if self.booking_locked("a new search") {
            return;
        }
        self.search.apply(SearchUpdate::Reset);
        self.destination_search.clear();
        self.change_destination(None);
        self.guest_picker = GuestPickerState::new();
        self.ui_state = UiState::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::RotationStep;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::time::Instant;

    #[derive(Default, Clone)]
    struct RecordingClipboard(Arc<Mutex<Vec<String>>>);

    impl ClipboardSink for RecordingClipboard {
        fn copy(&mut self, text: &str) -> Result<()> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn tips() -> Vec<TipItem> {
        vec![
            TipItem::new("Transportation", "tip A"),
            TipItem::new("Accommodation", "tip B"),
            TipItem::new("Activities", "tip C"),
            TipItem::new("Food", "tip D"),
        ]
    }

    fn destinations() -> Vec<Destination> {
        vec![
            Destination::new("Lisbon", "Lisbon District", "Portugal", 391),
            Destination::new("Porto", "Norte", "Portugal", 210),
            Destination::new("Paris", "Ile-de-France", "France", 1520),
        ]
    }

    fn app_with(
        clipboard: RecordingClipboard,
    ) -> (AppCore, mpsc::UnboundedReceiver<RotationEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let today = NaiveDate::from_ymd_opt(2026, 5, 10).unwrap();
        let app = AppCore::new(
            Config::default(),
            destinations(),
            tips(),
            today,
            tx,
            Box::new(clipboard),
        )
        .unwrap();
        (app, rx)
    }

    fn app() -> (AppCore, mpsc::UnboundedReceiver<RotationEvent>) {
        app_with(RecordingClipboard::default())
    }

    fn pick_lisbon(app: &mut AppCore) {
        app.set_destination_query("lis");
        app.handle_action(UiAction::Select);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mounted_tips_rotate_through_app() {
        let (mut app, mut rx) = app();
        app.mount_tips().unwrap();
        let start = Instant::now();

        let rotator = app.tip_rotator().unwrap();
        assert_eq!(rotator.current().category, "Transportation");
        assert!(rotator.is_visible());

        let fade = rx.recv().await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(10_000));
        assert!(app.handle_rotation_event(fade));
        assert!(!app.tip_rotator().unwrap().is_visible());
        assert_eq!(app.tip_rotator().unwrap().current_index(), 0);

        let advance = rx.recv().await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(10_600));
        assert!(app.handle_rotation_event(advance));
        let rotator = app.tip_rotator().unwrap();
        assert_eq!(rotator.current_index(), 1);
        assert_eq!(rotator.current().text, "tip B");
        assert!(rotator.is_visible());
        assert_eq!(rotator.active_markers(), vec![false, true, false, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_mutation_after_teardown() {
        let (mut app, mut rx) = app();
        app.mount_tips().unwrap();

        // Step already queued when the panel goes away
        let fade = rx.recv().await.unwrap();
        app.toggle_tips();
        assert!(!app.tips_mounted());
        assert!(app.tip_rotator().is_none());
        assert!(!app.handle_rotation_event(fade));

        // Timer is gone: nothing else arrives
        tokio::time::sleep(Duration::from_millis(60_000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remount_ignores_steps_from_old_mount() {
        let (mut app, mut rx) = app();
        app.mount_tips().unwrap();
        let stale = rx.recv().await.unwrap();

        app.toggle_tips();
        app.toggle_tips();
        assert!(app.tips_mounted());

        // A fade from the first mount must not hide the fresh rotator
        assert!(!app.handle_rotation_event(stale));
        assert!(app.tip_rotator().unwrap().is_visible());

        // The new timer starts its own 10 s period
        let start = Instant::now();
        let event = rx.recv().await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(10_000));
        assert_eq!(event.step, RotationStep::BeginFade);
        assert_eq!(event.generation, stale.generation + 1);
        assert!(app.handle_rotation_event(event));
    }

    #[tokio::test]
    async fn test_mount_rejects_empty_tips() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let today = NaiveDate::from_ymd_opt(2026, 5, 10).unwrap();
        let mut app = AppCore::new(
            Config::default(),
            destinations(),
            Vec::new(),
            today,
            tx,
            Box::new(RecordingClipboard::default()),
        )
        .unwrap();

        assert!(app.mount_tips().is_err());
        app.toggle_tips();
        assert!(!app.tips_mounted());
    }

    #[test]
    fn test_picking_destination_loads_offers() {
        let (mut app, _rx) = app();
        assert!(app.offers().is_empty());

        app.set_destination_query("lis");
        assert!(app.destination_search.is_open());
        pick_lisbon(&mut app);

        assert_eq!(app.search.destination().unwrap().name, "Lisbon");
        assert!(!app.offers().is_empty());
        assert_eq!(app.ui_state.focused, Panel::Dates);
        assert_eq!(app.destination_search.query(), "Lisbon, Portugal");
    }

    #[test]
    fn test_editing_committed_destination_clears_it() {
        let (mut app, _rx) = app();
        pick_lisbon(&mut app);
        app.ui_state.focused = Panel::Offers;
        app.handle_action(UiAction::AddRoom);
        assert_eq!(app.booking.rooms().len(), 1);

        app.set_destination_query("Lisbon, Portuga");
        assert!(app.search.destination().is_none());
        assert!(app.offers().is_empty());
        assert!(app.booking.rooms().is_empty());
    }

    #[test]
    fn test_booking_flow_and_summary_copy() {
        let clipboard = RecordingClipboard::default();
        let (mut app, _rx) = app_with(clipboard.clone());
        pick_lisbon(&mut app);

        // Two adults in one room: pick the first offer that sleeps two
        let index = app
            .offers()
            .iter()
            .position(|o| o.max_occupancy >= 2)
            .unwrap();
        app.ui_state.focused = Panel::Offers;
        for _ in 0..index {
            app.handle_action(UiAction::NavigateDown);
        }
        app.handle_action(UiAction::Select);
        app.handle_action(UiAction::ConfirmBooking);
        assert_eq!(app.booking.status(), BookingStatus::Confirmed);
        assert!(app.ui_state.status_text.starts_with("Booking confirmed: $"));

        app.handle_action(UiAction::CopySummary);
        let copied = clipboard.0.lock().unwrap();
        assert_eq!(copied.len(), 1);
        assert!(copied[0].starts_with("Confirmed booking\nLisbon, Portugal\n"));
    }

    #[test]
    fn test_confirmed_booking_pins_search() {
        let (mut app, _rx) = app();
        pick_lisbon(&mut app);
        let index = app
            .offers()
            .iter()
            .position(|o| o.max_occupancy >= 2)
            .unwrap();
        app.ui_state.focused = Panel::Offers;
        for _ in 0..index {
            app.handle_action(UiAction::NavigateDown);
        }
        app.handle_action(UiAction::Select);
        app.handle_action(UiAction::ConfirmBooking);
        assert_eq!(app.booking.status(), BookingStatus::Confirmed);

        let criteria = app.search.criteria();
        let total = app.booking.total_cents(criteria.nights);
        let locked = "Clear the confirmed booking (x) before";

        app.ui_state.focused = Panel::Guests;
        app.handle_action(UiAction::NavigateDown); // Children
        app.handle_action(UiAction::Increase);
        app.handle_action(UiAction::Increase);
        assert!(app.ui_state.status_text.starts_with(locked));

        app.ui_state.focused = Panel::Dates;
        app.handle_action(UiAction::Select); // check-out
        app.handle_action(UiAction::Increase);
        assert!(app.ui_state.status_text.starts_with(locked));

        app.ui_state.focused = Panel::Destination;
        app.set_destination_query("Lisbon, Portuga");
        assert!(app.ui_state.status_text.starts_with(locked));
        app.handle_action(UiAction::Cancel);
        assert!(app.ui_state.status_text.starts_with(locked));

        app.handle_action(UiAction::ResetSearch);
        assert!(app.ui_state.status_text.starts_with(locked));

        assert_eq!(app.search.criteria(), criteria);
        assert_eq!(app.destination_search.query(), "Lisbon, Portugal");
        assert_eq!(app.booking.status(), BookingStatus::Confirmed);
        assert_eq!(app.booking.total_cents(criteria.nights), total);
        assert!(app.booking.capacity() >= criteria.guests.total_guests());

        // Clearing the booking unlocks the search again
        app.handle_action(UiAction::ClearBooking);
        app.ui_state.focused = Panel::Guests;
        app.handle_action(UiAction::Increase);
        assert_eq!(app.search.guests().children, 1);
    }

    #[test]
    fn test_guest_rejection_sets_status() {
        let (mut app, _rx) = app();
        app.ui_state.focused = Panel::Guests;
        app.handle_action(UiAction::NavigateDown); // Children
        app.handle_action(UiAction::Decrease);
        assert_eq!(app.search.guests().children, 0);
        assert_eq!(app.ui_state.status_text, "Children must stay between 0 and 8");

        app.handle_action(UiAction::Increase);
        assert_eq!(app.search.guests().children, 1);
    }

    #[test]
    fn test_date_keys_shift_focused_date() {
        let (mut app, _rx) = app();
        let check_in = app.search.dates().check_in();
        app.ui_state.focused = Panel::Dates;

        app.handle_action(UiAction::NavigateDown);
        assert_eq!(app.search.dates().check_in(), check_in + chrono::Duration::days(7));

        app.handle_action(UiAction::Select);
        app.handle_action(UiAction::Decrease);
        assert_eq!(app.search.criteria().nights, 1);
        app.handle_action(UiAction::Decrease);
        assert_eq!(app.search.criteria().nights, 1);
        assert!(app.ui_state.status_text.starts_with("Stays run from today"));
    }

    #[test]
    fn test_quit_and_focus_cycle() {
        let (mut app, _rx) = app();
        app.handle_action(UiAction::FocusPrevious);
        assert_eq!(app.ui_state.focused, Panel::Cart);
        app.handle_action(UiAction::FocusNext);
        assert_eq!(app.ui_state.focused, Panel::Destination);

        app.handle_action(UiAction::Quit);
        assert!(!app.running);
    }
}
