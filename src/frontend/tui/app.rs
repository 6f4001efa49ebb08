use crate::core::AppCore;
use crate::data::Panel;
use crate::frontend::tui::cart::CartView;
use crate::frontend::tui::destination_input::{render_suggestions, DestinationInput};
use crate::frontend::tui::offers::OffersView;
use crate::frontend::tui::tip_rotator::TipRotatorView;
use crate::frontend::tui::{date_picker, guest_picker};
use crate::frontend::{Frontend, FrontendEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Terminal,
};
use std::io;
use std::time::Duration;

const KEY_HINTS: &str = "Tab panels  a add  d remove  c confirm  y copy  t tips  q quit";

/// TUI Frontend using ratatui
///
/// This frontend renders the search screen using ratatui (terminal UI library)
/// and handles events via crossterm. It owns the destination TextArea;
/// everything else is read from `AppCore` at render time.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    poll_timeout: Duration,
    destination_input: DestinationInput,
}

impl TuiFrontend {
    /// Create a new TUI frontend
    ///
    /// Initializes terminal in raw mode, enables bracketed paste, and enters alternate screen.
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            poll_timeout: Duration::from_millis(16), // ~60 FPS
            destination_input: DestinationInput::new(),
        })
    }

    /// Set poll timeout (bounds how late a tip step is drawn)
    pub fn set_poll_timeout(&mut self, timeout: Duration) {
        self.poll_timeout = timeout;
    }

    /// Convert crossterm event to FrontendEvent
    fn convert_event(event: Event) -> Option<FrontendEvent> {
        match event {
            Event::Key(key_event) => {
                // Only process key press events (ignore repeats and releases)
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Some(FrontendEvent::key(key_event.code, key_event.modifiers))
            }
            Event::Resize(w, h) => Some(FrontendEvent::resize(w, h)),
            Event::Paste(text) => Some(FrontendEvent::paste(text)),
            _ => None,
        }
    }

    /// Send a key to the destination field and re-filter suggestions
    pub fn edit_destination(&mut self, core: &mut AppCore, key: KeyEvent) {
        if self.destination_input.input(key) {
            core.set_destination_query(&self.destination_input.text());
        }
    }

    /// Bracketed paste goes to the destination field when it has focus
    pub fn paste(&mut self, core: &mut AppCore, text: &str) {
        if core.ui_state.focused != Panel::Destination {
            return;
        }
        if self.destination_input.paste(text) {
            core.set_destination_query(&self.destination_input.text());
        }
    }
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        let mut events = Vec::new();

        // Wait up to poll_timeout for the first event, then drain the rest
        let mut timeout = self.poll_timeout;
        while event::poll(timeout)? {
            if let Some(frontend_event) = Self::convert_event(event::read()?) {
                events.push(frontend_event);
            }
            timeout = Duration::ZERO;
        }

        Ok(events)
    }

    fn render(&mut self, core: &mut dyn std::any::Any) -> Result<()> {
        let core = core
            .downcast_mut::<AppCore>()
            .context("render() called with wrong type - expected AppCore")?;

        self.destination_input.sync(core.destination_search.query());
        let core: &AppCore = core;

        let Self {
            terminal,
            destination_input,
            ..
        } = self;

        terminal.draw(|f| {
            let area = f.area();
            draw_screen(core, destination_input, area, f.buffer_mut());
        })?;

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        // Restore terminal
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        let size = self.terminal.size().unwrap_or_default();
        (size.width, size.height)
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}

/// Lay out and draw every panel. The dropdown is drawn last so it overlaps
/// the panels below the input.
fn draw_screen(core: &AppCore, destination_input: &mut DestinationInput, area: Rect, buf: &mut Buffer) {
    let focused = core.ui_state.focused;
    let tips_height = if core.tip_rotator().is_some() { 4 } else { 0 };

    let [search_area, pickers_area, main_area, tips_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(6),
        Constraint::Min(4),
        Constraint::Length(tips_height),
        Constraint::Length(1),
    ])
    .areas(area);

    let [dates_area, guests_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(pickers_area);
    let [offers_area, cart_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(main_area);

    destination_input.render(search_area, buf, focused == Panel::Destination);

    date_picker::render(core.search.dates(), dates_area, buf, focused == Panel::Dates);

    guest_picker::render(
        &core.guest_picker,
        &core.search.guests(),
        core.search.limits(),
        guests_area,
        buf,
        focused == Panel::Guests,
    );

    let criteria = core.search.criteria();
    let currency_symbol = core.config.booking.currency_symbol.as_str();
    OffersView {
        offers: core.offers(),
        cursor: core.ui_state.offer_cursor,
        nights: criteria.nights,
        currency_symbol,
    }
    .render(offers_area, buf, focused == Panel::Offers);

    CartView {
        booking: &core.booking,
        criteria: &criteria,
        cursor: core.ui_state.cart_cursor,
        currency_symbol,
    }
    .render(cart_area, buf, focused == Panel::Cart);

    if let Some(rotator) = core.tip_rotator() {
        TipRotatorView::new(rotator).render(tips_area, buf);
    }

    render_status(&core.ui_state.status_text, status_area, buf);

    if focused == Panel::Destination {
        render_suggestions(&core.destination_search, search_area, area, buf);
    }
}

fn render_status(status: &str, area: Rect, buf: &mut Buffer) {
    let hints_width = KEY_HINTS.len() as u16;
    let mut spans = vec![Span::styled(status.to_string(), Style::default().fg(Color::White))];
    let used = status.chars().count() as u16 + hints_width;
    if used < area.width {
        spans.push(Span::raw(" ".repeat((area.width - used) as usize)));
        spans.push(Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)));
    }
    Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::Black))
        .render(area, buf);
}
