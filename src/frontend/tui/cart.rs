//! Booking cart: picked rooms, capacity check and total.

use crate::core::{BookingStore, SearchCriteria};
use crate::data::{BookingStatus, Panel};
use crate::format::{format_guests, format_price};
use crate::frontend::tui::panel_block;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

pub struct CartView<'a> {
    pub booking: &'a BookingStore,
    pub criteria: &'a SearchCriteria,
    pub cursor: usize,
    pub currency_symbol: &'a str,
}

impl CartView<'_> {
    pub fn render(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        let mut lines = Vec::new();

        let (status, status_style) = match self.booking.status() {
            BookingStatus::Draft => ("Draft", Style::default().fg(Color::Yellow)),
            BookingStatus::Confirmed => (
                "Confirmed",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        };
        lines.push(Line::from(vec![
            Span::styled(status, status_style),
            Span::styled(
                format!("  {}", format_guests(&self.criteria.guests)),
                Style::default().fg(Color::Gray),
            ),
        ]));

        if self.booking.rooms().is_empty() {
            lines.push(Line::from(Span::styled(
                "No rooms yet (a to add)",
                Style::default().fg(Color::DarkGray),
            )));
        }

        for (i, room) in self.booking.rooms().iter().enumerate() {
            let line = Line::from(format!(
                "{}. {} - {} ({})",
                i + 1,
                room.hotel,
                room.room_type,
                format_price(room.stay_cents(self.criteria.nights), self.currency_symbol)
            ));
            lines.push(if focused && i == self.cursor {
                line.style(Style::default().bg(Color::Blue))
            } else {
                line
            });
        }

        let guests = self.criteria.guests.total_guests();
        let capacity = self.booking.capacity();
        let capacity_style = if capacity >= guests {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red)
        };
        lines.push(Line::from(vec![
            Span::raw(format!(
                "{}/{} rooms  ",
                self.booking.rooms().len(),
                self.criteria.guests.rooms
            )),
            Span::styled(format!("sleeps {}/{}", capacity, guests), capacity_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "Total {}",
                format_price(self.booking.total_cents(self.criteria.nights), self.currency_symbol)
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        Paragraph::new(lines)
            .block(panel_block(Panel::Cart.title(), focused))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
