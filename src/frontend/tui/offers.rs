//! Room offers for the chosen destination.

use crate::data::{Panel, RoomOffer};
use crate::format::format_price;
use crate::frontend::tui::panel_block;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct OffersView<'a> {
    pub offers: &'a [RoomOffer],
    pub cursor: usize,
    pub nights: u32,
    pub currency_symbol: &'a str,
}

impl OffersView<'_> {
    pub fn render(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        let block = panel_block(Panel::Offers.title(), focused);
        let inner = block.inner(area);

        if self.offers.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "Choose a destination to see rooms",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block)
            .render(area, buf);
            return;
        }

        let lines: Vec<Line> = self
            .offers
            .iter()
            .enumerate()
            .map(|(i, offer)| {
                let line = Line::from(vec![
                    Span::styled(
                        format!("{} ", offer.hotel),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("{} ", offer.room_type)),
                    Span::styled(
                        format!("sleeps {} ", offer.max_occupancy),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(
                        format!("{}/night ", format_price(offer.nightly_rate_cents, self.currency_symbol)),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::styled(
                        format!("({})", format_price(offer.stay_cents(self.nights), self.currency_symbol)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]);
                if i == self.cursor && focused {
                    line.style(Style::default().bg(Color::Blue))
                } else {
                    line
                }
            })
            .collect();

        // Keep the cursor row on screen
        let visible = inner.height.max(1) as usize;
        let scroll = self.cursor.saturating_sub(visible - 1) as u16;

        Paragraph::new(lines)
            .block(block)
            .scroll((scroll, 0))
            .render(area, buf);
    }
}
