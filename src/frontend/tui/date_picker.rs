//! Check-in / check-out picker.

use crate::data::Panel;
use crate::format::format_nights;
use crate::frontend::tui::panel_block;
use crate::widgets::{DateFocus, DateRangeState};
use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub fn render(dates: &DateRangeState, area: Rect, buf: &mut Buffer, focused: bool) {
    let field = |label: &'static str, date: NaiveDate, which: DateFocus| {
        let active = focused && dates.focus() == which;
        let style = if active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(vec![
            Span::styled(format!("{:<10}", label), Style::default().fg(Color::Gray)),
            Span::styled(format!(" {} ", date.format("%a %b %-d, %Y")), style),
        ])
    };

    let mut lines = vec![
        field("Check-in", dates.check_in(), DateFocus::CheckIn),
        field("Check-out", dates.check_out(), DateFocus::CheckOut),
        Line::from(Span::styled(
            format_nights(dates.nights()),
            Style::default().fg(Color::Yellow),
        )),
    ];
    if focused {
        lines.push(Line::from(Span::styled(
            "←/→ day  ↑/↓ week  Enter switch",
            Style::default().fg(Color::DarkGray),
        )));
    }

    Paragraph::new(lines)
        .block(panel_block(Panel::Dates.title(), focused))
        .render(area, buf);
}
