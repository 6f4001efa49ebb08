//! Adults / children / rooms counters.

use crate::data::{GuestCounts, GuestField, GuestLimits, Panel};
use crate::frontend::tui::panel_block;
use crate::widgets::GuestPickerState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub fn render(
    picker: &GuestPickerState,
    counts: &GuestCounts,
    limits: &GuestLimits,
    area: Rect,
    buf: &mut Buffer,
    focused: bool,
) {
    let lines: Vec<Line> = GuestField::ALL
        .iter()
        .map(|&field| {
            let value = counts.get(field);
            let (min, max) = counts.bounds(field, limits);
            let active = focused && picker.focused() == field;
            let enabled = Style::default().fg(Color::Cyan);
            let disabled = Style::default().fg(Color::DarkGray);
            let value_style = if active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(format!("{:<10}", field.label()), Style::default().fg(Color::Gray)),
                Span::styled("- ", if value > min { enabled } else { disabled }),
                Span::styled(format!("{:>2}", value), value_style),
                Span::styled(" +", if value < max { enabled } else { disabled }),
            ])
        })
        .collect();

    Paragraph::new(lines)
        .block(panel_block(Panel::Guests.title(), focused))
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_minus_at_lower_bound() {
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        let counts = GuestCounts::default();
        render(
            &GuestPickerState::new(),
            &counts,
            &GuestLimits::default(),
            area,
            &mut buf,
            false,
        );

        // Children row: 0 children, so "-" is greyed out
        let row: String = (0..30).map(|x| buf[(x, 2)].symbol().to_string()).collect();
        assert!(row.starts_with("│Children  -  0 +"));
        assert_eq!(buf[(11, 2)].fg, Color::DarkGray);
        assert_eq!(buf[(16, 2)].fg, Color::Cyan);
    }
}
