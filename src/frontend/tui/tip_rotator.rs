//! Sustainable travel tip panel.
//!
//! Shows the current category and tip with one progress marker per tip.
//! While the rotator is fading, the text is drawn dimmed; the dim-to-bright
//! switch on advance is the terminal version of the fade-in.

use crate::format::progress_markers;
use crate::widgets::TipRotator;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

pub struct TipRotatorView<'a> {
    rotator: &'a TipRotator,
}

impl<'a> TipRotatorView<'a> {
    pub fn new(rotator: &'a TipRotator) -> Self {
        Self { rotator }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Green))
            .title(" Sustainable travel tip ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let tip = self.rotator.current();
        let (category_style, text_style) = if self.rotator.is_visible() {
            (
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::White),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            )
        };

        let markers = progress_markers(self.rotator.len(), self.rotator.current_index());
        let marker_width = markers.chars().count() as u16;

        // Markers sit on the right of the category line when they fit
        let mut header = vec![Span::styled(tip.category.as_str(), category_style)];
        let used = tip.category.chars().count() as u16 + marker_width;
        if used < inner.width {
            header.push(Span::raw(" ".repeat((inner.width - used) as usize)));
            header.push(Span::styled(markers, Style::default().fg(Color::Green)));
        }

        let lines = vec![
            Line::from(header),
            Line::from(Span::styled(tip.text.as_str(), text_style)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
