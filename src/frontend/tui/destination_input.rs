//! Destination combobox: a single-line TextArea plus the suggestion dropdown.
//!
//! The TextArea owns editing (cursor, word motions, undo). After every edit
//! the text is handed to `AppCore::set_destination_query`; when the core
//! rewrites the query (a committed suggestion), `sync()` copies it back.

use crate::data::Panel;
use crate::frontend::tui::panel_block;
use crate::widgets::DestinationSearchState;
use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use tui_textarea::{CursorMove, TextArea};

const PLACEHOLDER: &str = "City, region or country";

pub struct DestinationInput {
    textarea: TextArea<'static>,
}

impl Default for DestinationInput {
    fn default() -> Self {
        Self::new()
    }
}

impl DestinationInput {
    pub fn new() -> Self {
        Self {
            textarea: Self::build(""),
        }
    }

    fn build(text: &str) -> TextArea<'static> {
        let mut textarea = TextArea::new(vec![text.to_string()]);
        textarea.set_placeholder_text(PLACEHOLDER);
        textarea.set_placeholder_style(Style::default().fg(Color::DarkGray));
        textarea.set_cursor_line_style(Style::default());
        textarea.move_cursor(CursorMove::End);
        textarea
    }

    /// Current text. Always a single line.
    pub fn text(&self) -> String {
        self.textarea.lines().join(" ")
    }

    /// Feed a key to the TextArea. Returns true if the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        let before = self.text();
        self.textarea.input(key);
        if self.textarea.lines().len() > 1 {
            // Ctrl+M / Ctrl+J insert a newline; keep the field single-line
            let joined = self.text();
            self.textarea = Self::build(&joined);
        }
        self.text() != before
    }

    /// Insert pasted text at the cursor
    pub fn paste(&mut self, text: &str) -> bool {
        let single_line = text.replace(['\r', '\n'], " ");
        self.textarea.insert_str(single_line.trim())
    }

    /// Replace the text if the core rewrote the query
    pub fn sync(&mut self, query: &str) {
        if self.text() != query {
            self.textarea = Self::build(query);
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let cursor = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        self.textarea.set_cursor_style(cursor);
        self.textarea.set_block(panel_block(Panel::Destination.title(), focused));
        Widget::render(&self.textarea, area, buf);
    }
}

/// Render the suggestion list under `anchor`, clipped to `bounds`
pub fn render_suggestions(search: &DestinationSearchState, anchor: Rect, bounds: Rect, buf: &mut Buffer) {
    if !search.is_open() {
        return;
    }
    let matches = search.matches();
    let top = anchor.y + anchor.height;
    let bottom = bounds.y + bounds.height;
    if top >= bottom {
        return;
    }
    let height = (matches.len() as u16 + 2).min(bottom - top);
    let area = Rect::new(anchor.x, top, anchor.width, height);

    let highlight = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = matches
        .iter()
        .enumerate()
        .map(|(i, destination)| {
            let text = destination.search_text();
            let mut spans = highlighted_spans(&text, &search.match_spans(&text), highlight);
            spans.push(Span::styled(
                format!("  {} hotels", destination.hotel_count),
                Style::default().fg(Color::DarkGray),
            ));
            let line = Line::from(spans);
            if i == search.highlighted_index() {
                line.style(Style::default().bg(Color::Blue))
            } else {
                line
            }
        })
        .collect();

    Clear.render(area, buf);
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .render(area, buf);
}

/// Split `text` into plain and highlighted spans at the given byte ranges
fn highlighted_spans(text: &str, ranges: &[(usize, usize)], highlight: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut pos = 0;
    for &(start, end) in ranges {
        if start < pos || end > text.len() || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            continue;
        }
        if start > pos {
            spans.push(Span::raw(text[pos..start].to_string()));
        }
        spans.push(Span::styled(text[start..end].to_string(), highlight));
        pos = end;
    }
    if pos < text.len() {
        spans.push(Span::raw(text[pos..].to_string()));
    }
    spans
}
