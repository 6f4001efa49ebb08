//! Destination combobox state (rendering-agnostic)
//!
//! Holds the query, the filtered suggestion list, the highlighted suggestion
//! and the committed selection. The TUI owns the text input itself and feeds
//! every edit through `set_query()`.

use crate::data::Destination;
use crate::format::format_destination;
use aho_corasick::{AhoCorasick, MatchKind};

pub const DEFAULT_MAX_SUGGESTIONS: usize = 8;

pub struct DestinationSearchState {
    catalogue: Vec<Destination>,
    query: String,
    terms: Vec<String>,
    /// Indexes into `catalogue`, best match first
    matches: Vec<usize>,
    highlighted: usize,
    open: bool,
    selected: Option<usize>,
    max_suggestions: usize,
}

impl DestinationSearchState {
    pub fn new(catalogue: Vec<Destination>, max_suggestions: usize) -> Self {
        Self {
            catalogue,
            query: String::new(),
            terms: Vec::new(),
            matches: Vec::new(),
            highlighted: 0,
            open: false,
            selected: None,
            max_suggestions: max_suggestions.max(1),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub fn matches(&self) -> Vec<&Destination> {
        self.matches.iter().map(|&i| &self.catalogue[i]).collect()
    }

    pub fn selected(&self) -> Option<&Destination> {
        self.selected.map(|i| &self.catalogue[i])
    }

    pub fn catalogue_len(&self) -> usize {
        self.catalogue.len()
    }

    /// Replace the query and re-filter the suggestions.
    ///
    /// Editing away from the committed destination's display text drops the
    /// selection. The dropdown opens whenever there is something to pick.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.terms = query_terms(query);
        self.matches = find_matches(&self.catalogue, &self.terms, self.max_suggestions);
        self.highlighted = 0;

        if let Some(index) = self.selected {
            if format_destination(&self.catalogue[index]) != self.query {
                self.selected = None;
            }
        }

        self.open = self.selected.is_none() && !self.matches.is_empty();
    }

    pub fn highlight_next(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        self.open = true;
        if self.highlighted + 1 < self.matches.len() {
            self.highlighted += 1;
        } else {
            self.highlighted = 0; // Wrap around
        }
    }

    pub fn highlight_previous(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        self.open = true;
        if self.highlighted > 0 {
            self.highlighted -= 1;
        } else {
            self.highlighted = self.matches.len() - 1; // Wrap around
        }
    }

    /// Pick the highlighted suggestion.
    ///
    /// Closes the dropdown and rewrites the query to the destination's
    /// display text. Returns the chosen destination.
    pub fn commit(&mut self) -> Option<Destination> {
        let index = *self.matches.get(self.highlighted)?;
        self.selected = Some(index);
        self.query = format_destination(&self.catalogue[index]);
        self.terms = query_terms(&self.query);
        self.open = false;
        tracing::debug!("Committed destination {}", self.catalogue[index].name);
        Some(self.catalogue[index].clone())
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.terms.clear();
        self.matches.clear();
        self.highlighted = 0;
        self.open = false;
        self.selected = None;
    }

    /// Byte ranges in `text` that match the current query terms
    pub fn match_spans(&self, text: &str) -> Vec<(usize, usize)> {
        if self.terms.is_empty() {
            return Vec::new();
        }

        let automaton = match AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&self.terms)
        {
            Ok(ac) => ac,
            Err(e) => {
                tracing::warn!("Failed to build highlight matcher: {}", e);
                return Vec::new();
            }
        };

        automaton
            .find_iter(text)
            .map(|m| (m.start(), m.end()))
            .collect()
    }
}

/// Split a query on whitespace and commas, dropping case-insensitive duplicates
fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = query
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect();
    terms.sort_by_key(|t| t.to_ascii_lowercase());
    terms.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
    terms
}

/// Destinations containing every term, name-prefix matches first, then by name
fn find_matches(catalogue: &[Destination], terms: &[String], limit: usize) -> Vec<usize> {
    if terms.is_empty() {
        return Vec::new();
    }

    let automaton = match AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(terms)
    {
        Ok(ac) => ac,
        Err(e) => {
            tracing::warn!("Failed to build destination matcher: {}", e);
            return Vec::new();
        }
    };

    let mut found: Vec<(bool, usize)> = Vec::new();
    for (index, destination) in catalogue.iter().enumerate() {
        let haystack = destination.search_text();
        let mut seen = vec![false; terms.len()];
        for m in automaton.find_overlapping_iter(&haystack) {
            seen[m.pattern().as_usize()] = true;
        }
        if seen.iter().all(|s| *s) {
            let name = destination.name.to_ascii_lowercase();
            let prefix = terms
                .iter()
                .any(|t| name.starts_with(&t.to_ascii_lowercase()));
            found.push((prefix, index));
        }
    }

    found.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| catalogue[a.1].name.cmp(&catalogue[b.1].name))
    });
    found.into_iter().take(limit).map(|(_, i)| i).collect()
}
