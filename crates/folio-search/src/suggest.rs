use std::collections::HashSet;

use folio_core::traits::Record;

use crate::query::Query;
use crate::rank::Ranked;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Autocomplete candidates: the first `limit` ranked records, skipping repeats
/// of an id or a (case-insensitive) title already offered. Empty for a blank
/// query.
pub fn suggestions<'a, R: Record>(ranked: &[Ranked<'a, R>], query: &Query, limit: usize) -> Vec<&'a R> {
    if query.is_blank() {
        return Vec::new();
    }
    let mut ids = HashSet::new();
    let mut titles = HashSet::new();
    ranked
        .iter()
        .map(|r| r.record)
        .filter(|r| ids.insert(r.id().to_string()) && titles.insert(r.title().to_lowercase()))
        .take(limit)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub id: String,
    pub title: String,
}

impl Suggestion {
    pub fn of<R: Record>(record: &R) -> Self {
        Self { id: record.id().to_string(), title: record.title().to_string() }
    }
}

/// Why the panel closed without a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismiss {
    Escape,
    ClickOutside,
    NavigateAway,
}

/// Open/closed state of the autocomplete list under the search box.
///
/// Focusing or typing opens it; it is only visible while open and non-empty.
/// Selecting a suggestion copies its title into the input and closes the
/// list. Selecting the same suggestion again leaves the same state.
#[derive(Debug, Clone, Default)]
pub struct SuggestionPanel {
    input: String,
    open: bool,
    items: Vec<Suggestion>,
}

impl SuggestionPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_visible(&self) -> bool {
        self.open && !self.items.is_empty()
    }

    pub fn focus(&mut self) {
        self.open = true;
    }

    pub fn type_text(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.open = true;
    }

    /// Replaces the candidate list, typically after the debounced query ran.
    pub fn refresh<R: Record>(&mut self, records: &[&R]) {
        self.items = records.iter().map(|r| Suggestion::of(*r)).collect();
    }

    /// Applies the suggestion with `id`. Returns the new input text, or
    /// `None` (and changes nothing) when no such suggestion is listed.
    pub fn select(&mut self, id: &str) -> Option<&str> {
        let title = self.items.iter().find(|s| s.id == id)?.title.clone();
        self.input = title;
        self.open = false;
        Some(&self.input)
    }

    pub fn dismiss(&mut self, reason: Dismiss) {
        tracing::trace!(?reason, "suggestions dismissed");
        self.open = false;
    }
}
