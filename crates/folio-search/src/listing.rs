use std::time::Instant;

use folio_core::config::SearchSettings;
use folio_core::traits::Record;

use crate::debounce::Debouncer;
use crate::paging::Pager;
use crate::query::{categories, Category, Query};
use crate::rank::{FuzzyRanker, Ranked, SearchOptions};
use crate::suggest::{suggestions, SuggestionPanel};

/// State behind the portfolio grid: the applied query, its ranked results,
/// the visible page and the autocomplete panel.
///
/// Typed text goes through the debouncer; category changes and suggestion
/// picks apply at once. Any change to the applied query re-ranks, resets the
/// page and refreshes the suggestions.
#[derive(Debug)]
pub struct Listing<'r, R> {
    records: &'r [R],
    ranker: FuzzyRanker,
    debouncer: Debouncer<String>,
    query: Query,
    results: Vec<Ranked<'r, R>>,
    pager: Pager,
    panel: SuggestionPanel,
    suggestion_limit: usize,
}

impl<'r, R: Record> Listing<'r, R> {
    pub fn new(records: &'r [R], settings: &SearchSettings) -> Self {
        let ranker = FuzzyRanker::new(SearchOptions::from(settings));
        let query = Query::default();
        let results = ranker.rank(records, &query);
        Self {
            records,
            ranker,
            debouncer: Debouncer::from_millis(settings.debounce_ms),
            query,
            results,
            pager: Pager::new(settings.page_initial, settings.page_step),
            panel: SuggestionPanel::new(),
            suggestion_limit: settings.suggestion_limit,
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn categories(&self) -> Vec<String> {
        categories(self.records)
    }

    pub fn results(&self) -> &[Ranked<'r, R>] {
        &self.results
    }

    /// The current page of results.
    pub fn visible(&self) -> &[Ranked<'r, R>] {
        self.pager.window(&self.results)
    }

    pub fn has_more(&self) -> bool {
        self.pager.has_more(self.results.len())
    }

    pub fn load_more(&mut self) {
        self.pager.load_more();
    }

    pub fn panel(&self) -> &SuggestionPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut SuggestionPanel {
        &mut self.panel
    }

    pub fn type_text(&mut self, text: &str, now: Instant) {
        self.panel.type_text(text);
        self.debouncer.push(text.to_string(), now);
    }

    /// Applies the debounced text if its delay has passed. Returns whether
    /// the results were recomputed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(text) => self.apply_text(text),
            None => false,
        }
    }

    pub fn select_category(&mut self, category: Category) -> bool {
        if self.query.category == category {
            return false;
        }
        self.query.category = category;
        self.rerank();
        true
    }

    /// Puts the suggestion's title in the search box and searches for it.
    pub fn select_suggestion(&mut self, id: &str) -> Option<String> {
        let title = self.panel.select(id)?.to_string();
        self.debouncer.flush();
        self.apply_text(title.clone());
        Some(title)
    }

    fn apply_text(&mut self, text: String) -> bool {
        if self.query.text == text {
            return false;
        }
        self.query.text = text;
        self.rerank();
        true
    }

    fn rerank(&mut self) {
        self.results = self.ranker.rank(self.records, &self.query);
        self.pager.reset();
        let picks = suggestions(&self.results, &self.query, self.suggestion_limit);
        self.panel.refresh(&picks);
    }
}
