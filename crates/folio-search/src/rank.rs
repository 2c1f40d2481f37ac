//! Layered fuzzy scoring.
//!
//! Every contribution is additive:
//!
//! | signal                                         | points          |
//! |------------------------------------------------|-----------------|
//! | title edit distance `d <= max(1, len/3)`        | `50 / (d + 1)`  |
//! | category equals query / contains query          | 40 / 20         |
//! | title contains query                            | 30              |
//! | space-joined tools contain query                | 10              |
//! | per query word (>= 2 chars) in title/category/tools | 15 / 10 / 5 |
//!
//! Records scoring zero are dropped. Ties keep collection order.

use std::collections::HashMap;

use folio_core::config::SearchSettings;
use folio_core::traits::Record;

use crate::distance::levenshtein;
use crate::query::{Normalized, Query, MIN_WORD_LEN};

pub const TITLE_DISTANCE_POINTS: f64 = 50.0;
pub const CATEGORY_EXACT_POINTS: f64 = 40.0;
pub const CATEGORY_CONTAINS_POINTS: f64 = 20.0;
pub const TITLE_CONTAINS_POINTS: f64 = 30.0;
pub const TOOLS_CONTAINS_POINTS: f64 = 10.0;
pub const WORD_IN_TITLE_POINTS: f64 = 15.0;
pub const WORD_IN_CATEGORY_POINTS: f64 = 10.0;
pub const WORD_IN_TOOLS_POINTS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Also measure edit distance against each title word and keep the
    /// smallest, so a typo of one word in a longer title still counts.
    pub title_word_typos: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { title_word_typos: true }
    }
}

impl From<&SearchSettings> for SearchOptions {
    fn from(s: &SearchSettings) -> Self {
        Self { title_word_typos: s.title_word_typos }
    }
}

/// Per-signal points for one record. `distance` is the edit distance used for
/// the typo signal, whether or not it fell under the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub distance: usize,
    pub typo: f64,
    pub category: f64,
    pub title: f64,
    pub tools: f64,
    pub words: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.typo + self.category + self.title + self.tools + self.words
    }
}

/// A record that passed filtering. `score` is zero when the query was blank
/// and no scoring took place.
#[derive(Debug)]
pub struct Ranked<'a, R> {
    pub record: &'a R,
    pub score: f64,
}

impl<R> Clone for Ranked<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Ranked<'_, R> {}

#[derive(Debug, Clone, Default)]
pub struct FuzzyRanker {
    options: SearchOptions,
}

impl FuzzyRanker {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Category-filters `records` and, for a non-blank query, scores and
    /// orders them best first. A blank query keeps collection order.
    pub fn rank<'a, R: Record>(&self, records: &'a [R], query: &Query) -> Vec<Ranked<'a, R>> {
        let candidates = records.iter().filter(|r| query.category.matches(r.category()));
        if query.is_blank() {
            return candidates.map(|record| Ranked { record, score: 0.0 }).collect();
        }

        let q = Normalized::new(&query.text);
        let mut distances: HashMap<String, usize> = HashMap::new();
        let mut ranked: Vec<Ranked<'a, R>> = candidates
            .filter_map(|record| {
                let score = self.breakdown_with(record, &q, &mut distances).total();
                (score > 0.0).then_some(Ranked { record, score })
            })
            .collect();
        // sort_by is stable: equal scores keep collection order.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        tracing::debug!(query = %q.text, category = %query.category, hits = ranked.len(), "ranked records");
        ranked
    }

    /// [`rank`](Self::rank) without the scores.
    pub fn search<'a, R: Record>(&self, records: &'a [R], query: &Query) -> Vec<&'a R> {
        self.rank(records, query).into_iter().map(|r| r.record).collect()
    }

    /// Scores one record against free text, ignoring any category filter.
    pub fn explain<R: Record>(&self, record: &R, text: &str) -> ScoreBreakdown {
        let q = Normalized::new(text);
        if q.text.is_empty() {
            return ScoreBreakdown::default();
        }
        self.breakdown_with(record, &q, &mut HashMap::new())
    }

    /// Hit counts per category for `text`, like facet counts: the wildcard
    /// total first, then categories in first-seen order with at least one hit.
    pub fn category_counts<R: Record>(&self, records: &[R], text: &str) -> Vec<(String, usize)> {
        let hits = self.rank(records, &Query::text(text));
        let mut counts: Vec<(String, usize)> = vec![(crate::query::Category::WILDCARD.to_string(), hits.len())];
        for h in &hits {
            let c = h.record.category();
            match counts.iter().skip(1).position(|(name, _)| name == c) {
                Some(i) => counts[i + 1].1 += 1,
                None => counts.push((c.to_string(), 1)),
            }
        }
        // Hits arrive in score order; report categories in collection order.
        let order = crate::query::categories(records);
        counts[1..].sort_by_key(|(name, _)| order.iter().position(|c| c == name));
        counts
    }

    fn breakdown_with<R: Record>(
        &self,
        record: &R,
        q: &Normalized,
        distances: &mut HashMap<String, usize>,
    ) -> ScoreBreakdown {
        let title = record.title().to_lowercase();
        let category = record.category().to_lowercase();
        let tools = record.tools().join(" ").to_lowercase();

        let distance = match distances.get(&title) {
            Some(&d) => d,
            None => {
                let d = self.title_distance(&q.text, &title);
                distances.insert(title.clone(), d);
                d
            }
        };

        let mut b = ScoreBreakdown { distance, ..ScoreBreakdown::default() };
        if distance <= q.threshold {
            b.typo = TITLE_DISTANCE_POINTS / (distance as f64 + 1.0);
        }
        if category == q.text {
            b.category = CATEGORY_EXACT_POINTS;
        } else if category.contains(&q.text) {
            b.category = CATEGORY_CONTAINS_POINTS;
        }
        if title.contains(&q.text) {
            b.title = TITLE_CONTAINS_POINTS;
        }
        if tools.contains(&q.text) {
            b.tools = TOOLS_CONTAINS_POINTS;
        }
        for word in &q.words {
            if title.contains(word.as_str()) {
                b.words += WORD_IN_TITLE_POINTS;
            }
            if category.contains(word.as_str()) {
                b.words += WORD_IN_CATEGORY_POINTS;
            }
            if tools.contains(word.as_str()) {
                b.words += WORD_IN_TOOLS_POINTS;
            }
        }
        b
    }

    fn title_distance(&self, query: &str, title: &str) -> usize {
        let whole = levenshtein(query, title);
        if !self.options.title_word_typos || query.chars().count() < MIN_WORD_LEN {
            return whole;
        }
        title
            .split_whitespace()
            .filter(|w| w.chars().count() >= MIN_WORD_LEN)
            .map(|w| levenshtein(query, w))
            .fold(whole, usize::min)
    }
}
