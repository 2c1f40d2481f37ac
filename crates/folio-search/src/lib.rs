//! folio-search
//!
//! Typo-tolerant ranking over an in-memory project list, plus the listing
//! helpers that drive it: category chips, "load more" paging, query debounce
//! and the autocomplete panel.

pub mod debounce;
pub mod distance;
pub mod listing;
pub mod paging;
pub mod query;
pub mod rank;
pub mod suggest;

pub use debounce::Debouncer;
pub use distance::levenshtein;
pub use listing::Listing;
pub use paging::Pager;
pub use query::{categories, Category, Query};
pub use rank::{FuzzyRanker, Ranked, ScoreBreakdown, SearchOptions};
pub use suggest::{suggestions, Dismiss, Suggestion, SuggestionPanel, DEFAULT_SUGGESTION_LIMIT};
