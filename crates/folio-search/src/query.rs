use std::collections::HashSet;
use std::fmt;

use folio_core::traits::Record;

/// Category filter. `All` lets every record through; a named category must
/// equal the record's category exactly (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    All,
    Named(String),
}

impl Category {
    pub const WILDCARD: &'static str = "All";

    pub fn parse(label: &str) -> Self {
        if label == Self::WILDCARD { Self::All } else { Self::Named(label.to_string()) }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::WILDCARD,
            Self::Named(name) => name,
        }
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free text plus category, as typed by the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    pub text: String,
    pub category: Category,
}

impl Query {
    pub fn new(text: impl Into<String>, category: impl Into<Category>) -> Self {
        Self { text: text.into(), category: category.into() }
    }

    /// Free text across every category.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, Category::All)
    }

    /// True when there is nothing to score against.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

/// Query text prepared once per ranking call.
#[derive(Debug, Clone)]
pub(crate) struct Normalized {
    pub text: String,
    pub words: Vec<String>,
    pub threshold: usize,
}

pub(crate) const MIN_WORD_LEN: usize = 2;

impl Normalized {
    pub fn new(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        let words = text
            .split_whitespace()
            .filter(|w| w.chars().count() >= MIN_WORD_LEN)
            .map(str::to_string)
            .collect();
        let threshold = (text.chars().count() / 3).max(1);
        Self { text, words, threshold }
    }
}

/// Filter chips: the wildcard first, then each distinct category in
/// first-seen order.
pub fn categories<R: Record>(records: &[R]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = vec![Category::WILDCARD.to_string()];
    for r in records {
        let c = r.category();
        if c != Category::WILDCARD && seen.insert(c) {
            out.push(c.to_string());
        }
    }
    out
}
