use thiserror::Error;

/// A path string that cannot be parsed. Well-formed paths that simply do not
/// exist in a document are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("empty segment at byte {0}")]
    EmptySegment(usize),

    #[error("unbalanced bracket at byte {0}")]
    UnbalancedBracket(usize),

    #[error("invalid index '{index}' at byte {at}")]
    InvalidIndex { index: String, at: usize },
}

pub type Result<T> = std::result::Result<T, PathError>;
