use std::fmt;
use std::str::FromStr;

use crate::error::{PathError, Result};

/// One step from a container to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object field. A key made only of digits also indexes a sequence, so
    /// `testimonials.2` and `testimonials[2]` address the same slot.
    Key(String),
    Index(usize),
}

/// A validated, non-empty location inside a document, e.g. `projects[2].tools`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocPath {
    segments: Vec<Segment>,
}

impl DocPath {
    pub fn from_key(key: impl Into<String>) -> Self {
        Self { segments: vec![Segment::Key(key.into())] }
    }

    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(Segment::Key(key.into()));
        self
    }

    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(Segment::Index(index));
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Terminal segment and the segments leading to its container.
    pub fn split_last(&self) -> Option<(&Segment, &[Segment])> {
        self.segments.split_last()
    }

    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }
        let bytes = input.as_bytes();
        let mut segments = Vec::new();
        let mut after_dot = false;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'.' => {
                    if segments.is_empty() || after_dot {
                        return Err(PathError::EmptySegment(i));
                    }
                    after_dot = true;
                    i += 1;
                }
                b'[' => {
                    if after_dot {
                        return Err(PathError::EmptySegment(i));
                    }
                    let close = input[i + 1..]
                        .find(|c: char| c == ']' || c == '[')
                        .map(|off| i + 1 + off)
                        .filter(|&at| bytes[at] == b']')
                        .ok_or(PathError::UnbalancedBracket(i))?;
                    let raw = &input[i + 1..close];
                    segments.push(Segment::Index(parse_index(raw, i + 1)?));
                    i = close + 1;
                }
                b']' => return Err(PathError::UnbalancedBracket(i)),
                _ => {
                    if !segments.is_empty() && !after_dot {
                        // `a[0]b`: a key must follow a dot.
                        return Err(PathError::EmptySegment(i));
                    }
                    let end = input[i..]
                        .find(|c: char| matches!(c, '.' | '[' | ']'))
                        .map_or(input.len(), |off| i + off);
                    segments.push(Segment::Key(input[i..end].to_string()));
                    after_dot = false;
                    i = end;
                }
            }
        }
        if after_dot {
            return Err(PathError::EmptySegment(input.len()));
        }
        Ok(Self { segments })
    }
}

fn parse_index(raw: &str, at: usize) -> Result<usize> {
    let invalid = || PathError::InvalidIndex { index: raw.to_string(), at };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse().map_err(|_| invalid())
}

impl FromStr for DocPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for DocPath {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                Segment::Key(k) if i == 0 => write!(f, "{k}")?,
                Segment::Key(k) => write!(f, ".{k}")?,
                Segment::Index(n) => write!(f, "[{n}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_path() {
        let p = DocPath::parse("testimonials[2].quote").unwrap();
        assert_eq!(
            p.segments(),
            [Segment::Key("testimonials".into()), Segment::Index(2), Segment::Key("quote".into())]
        );
        assert_eq!(p.to_string(), "testimonials[2].quote");
    }

    #[test]
    fn builder_matches_parser() {
        let built = DocPath::from_key("projects").index(0).key("tools");
        assert_eq!(built, DocPath::parse("projects[0].tools").unwrap());
    }

    #[test]
    fn consecutive_indices() {
        let p = DocPath::parse("grid[1][3]").unwrap();
        assert_eq!(p.segments().len(), 3);
        assert_eq!(p.to_string(), "grid[1][3]");
    }

    #[test]
    fn malformed_paths() {
        assert_eq!(DocPath::parse(""), Err(PathError::Empty));
        assert_eq!(DocPath::parse("a..b"), Err(PathError::EmptySegment(2)));
        assert_eq!(DocPath::parse(".a"), Err(PathError::EmptySegment(0)));
        assert_eq!(DocPath::parse("a."), Err(PathError::EmptySegment(2)));
        assert_eq!(DocPath::parse("a[1"), Err(PathError::UnbalancedBracket(1)));
        assert_eq!(DocPath::parse("a[[1]]"), Err(PathError::UnbalancedBracket(1)));
        assert_eq!(DocPath::parse("a]"), Err(PathError::UnbalancedBracket(1)));
        assert_eq!(DocPath::parse("a[0]b"), Err(PathError::EmptySegment(4)));
        assert_eq!(DocPath::parse("a.[0]"), Err(PathError::EmptySegment(2)));
        assert!(matches!(DocPath::parse("a[x]"), Err(PathError::InvalidIndex { .. })));
        assert!(matches!(DocPath::parse("a[-1]"), Err(PathError::InvalidIndex { .. })));
        assert!(matches!(DocPath::parse("a[]"), Err(PathError::InvalidIndex { .. })));
    }
}
