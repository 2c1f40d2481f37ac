use serde_json::Value;

use crate::codec::ListCodec;
use crate::error::Result;
use crate::path::{DocPath, Segment};
use crate::resolve::{existing_mut, parent_mut, resolve};

/// An immutable snapshot of the content tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: Value,
}

/// Outcome of a write. `document` is always a fresh snapshot; when `applied`
/// is false it equals the input because the path did not reach an existing slot.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Mutation {
    pub document: Document,
    pub applied: bool,
}

impl Document {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    pub fn get(&self, path: &DocPath) -> Option<&Value> {
        resolve(&self.root, path)?.value()
    }

    /// Text shown in an editor field: strings as-is, string lists through
    /// [`ListCodec`], other values as compact JSON.
    pub fn text_at(&self, path: &DocPath) -> Option<String> {
        let value = self.get(path)?;
        Some(match value {
            Value::String(s) => s.clone(),
            other => ListCodec::encode_value(other).unwrap_or_else(|| other.to_string()),
        })
    }

    /// Replaces the value at `path` in a copy of this document. Exactly one
    /// slot changes. Missing fields, out-of-range indices and absent
    /// intermediates leave the copy untouched.
    pub fn set(&self, path: &DocPath, value: Value) -> Mutation {
        let mut root = self.root.clone();
        let applied = match existing_mut(&mut root, path) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        };
        if !applied {
            tracing::debug!(path = %path, "path does not reach an existing slot; write ignored");
        }
        Mutation { document: Self { root }, applied }
    }

    /// Like [`set`](Self::set), but a missing terminal field is created when
    /// its parent object exists. Intermediates are never created and
    /// sequences are never extended.
    pub fn upsert_field(&self, path: &DocPath, value: Value) -> Mutation {
        let mut root = self.root.clone();
        let applied = match path.split_last() {
            Some((Segment::Key(key), parents)) => match parent_mut(&mut root, parents) {
                Some(Value::Object(map)) => {
                    map.insert(key.clone(), value);
                    true
                }
                Some(Value::Array(items)) => match key.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
                    Some(slot) => {
                        *slot = value;
                        true
                    }
                    None => false,
                },
                _ => false,
            },
            Some((Segment::Index(_), _)) => return self.set(path, value),
            None => false,
        };
        if !applied {
            tracing::debug!(path = %path, "parent of path does not exist; write ignored");
        }
        Mutation { document: Self { root }, applied }
    }

    /// Editor write: when the slot holds a list of strings the text is
    /// decoded with [`ListCodec`], otherwise it is stored as a string.
    pub fn edit_text(&self, path: &DocPath, text: &str) -> Mutation {
        let value = match self.get(path) {
            Some(Value::Array(items)) if items.iter().all(Value::is_string) => ListCodec::decode_value(text),
            _ => Value::String(text.to_string()),
        };
        self.set(path, value)
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}

/// String-path form of [`Document::set`]. Malformed paths are errors;
/// well-formed paths that miss are reported through `Mutation::applied`.
pub fn mutate(doc: &Document, path: &str, value: Value) -> Result<Mutation> {
    let path = DocPath::parse(path)?;
    Ok(doc.set(&path, value))
}

/// String-path form of [`Document::edit_text`].
pub fn edit_text_at(doc: &Document, path: &str, text: &str) -> Result<Mutation> {
    let path = DocPath::parse(path)?;
    Ok(doc.edit_text(&path, text))
}
