use serde_json::Value;

use crate::path::{DocPath, Segment};

/// The terminal key of a resolved path, typed by its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKey<'p> {
    Field(&'p str),
    Position(usize),
}

/// A container reached by walking every segment but the last, paired with the
/// last segment. The slot itself may be empty (missing field, index past the end).
#[derive(Debug, Clone, Copy)]
pub struct Slot<'a, 'p> {
    pub container: &'a Value,
    pub key: SlotKey<'p>,
}

impl<'a> Slot<'a, '_> {
    pub fn value(&self) -> Option<&'a Value> {
        match (self.container, self.key) {
            (Value::Object(map), SlotKey::Field(k)) => map.get(k),
            (Value::Array(items), SlotKey::Position(i)) => items.get(i),
            _ => None,
        }
    }
}

/// Walks `path` from `root`. `None` when an intermediate segment is absent or
/// lands on a scalar, or the terminal segment does not fit its container.
pub fn resolve<'a, 'p>(root: &'a Value, path: &'p DocPath) -> Option<Slot<'a, 'p>> {
    let (last, parents) = path.split_last()?;
    let mut current = root;
    for seg in parents {
        current = step(current, seg)?;
    }
    let key = slot_key(current, last)?;
    Some(Slot { container: current, key })
}

/// Mutable access to a slot that already holds a value. Never creates fields
/// or extends sequences.
pub(crate) fn existing_mut<'a>(root: &'a mut Value, path: &DocPath) -> Option<&'a mut Value> {
    parent_mut(root, path.segments())
}

/// Mutable access to the container reached by `parents`.
pub(crate) fn parent_mut<'a>(root: &'a mut Value, parents: &[Segment]) -> Option<&'a mut Value> {
    let mut current = root;
    for seg in parents {
        current = step_mut(current, seg)?;
    }
    Some(current)
}

fn slot_key<'p>(container: &Value, seg: &'p Segment) -> Option<SlotKey<'p>> {
    match (container, seg) {
        (Value::Object(_), Segment::Key(k)) => Some(SlotKey::Field(k)),
        (Value::Array(_), Segment::Index(i)) => Some(SlotKey::Position(*i)),
        (Value::Array(_), Segment::Key(k)) => numeric_key(k).map(SlotKey::Position),
        _ => None,
    }
}

fn step<'a>(value: &'a Value, seg: &Segment) -> Option<&'a Value> {
    match (value, seg) {
        (Value::Object(map), Segment::Key(k)) => map.get(k),
        (Value::Array(items), Segment::Index(i)) => items.get(*i),
        (Value::Array(items), Segment::Key(k)) => items.get(numeric_key(k)?),
        _ => None,
    }
}

fn step_mut<'a>(value: &'a mut Value, seg: &Segment) -> Option<&'a mut Value> {
    match (value, seg) {
        (Value::Object(map), Segment::Key(k)) => map.get_mut(k),
        (Value::Array(items), Segment::Index(i)) => items.get_mut(*i),
        (Value::Array(items), Segment::Key(k)) => items.get_mut(numeric_key(k)?),
        _ => None,
    }
}

fn numeric_key(key: &str) -> Option<usize> {
    if key.bytes().all(|b| b.is_ascii_digit()) { key.parse().ok() } else { None }
}
