/// Read-only view of a searchable item.
///
/// The ranking engine only ever looks at these four fields, so anything that
/// can answer them can be ranked.
pub trait Record {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn category(&self) -> &str;
    fn tools(&self) -> &[String];
}

/// Durable key/value slot for unpublished content.
///
/// Values are whole serialized documents. Implementations must treat a missing
/// key as `Ok(None)`, never as an error.
pub trait DraftStore: Send + Sync {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}
