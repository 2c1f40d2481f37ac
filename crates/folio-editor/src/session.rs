use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use folio_core::content::{load_content, parse_content, to_pretty_json, write_content};
use folio_core::error::Error;
use folio_core::traits::DraftStore;
use folio_core::types::{SiteContent, Testimonial};
use folio_doc::{DocPath, Document, Mutation};

/// Store key of the unpublished draft.
pub const DRAFT_CONTENT_KEY: &str = "portfolio_content_draft";

/// Where the session's current content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Draft,
    Published,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTestimonial {
    pub quote: String,
    pub name: String,
    pub title: String,
    /// Avatar URL; a placeholder is used when missing or empty.
    #[serde(default)]
    pub image: Option<String>,
}

/// Fields to overwrite on an existing testimonial. `None` or an empty string
/// keeps the old value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestimonialPatch {
    pub quote: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub image: Option<String>,
}

/// Editing state for one site.
///
/// Readers take [`snapshot`](Self::snapshot)s; every accepted write installs a
/// new snapshot and autosaves it to the draft store. A write is accepted only
/// if the result still deserializes as [`SiteContent`].
pub struct EditorSession<S> {
    store: S,
    published: PathBuf,
    current: Arc<Document>,
    origin: Origin,
}

impl<S: DraftStore> EditorSession<S> {
    /// Opens the draft if the store has a readable one, otherwise the
    /// published content at `published`.
    pub fn open(store: S, published: impl Into<PathBuf>) -> Result<Self> {
        let published = published.into();
        let (content, origin) = match load_draft(&store)? {
            Some(draft) => (draft, Origin::Draft),
            None => (load_content(&published)?, Origin::Published),
        };
        tracing::info!(?origin, projects = content.projects.len(), "editor session opened");
        Ok(Self { store, published, current: Arc::new(Document::new(content.to_value()?)), origin })
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn published_path(&self) -> &Path {
        &self.published
    }

    pub fn snapshot(&self) -> Arc<Document> {
        Arc::clone(&self.current)
    }

    pub fn content(&self) -> Result<SiteContent> {
        Ok(SiteContent::from_value(self.current.root().clone())?)
    }

    pub fn text_at(&self, path: &str) -> Result<Option<String>> {
        let path = DocPath::parse(path)?;
        Ok(self.current.text_at(&path))
    }

    /// `projects[<index>].<field>` for the project with `id`.
    pub fn project_field_path(&self, id: &str, field: &str) -> Result<DocPath> {
        let content = self.content()?;
        let index = content.project_index(id).ok_or_else(|| Error::NotFound(format!("project '{id}'")))?;
        Ok(DocPath::from_key("projects").index(index).key(field))
    }

    /// Writes editor text at `path`; list-valued slots take comma-separated
    /// text. Returns `false` when the path does not reach an existing slot.
    pub fn edit_text(&mut self, path: &str, text: &str) -> Result<bool> {
        let path = DocPath::parse(path)?;
        let mutation = self.current.edit_text(&path, text);
        self.commit(&path, mutation)
    }

    /// Points a media slot at `url`. Optional media fields that are absent
    /// (a project's `thumbnail` or `video`) are created.
    pub fn set_media(&mut self, path: &str, url: &str) -> Result<bool> {
        let path = DocPath::parse(path)?;
        let mutation = self.current.upsert_field(&path, Value::String(url.to_string()));
        self.commit(&path, mutation)
    }

    pub fn delete_project(&mut self, id: &str) -> Result<bool> {
        self.update(|c| {
            let before = c.projects.len();
            c.projects.retain(|p| p.id != id);
            c.projects.len() != before
        })
    }

    /// Prepends a testimonial and returns its generated id (`t_<unix millis>`).
    pub fn add_testimonial(&mut self, new: NewTestimonial) -> Result<String> {
        let millis = unix_millis();
        self.update(|c| {
            let mut id = format!("t_{millis}");
            let mut n = 1;
            while c.testimonials.iter().any(|t| t.id == id) {
                id = format!("t_{millis}_{n}");
                n += 1;
            }
            let image = new
                .image
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| format!("https://i.pravatar.cc/150?u={millis}"));
            c.testimonials.insert(
                0,
                Testimonial { id: id.clone(), quote: new.quote, name: new.name, title: new.title, image },
            );
            id
        })
    }

    /// Returns whether any field of the testimonial changed.
    pub fn update_testimonial(&mut self, id: &str, patch: TestimonialPatch) -> Result<bool> {
        self.update(|c| {
            let Some(t) = c.testimonials.iter_mut().find(|t| t.id == id) else {
                return false;
            };
            let fields = [
                (&mut t.quote, patch.quote),
                (&mut t.name, patch.name),
                (&mut t.title, patch.title),
                (&mut t.image, patch.image),
            ];
            let mut changed = false;
            for (slot, value) in fields {
                if let Some(value) = value.filter(|v| !v.is_empty() && v.as_str() != slot.as_str()) {
                    *slot = value;
                    changed = true;
                }
            }
            changed
        })
    }

    pub fn delete_testimonial(&mut self, id: &str) -> Result<bool> {
        self.update(|c| {
            let before = c.testimonials.len();
            c.testimonials.retain(|t| t.id != id);
            c.testimonials.len() != before
        })
    }

    /// Reorders testimonials to `order`, which must name every testimonial
    /// exactly once.
    pub fn reorder_testimonials<I: AsRef<str>>(&mut self, order: &[I]) -> Result<()> {
        let mut content = self.content()?;
        if order.len() != content.testimonials.len() {
            return Err(Error::Operation(format!(
                "reorder lists {} ids but there are {} testimonials",
                order.len(),
                content.testimonials.len()
            ))
            .into());
        }
        let mut remaining = std::mem::take(&mut content.testimonials);
        for id in order {
            let id = id.as_ref();
            let pos = remaining
                .iter()
                .position(|t| t.id == id)
                .ok_or_else(|| Error::Operation(format!("testimonial '{id}' missing or listed twice")))?;
            content.testimonials.push(remaining.remove(pos));
        }
        self.install_content(&content)
    }

    /// Writes the current content as pretty JSON to `out`.
    pub fn publish(&self, out: &Path) -> Result<()> {
        let content = self.content()?;
        write_content(out, &content).with_context(|| format!("publishing to {}", out.display()))?;
        tracing::info!(path = %out.display(), "content exported; replace the published content.json with it to go live");
        Ok(())
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(to_pretty_json(&self.content()?)?)
    }

    /// Drops the draft and reloads the published content.
    /// The draft is kept if the published content cannot be loaded.
    pub fn reset(&mut self) -> Result<()> {
        let content = load_content(&self.published)?;
        let document = Document::new(content.to_value()?);
        self.store.remove(DRAFT_CONTENT_KEY)?;
        self.current = Arc::new(document);
        self.origin = Origin::Published;
        tracing::info!(path = %self.published.display(), "draft discarded");
        Ok(())
    }

    fn commit(&mut self, path: &DocPath, mutation: Mutation) -> Result<bool> {
        if !mutation.applied {
            return Ok(false);
        }
        SiteContent::from_value(mutation.document.root().clone())
            .with_context(|| format!("rejected write to '{path}'"))?;
        self.install(mutation.document)?;
        Ok(true)
    }

    fn update<R>(&mut self, f: impl FnOnce(&mut SiteContent) -> R) -> Result<R> {
        let mut content = self.content()?;
        let out = f(&mut content);
        self.install_content(&content)?;
        Ok(out)
    }

    fn install_content(&mut self, content: &SiteContent) -> Result<()> {
        content.validate()?;
        let value = content.to_value()?;
        if value == *self.current.root() {
            return Ok(());
        }
        self.install(Document::new(value))
    }

    fn install(&mut self, document: Document) -> Result<()> {
        let json = serde_json::to_string(document.root())?;
        self.store.save(DRAFT_CONTENT_KEY, &json)?;
        self.current = Arc::new(document);
        self.origin = Origin::Draft;
        tracing::debug!(bytes = json.len(), "draft saved");
        Ok(())
    }
}

fn load_draft<S: DraftStore>(store: &S) -> Result<Option<SiteContent>> {
    let Some(raw) = store.load(DRAFT_CONTENT_KEY)? else {
        return Ok(None);
    };
    match parse_content(&raw) {
        Ok(content) => Ok(Some(content)),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable draft");
            Ok(None)
        }
    }
}

fn unix_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_millis())
}
