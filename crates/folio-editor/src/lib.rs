//! folio-editor
//!
//! In-place content editing: an [`EditorSession`] holds the current site
//! document as immutable snapshots, autosaves every accepted write to a
//! [`DraftStore`](folio_core::traits::DraftStore), and publishes by writing a
//! `content.json` for the owner to commit.

pub mod session;
pub mod store;

pub use session::{EditorSession, NewTestimonial, Origin, TestimonialPatch, DRAFT_CONTENT_KEY};
pub use store::{FileDraftStore, MemoryDraftStore};
