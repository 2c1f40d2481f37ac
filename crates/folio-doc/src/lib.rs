//! folio-doc
//!
//! Path-addressed reads and copy-on-write updates over a JSON content tree.
//! Paths are parsed once into [`DocPath`]; writes return a new [`Document`]
//! and never touch the one they were applied to.

pub mod codec;
pub mod error;
pub mod mutate;
pub mod path;
pub mod resolve;

pub use codec::ListCodec;
pub use error::PathError;
pub use mutate::{edit_text_at, mutate, Document, Mutation};
pub use path::{DocPath, Segment};
pub use resolve::{resolve, Slot};
