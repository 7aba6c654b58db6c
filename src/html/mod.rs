//! Built-page handling: the document attribute surface.

mod document;

pub use document::{find_documents, DocumentError, HtmlDocument};
