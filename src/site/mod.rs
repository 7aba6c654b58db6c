//! Static site generation: content pages, templates, and the build walk.
//!
//! Content is markdown with optional YAML front matter; layouts are
//! Jinja-style templates resolved from the template directory by the front
//! matter `layout` key. Output uses pretty URLs (every page becomes a
//! directory with an `index.html`).

mod build;
mod config;
mod markdown;
mod page;

pub use build::{BuildError, BuildReport, SiteBuilder};
pub use config::SiteConfig;
pub use markdown::render_markdown;
pub use page::{FrontMatter, Page, PageError};
