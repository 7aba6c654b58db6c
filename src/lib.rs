//! Duotone builds small static sites whose pages carry a persistent
//! light/dark theme.
//!
//! Two halves:
//!
//! - [`site`]: markdown content + YAML front matter rendered through
//!   Jinja-style layouts into an output tree.
//! - [`theme`]: the theme cycle — resolve the active theme at startup from
//!   the persisted preference or the OS color-scheme signal, mark each
//!   page's root element, and flip-and-persist on every toggle.
//!
//! The theme logic is written against two small traits,
//! [`PreferenceStore`] and [`ThemeSink`], so the decision rule is pure and
//! testable without a built site. [`HtmlDocument`] is the production sink:
//! it reads and writes the `data-theme` attribute on a built page's
//! `<html>` element, the only contract stylesheets depend on.
//!
//! # Example
//!
//! ```rust
//! use duotone::{MemorySink, MemoryStore, PreferenceStore, Theme, ThemeToggler};
//!
//! // No stored preference, so the system signal decides at startup.
//! duotone::set_system_detector(|| false);
//! let mut toggler = ThemeToggler::new(MemoryStore::new(), MemorySink::new());
//! assert_eq!(toggler.initialize(), Theme::Light);
//!
//! // A toggle flips, applies, and persists in one step.
//! assert_eq!(toggler.toggle(), Theme::Dark);
//! assert_eq!(toggler.store().load().unwrap(), Some(Theme::Dark));
//! ```

pub mod cli;
pub mod html;
pub mod site;
pub mod theme;

pub use html::{find_documents, DocumentError, HtmlDocument};
pub use site::{BuildError, BuildReport, Page, SiteBuilder, SiteConfig};
pub use theme::{
    apply_startup_marker, resolve_initial, set_system_detector, system_prefers_dark,
    JsonFileStore, MemorySink, MemoryStore, ParseThemeError, PreferenceStore, StoreError, Theme,
    ThemeSink, ThemeToggler, PREFERENCE_KEY, THEME_ATTR, TOGGLE_CONTROL_ID,
};
