//! Theme preference resolution and application.
//!
//! This module provides:
//!
//! - [`Theme`]: the two-valued theme
//! - [`PreferenceStore`]: persistent storage for the user's explicit choice
//! - [`ThemeSink`]: surfaces carrying the theme marker
//! - [`ThemeToggler`]: the startup decision rule plus user toggling
//! - [`system_prefers_dark`]: the OS color-scheme signal
//!
//! The decision logic is pure and runs against injected store and sink
//! implementations, so it is testable without a built site or a real OS
//! preference.

mod sink;
mod store;
mod system;
#[allow(clippy::module_inception)]
mod theme;
mod toggler;

pub use sink::{apply_startup_marker, MemorySink, ThemeSink, THEME_ATTR};
pub use store::{JsonFileStore, MemoryStore, PreferenceStore, StoreError, PREFERENCE_KEY};
pub use system::{set_system_detector, system_prefers_dark};
pub use theme::{ParseThemeError, Theme};
pub use toggler::{resolve_initial, ThemeToggler, TOGGLE_CONTROL_ID};
