//! Startup resolution and user toggling.

use super::sink::{apply_startup_marker, ThemeSink};
use super::store::PreferenceStore;
use super::system::system_prefers_dark;
use super::theme::Theme;

/// Id of the in-page control the toggle is bound to.
pub const TOGGLE_CONTROL_ID: &str = "theme-toggle";

/// The startup decision rule, in order:
///
/// 1. stored dark wins,
/// 2. no stored value falls back to the system signal,
/// 3. everything else is light.
///
/// An explicit stored light beats a dark system signal: the user's prior
/// choice always wins over the ambient one.
pub fn resolve_initial(stored: Option<Theme>, prefers_dark: bool) -> Theme {
    match stored {
        Some(theme) => theme,
        None if prefers_dark => Theme::Dark,
        None => Theme::Light,
    }
}

/// Resolves and applies the theme for one store/sink pair.
///
/// This is the whole read-decide-apply cycle: [`initialize`] runs once per
/// page load, [`toggle`] once per activation of the toggle control. Both
/// keep the persisted value and the applied marker consistent before they
/// return; persistence failures are logged and the applied state kept, so a
/// broken store degrades to session-only theming rather than an error.
///
/// [`initialize`]: ThemeToggler::initialize
/// [`toggle`]: ThemeToggler::toggle
///
/// # Example
///
/// ```rust
/// use duotone::{MemorySink, MemoryStore, Theme, ThemeToggler};
///
/// let mut toggler = ThemeToggler::new(MemoryStore::new(), MemorySink::new());
/// toggler.initialize();
///
/// let after = toggler.toggle();
/// assert_eq!(after, toggler.toggle().flipped());
/// ```
#[derive(Debug)]
pub struct ThemeToggler<S, D> {
    store: S,
    sink: D,
}

impl<S: PreferenceStore, D: ThemeSink> ThemeToggler<S, D> {
    pub fn new(store: S, sink: D) -> Self {
        Self { store, sink }
    }

    /// Applies the startup decision rule and returns the chosen theme.
    ///
    /// Dark marks the sink; light leaves it in the unmarked default state.
    /// A store read failure counts as "no stored preference".
    pub fn initialize(&mut self) -> Theme {
        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(error) => {
                tracing::warn!(error = %error, "preference store unreadable, treating as unset");
                None
            }
        };
        let theme = resolve_initial(stored, system_prefers_dark());
        apply_startup_marker(&mut self.sink, theme);
        theme
    }

    /// Flips the applied theme and persists the result.
    ///
    /// The new theme is decided from the sink's current marker, not from
    /// the store: a marker of `"dark"` flips to light, anything else flips
    /// to dark. Both the marker write and the persist happen before this
    /// returns.
    pub fn toggle(&mut self) -> Theme {
        let current = self.sink.marker();
        let next = Theme::from_marker(current.as_deref()).flipped();
        self.apply(next)
    }

    /// Applies and persists an explicit choice.
    pub fn set(&mut self, theme: Theme) -> Theme {
        self.apply(theme)
    }

    fn apply(&mut self, theme: Theme) -> Theme {
        self.sink.set_marker(theme.as_str());
        if let Err(error) = self.store.save(theme) {
            tracing::warn!(error = %error, "theme preference not persisted, keeping applied state");
        }
        theme
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Releases the store and sink, in that order.
    pub fn into_parts(self) -> (S, D) {
        (self.store, self.sink)
    }
}
