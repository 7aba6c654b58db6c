//! Surfaces that carry the theme marker.

use super::theme::Theme;

/// Name of the document marker attribute stylesheets key off.
pub const THEME_ATTR: &str = "data-theme";

/// A surface holding the theme marker.
///
/// The marker contract is asymmetric by design: a freshly loaded document
/// carries no marker at all, and that absence *is* the light state. Dark is
/// always an explicit marker; light becomes explicit only after a toggle.
pub trait ThemeSink {
    /// Current marker value, if any. Absent means light.
    fn marker(&self) -> Option<String>;

    /// Writes an explicit marker value.
    fn set_marker(&mut self, value: &str);

    /// Removes the marker, restoring the unmarked default.
    fn clear_marker(&mut self);
}

/// Marks the sink the way a fresh page load does.
///
/// Dark sets the marker; light clears it, so re-initialising a previously
/// stamped document lands in the same state a fresh load would.
pub fn apply_startup_marker<S: ThemeSink + ?Sized>(sink: &mut S, theme: Theme) {
    if theme.is_dark() {
        sink.set_marker(Theme::Dark.as_str());
    } else {
        sink.clear_marker();
    }
}

/// In-memory sink, for tests and doc examples.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    value: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose marker is already set, as if a page had been stamped.
    pub fn with_marker(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
        }
    }

    /// The semantic theme of the current marker, absent reading as light.
    pub fn theme(&self) -> Theme {
        Theme::from_marker(self.value.as_deref())
    }
}

impl ThemeSink for MemorySink {
    fn marker(&self) -> Option<String> {
        self.value.clone()
    }

    fn set_marker(&mut self, value: &str) {
        self.value = Some(value.to_string());
    }

    fn clear_marker(&mut self) {
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_marker_dark_sets() {
        let mut sink = MemorySink::new();
        apply_startup_marker(&mut sink, Theme::Dark);
        assert_eq!(sink.marker().as_deref(), Some("dark"));
    }

    #[test]
    fn test_startup_marker_light_leaves_fresh_sink_unmarked() {
        let mut sink = MemorySink::new();
        apply_startup_marker(&mut sink, Theme::Light);
        assert_eq!(sink.marker(), None);
    }

    #[test]
    fn test_startup_marker_light_clears_stale_marker() {
        let mut sink = MemorySink::with_marker("dark");
        apply_startup_marker(&mut sink, Theme::Light);
        assert_eq!(sink.marker(), None);
        assert_eq!(sink.theme(), Theme::Light);
    }
}
