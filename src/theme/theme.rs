//! The two-valued theme.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A page's visual theme.
///
/// The theme is an explicit enum everywhere inside the crate; the
/// absence-of-attribute encoding for light pages happens only at the
/// [`ThemeSink`](crate::theme::ThemeSink) edge.
///
/// # Example
///
/// ```rust
/// use duotone::Theme;
///
/// assert_eq!(Theme::Light.flipped(), Theme::Dark);
/// assert_eq!(Theme::Dark.as_str(), "dark");
/// assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// The default, unmarked state.
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The stored value and marker vocabulary: `"light"` or `"dark"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The opposite theme.
    pub fn flipped(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// Reads a marker or stored value leniently.
    ///
    /// Only the exact string `"dark"` means dark; anything else, including
    /// an absent value, reads as light. This matches the document marker
    /// contract where an absent attribute is the light state.
    pub fn from_marker(value: Option<&str>) -> Theme {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a theme from user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme '{0}', expected 'light' or 'dark'")]
pub struct ParseThemeError(pub String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flipped_is_involution() {
        assert_eq!(Theme::Light.flipped().flipped(), Theme::Light);
        assert_eq!(Theme::Dark.flipped().flipped(), Theme::Dark);
    }

    #[test]
    fn test_from_marker_only_dark_is_dark() {
        assert_eq!(Theme::from_marker(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_marker(Some("light")), Theme::Light);
        assert_eq!(Theme::from_marker(Some("solarized")), Theme::Light);
        assert_eq!(Theme::from_marker(Some("")), Theme::Light);
        assert_eq!(Theme::from_marker(None), Theme::Light);
    }

    #[test]
    fn test_parse_strict() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("Dark".parse::<Theme>().is_err());
        assert!("".parse::<Theme>().is_err());
    }

    #[test]
    fn test_parse_error_names_the_input() {
        let err = "blue".parse::<Theme>().unwrap_err();
        assert!(err.to_string().contains("blue"));
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let theme: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(theme, Theme::Light);
    }

    #[test]
    fn test_default_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
    }
}
