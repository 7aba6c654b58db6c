//! Built pages as theme marker surfaces.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::theme::{ThemeSink, THEME_ATTR, TOGGLE_CONTROL_ID};

// Opening root tag, e.g. `<html lang="en">`.
static ROOT_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<html\b[^>]*>").unwrap());

// The marker attribute inside the root tag, with its leading whitespace so
// removal leaves the tag well-formed. Group 1/2 hold the value for either
// quoting style.
static MARKER_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\s+data-theme\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());

static TOGGLE_CONTROL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"(?i)\bid\s*=\s*["']{}["']"#,
        regex::escape(TOGGLE_CONTROL_ID)
    ))
    .unwrap()
});

/// Error from loading or storing a page.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("document has no <html> root element")]
    MissingRoot,
}

/// A built HTML page, exposing the `data-theme` marker on its root element.
///
/// Only the opening `<html>` tag is touched; a `data-theme` attribute
/// anywhere else in the page is someone else's business. The attribute name
/// and the `light`/`dark` vocabulary are the whole contract stylesheets
/// depend on, so they are never rewritten to anything richer.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    html: String,
}

impl HtmlDocument {
    /// Wraps a rendered page.
    ///
    /// # Errors
    ///
    /// Fails when the page has no `<html>` root tag to carry the marker.
    pub fn parse(html: impl Into<String>) -> Result<Self, DocumentError> {
        let html = html.into();
        if !ROOT_TAG.is_match(&html) {
            return Err(DocumentError::MissingRoot);
        }
        Ok(Self { html })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let html = fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(html)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        fs::write(path, &self.html).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Whether the page contains the toggle control element.
    pub fn has_toggle_control(&self) -> bool {
        TOGGLE_CONTROL.is_match(&self.html)
    }

    // Byte range of the opening root tag. Presence is checked at parse
    // time, so a miss here would mean the html was mutated behind our back.
    fn root_range(&self) -> std::ops::Range<usize> {
        let m = ROOT_TAG
            .find(&self.html)
            .expect("root tag checked at parse time");
        m.start()..m.end()
    }
}

impl ThemeSink for HtmlDocument {
    fn marker(&self) -> Option<String> {
        let root = self.root_range();
        let tag = &self.html[root];
        MARKER_ATTR.captures(tag).map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        })
    }

    fn set_marker(&mut self, value: &str) {
        let root = self.root_range();
        let value_range = {
            let tag = &self.html[root.clone()];
            MARKER_ATTR.captures(tag).map(|caps| {
                let group = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .expect("marker regex always captures a value");
                root.start + group.start()..root.start + group.end()
            })
        };
        match value_range {
            Some(range) => self.html.replace_range(range, value),
            None => {
                // Insert right after `<html`, before any other attributes.
                let insert_at = root.start + "<html".len();
                self.html
                    .insert_str(insert_at, &format!(r#" {}="{}""#, THEME_ATTR, value));
            }
        }
    }

    fn clear_marker(&mut self) {
        let root = self.root_range();
        let attr_range = {
            let tag = &self.html[root.clone()];
            MARKER_ATTR
                .find(tag)
                .map(|m| root.start + m.start()..root.start + m.end())
        };
        if let Some(range) = attr_range {
            self.html.replace_range(range, "");
        }
    }
}

/// Collects the built `.html` pages under a directory, sorted by path.
pub fn find_documents(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, DocumentError> {
    fn walk(current: &Path, pages: &mut Vec<PathBuf>) -> std::io::Result<()> {
        for entry in fs::read_dir(current)? {
            let path = entry?.path();
            if path.is_dir() {
                walk(&path, pages)?;
            } else if path.extension().is_some_and(|ext| ext == "html") {
                pages.push(path);
            }
        }
        Ok(())
    }

    let dir = dir.as_ref();
    let mut pages = Vec::new();
    walk(dir, &mut pages).map_err(|source| DocumentError::Read {
        path: dir.to_path_buf(),
        source,
    })?;
    pages.sort();
    Ok(pages)
}
