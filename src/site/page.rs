//! Content pages: front matter, body, and output mapping.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Error from loading a content page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// YAML front matter, `---`-delimited at the top of a page.
///
/// Unknown keys are kept and surfaced to templates under `metadata`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `YYYY-MM-DD`; anything else logs a warning and renders as absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// One markdown source page.
#[derive(Debug, Clone)]
pub struct Page {
    pub source: PathBuf,
    pub matter: FrontMatter,
    /// Markdown body, front matter stripped.
    pub body: String,
}

impl Page {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PageError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| PageError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let (matter, body) = split_front_matter(&text);
        let matter = match matter {
            Some(yaml) => {
                serde_yaml::from_str(yaml).map_err(|source| PageError::FrontMatter {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => FrontMatter::default(),
        };

        Ok(Self {
            source: path.to_path_buf(),
            matter,
            body: body.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        self.matter.title.as_deref().unwrap_or("Untitled")
    }

    pub fn layout(&self) -> &str {
        self.matter.layout.as_deref().unwrap_or("default")
    }

    /// Parsed publication date, if present and well-formed.
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = self.matter.date.as_deref()?;
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                tracing::warn!(page = %self.source.display(), date = raw, "invalid date format");
                None
            }
        }
    }

    /// Maps a source page to its pretty-URL output file.
    ///
    /// `index.md` keeps its directory (`about/index.md` becomes
    /// `about/index.html`); any other page becomes a directory of its own
    /// (`posts/hello.md` becomes `posts/hello/index.html`).
    pub fn output_path(&self, content_dir: &Path, output_dir: &Path) -> PathBuf {
        let rel = self.source.strip_prefix(content_dir).unwrap_or(&self.source);
        let slug = rel.with_extension("");

        if slug.file_name().is_some_and(|name| name == "index") {
            match slug.parent() {
                Some(parent) if parent != Path::new("") => {
                    output_dir.join(parent).join("index.html")
                }
                _ => output_dir.join("index.html"),
            }
        } else {
            output_dir.join(slug).join("index.html")
        }
    }
}

/// Splits `---`-delimited YAML front matter from the body.
///
/// A page without a leading `---` line is all body.
fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    let Some(rest) = text.strip_prefix("---\n").or_else(|| text.strip_prefix("---\r\n")) else {
        return (None, text);
    };

    // CRLF variants first so a \r never ends up glued to the matter.
    for close in ["\r\n---\r\n", "\r\n---\n", "\n---\r\n", "\n---\n"] {
        if let Some(end) = rest.find(close) {
            return (Some(&rest[..end]), &rest[end + close.len()..]);
        }
    }

    // An unclosed fence at end of file: the page is front matter only.
    match rest.strip_suffix("\n---") {
        Some(matter) => (Some(matter), ""),
        None => (None, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_from(dir: &tempfile::TempDir, rel: &str, text: &str) -> Page {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, text).unwrap();
        Page::load(&path).unwrap()
    }

    #[test]
    fn test_load_with_front_matter() {
        let dir = tempfile::tempdir().unwrap();
        let page = page_from(
            &dir,
            "post.md",
            "---\ntitle: Hello\ndate: 2024-03-01\nlayout: post\ntags: [a, b]\n---\n# Body\n",
        );

        assert_eq!(page.title(), "Hello");
        assert_eq!(page.layout(), "post");
        assert_eq!(
            page.date(),
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
        assert!(page.matter.extra.contains_key("tags"));
        assert_eq!(page.body, "# Body\n");
    }

    #[test]
    fn test_load_without_front_matter() {
        let dir = tempfile::tempdir().unwrap();
        let page = page_from(&dir, "plain.md", "just markdown\n");

        assert_eq!(page.title(), "Untitled");
        assert_eq!(page.layout(), "default");
        assert_eq!(page.date(), None);
        assert_eq!(page.body, "just markdown\n");
    }

    #[test]
    fn test_invalid_date_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let page = page_from(&dir, "p.md", "---\ndate: March 1st\n---\nbody\n");
        assert_eq!(page.date(), None);
    }

    #[test]
    fn test_malformed_front_matter_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.md");
        std::fs::write(&path, "---\ntitle: [unclosed\n---\nbody\n").unwrap();

        assert!(matches!(
            Page::load(&path),
            Err(PageError::FrontMatter { .. })
        ));
    }

    #[test]
    fn test_output_path_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content");
        let output = Path::new("out");

        let root_index = page_from(&dir, "content/index.md", "home\n");
        assert_eq!(
            root_index.output_path(&content, output),
            Path::new("out/index.html")
        );

        let section_index = page_from(&dir, "content/about/index.md", "about\n");
        assert_eq!(
            section_index.output_path(&content, output),
            Path::new("out/about/index.html")
        );

        let post = page_from(&dir, "content/posts/hello.md", "hi\n");
        assert_eq!(
            post.output_path(&content, output),
            Path::new("out/posts/hello/index.html")
        );
    }

    #[test]
    fn test_split_front_matter_handles_crlf() {
        let (matter, body) = split_front_matter("---\r\ntitle: X\r\n---\r\nbody");
        assert_eq!(matter, Some("title: X"));
        assert_eq!(body, "body");
    }
}
