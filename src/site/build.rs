//! The site build walk.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::value::Value;
use minijinja::{context, path_loader, Environment};

use crate::html::{DocumentError, HtmlDocument};
use crate::theme::{
    apply_startup_marker, resolve_initial, system_prefers_dark, JsonFileStore, PreferenceStore,
    Theme,
};

use super::config::SiteConfig;
use super::markdown::render_markdown;
use super::page::{Page, PageError};

/// Error from building the site.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to scan content directory {path}: {source}")]
    ContentDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Page(#[from] PageError),
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// What one build pass did.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Pages rendered this pass, in content order.
    pub generated: Vec<PathBuf>,
    /// Pages whose output was already up to date.
    pub skipped: Vec<PathBuf>,
    /// Theme stamped onto generated pages.
    pub theme: Theme,
}

/// Renders markdown content through layout templates into the output tree.
///
/// Each generated page goes through the startup theme decision: the site's
/// persisted preference, falling back to the system signal, decides whether
/// the page root gets a `data-theme="dark"` marker or stays unmarked.
pub struct SiteBuilder {
    config: SiteConfig,
    env: Environment<'static>,
}

impl SiteBuilder {
    pub fn new(config: SiteConfig) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(&config.template_dir));
        Self { config, env }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Builds every content page, skipping up-to-date output unless the
    /// config says `force`.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let sources = collect_sources(&self.config.content_dir)?;

        let store = JsonFileStore::new(&self.config.preference_file);
        let stored = match store.load() {
            Ok(stored) => stored,
            Err(error) => {
                tracing::warn!(error = %error, "preference store unreadable, treating as unset");
                None
            }
        };
        let theme = resolve_initial(stored, system_prefers_dark());

        let mut report = BuildReport {
            theme,
            ..BuildReport::default()
        };

        for source in sources {
            let page = Page::load(&source)?;
            let output = page.output_path(&self.config.content_dir, &self.config.output_dir);

            if !self.config.force && up_to_date(&source, &output) {
                tracing::debug!(output = %output.display(), "output up to date");
                report.skipped.push(output);
                continue;
            }

            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent).map_err(|source| BuildError::OutputDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            let doc = self.render_page(&page, theme)?;
            doc.write_to(&output)?;
            tracing::info!(output = %output.display(), "generated page");
            report.generated.push(output);
        }

        Ok(report)
    }

    /// Renders one page and stamps the startup theme marker.
    fn render_page(&self, page: &Page, theme: Theme) -> Result<HtmlDocument, BuildError> {
        let content = render_markdown(&page.body);
        let template = self.env.get_template(&format!("{}.html", page.layout()))?;

        let date = page.date().map(|d| d.format("%B %d, %Y").to_string());
        let rendered = template.render(context! {
            title => page.title(),
            // Already HTML; exempt from auto-escaping.
            content => Value::from_safe_string(content),
            date => date,
            metadata => &page.matter,
        })?;

        let mut doc = HtmlDocument::parse(rendered)?;
        if !doc.has_toggle_control() {
            tracing::warn!(
                source = %page.source.display(),
                layout = page.layout(),
                "page has no theme-toggle control, in-page toggling will not work"
            );
        }
        apply_startup_marker(&mut doc, theme);
        Ok(doc)
    }
}

/// Collects `.md` sources under the content directory, sorted by path.
fn collect_sources(content_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    fn walk(current: &Path, sources: &mut Vec<PathBuf>) -> std::io::Result<()> {
        for entry in fs::read_dir(current)? {
            let path = entry?.path();
            if path.is_dir() {
                walk(&path, sources)?;
            } else if path.extension().is_some_and(|ext| ext == "md") {
                sources.push(path);
            }
        }
        Ok(())
    }

    let mut sources = Vec::new();
    walk(content_dir, &mut sources).map_err(|source| BuildError::ContentDir {
        path: content_dir.to_path_buf(),
        source,
    })?;
    sources.sort();
    Ok(sources)
}

/// Whether the output is at least as new as its source.
fn up_to_date(source: &Path, output: &Path) -> bool {
    let modified = |path: &Path| fs::metadata(path).and_then(|m| m.modified()).ok();
    match (modified(output), modified(source)) {
        (Some(out), Some(src)) => out >= src,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{set_system_detector, ThemeSink};
    use serial_test::serial;

    const DEFAULT_LAYOUT: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head><title>{{ title }}</title></head>\n<body><button id=\"theme-toggle\">toggle</button>\n<main>{{ content }}</main>\n{% if date %}<time>{{ date }}</time>{% endif %}\n</body></html>\n";

    fn site(dir: &tempfile::TempDir) -> SiteConfig {
        let config = SiteConfig::rooted(dir.path());
        fs::create_dir_all(&config.content_dir).unwrap();
        fs::create_dir_all(&config.template_dir).unwrap();
        fs::write(config.template_dir.join("default.html"), DEFAULT_LAYOUT).unwrap();
        config
    }

    #[test]
    #[serial]
    fn test_build_renders_markdown_through_layout() {
        set_system_detector(|| false);
        let dir = tempfile::tempdir().unwrap();
        let config = site(&dir);
        fs::write(
            config.content_dir.join("index.md"),
            "---\ntitle: Home\ndate: 2024-03-01\n---\n# Welcome\n",
        )
        .unwrap();

        let report = SiteBuilder::new(config.clone()).build().unwrap();
        assert_eq!(report.generated.len(), 1);
        assert_eq!(report.theme, Theme::Light);

        let html = fs::read_to_string(config.output_dir.join("index.html")).unwrap();
        assert!(html.contains("<title>Home</title>"));
        // Markdown came through unescaped.
        assert!(html.contains("<h1>Welcome</h1>"));
        assert!(html.contains("<time>March 01, 2024</time>"));
        // Light build leaves the root unmarked.
        assert!(html.contains("<html lang=\"en\">"));
    }

    #[test]
    #[serial]
    fn test_build_stamps_dark_from_stored_preference() {
        set_system_detector(|| false);
        let dir = tempfile::tempdir().unwrap();
        let config = site(&dir);
        fs::write(&config.preference_file, r#"{"theme": "dark"}"#).unwrap();
        fs::write(config.content_dir.join("index.md"), "# Hi\n").unwrap();

        let report = SiteBuilder::new(config.clone()).build().unwrap();
        assert_eq!(report.theme, Theme::Dark);

        let doc =
            HtmlDocument::from_file(config.output_dir.join("index.html")).unwrap();
        assert_eq!(doc.marker().as_deref(), Some("dark"));
    }

    #[test]
    #[serial]
    fn test_build_system_signal_decides_when_unset() {
        set_system_detector(|| true);
        let dir = tempfile::tempdir().unwrap();
        let config = site(&dir);
        fs::write(config.content_dir.join("index.md"), "# Hi\n").unwrap();

        let report = SiteBuilder::new(config).build().unwrap();
        assert_eq!(report.theme, Theme::Dark);
    }

    #[test]
    #[serial]
    fn test_incremental_build_skips_up_to_date_pages() {
        set_system_detector(|| false);
        let dir = tempfile::tempdir().unwrap();
        let config = site(&dir);
        fs::write(config.content_dir.join("index.md"), "# Hi\n").unwrap();

        let builder = SiteBuilder::new(config.clone());
        let first = builder.build().unwrap();
        assert_eq!(first.generated.len(), 1);

        let second = builder.build().unwrap();
        assert!(second.generated.is_empty());
        assert_eq!(second.skipped.len(), 1);

        // Force rebuilds regardless.
        let forced = SiteBuilder::new(config.with_force(true)).build().unwrap();
        assert_eq!(forced.generated.len(), 1);
    }

    #[test]
    #[serial]
    fn test_missing_layout_is_an_error() {
        set_system_detector(|| false);
        let dir = tempfile::tempdir().unwrap();
        let config = site(&dir);
        fs::write(
            config.content_dir.join("index.md"),
            "---\nlayout: missing\n---\nbody\n",
        )
        .unwrap();

        let result = SiteBuilder::new(config).build();
        assert!(matches!(result, Err(BuildError::Template(_))));
    }

    #[test]
    #[serial]
    fn test_nested_pages_map_to_pretty_urls() {
        set_system_detector(|| false);
        let dir = tempfile::tempdir().unwrap();
        let config = site(&dir);
        fs::create_dir_all(config.content_dir.join("posts")).unwrap();
        fs::write(config.content_dir.join("posts/hello.md"), "# Post\n").unwrap();

        SiteBuilder::new(config.clone()).build().unwrap();
        assert!(config.output_dir.join("posts/hello/index.html").exists());
    }
}
