//! Build configuration.

use std::path::PathBuf;

/// Directory layout and build switches for one site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Markdown sources.
    pub content_dir: PathBuf,
    /// Layout templates, one `<layout>.html` per front matter `layout`.
    pub template_dir: PathBuf,
    /// Generated pages.
    pub output_dir: PathBuf,
    /// Theme preference file.
    pub preference_file: PathBuf,
    /// Rebuild pages whose output is already up to date.
    pub force: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            template_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from("output"),
            preference_file: PathBuf::from(".duotone.json"),
            force: false,
        }
    }
}

impl SiteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rooted layout: the four standard paths under one directory.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            content_dir: root.join("content"),
            template_dir: root.join("templates"),
            output_dir: root.join("output"),
            preference_file: root.join(".duotone.json"),
            force: false,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}
