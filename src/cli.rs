//! Command-line interface.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use console::style;

use crate::html::{find_documents, HtmlDocument};
use crate::site::{SiteBuilder, SiteConfig};
use crate::theme::{
    apply_startup_marker, resolve_initial, system_prefers_dark, JsonFileStore, PreferenceStore,
    Theme, ThemeSink, ThemeToggler,
};

#[derive(Debug, Parser)]
#[command(
    name = "duotone",
    version,
    about = "Static site builder with a persistent light/dark theme toggle"
)]
pub struct Cli {
    #[command(flatten)]
    paths: PathArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct PathArgs {
    /// Markdown content directory.
    #[arg(long, global = true, default_value = "content")]
    content: PathBuf,

    /// Layout template directory.
    #[arg(long, global = true, default_value = "templates")]
    templates: PathBuf,

    /// Generated site directory.
    #[arg(long, global = true, default_value = "output")]
    output: PathBuf,

    /// Theme preference file.
    #[arg(long, global = true, default_value = ".duotone.json")]
    preferences: PathBuf,
}

impl PathArgs {
    fn into_config(self, force: bool) -> SiteConfig {
        SiteConfig {
            content_dir: self.content,
            template_dir: self.templates,
            output_dir: self.output,
            preference_file: self.preferences,
            force,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the site from content and templates.
    Build {
        /// Rebuild pages even when their output is up to date.
        #[arg(long)]
        force: bool,
    },

    /// Inspect or change the site theme.
    #[command(subcommand)]
    Theme(ThemeCommand),
}

#[derive(Debug, Subcommand)]
enum ThemeCommand {
    /// Re-apply the startup decision to every built page.
    Init,
    /// Flip the applied theme and persist the choice.
    Toggle,
    /// Apply and persist an explicit choice.
    Set { theme: Theme },
    /// Show the persisted, system, and applied theme.
    Show,
}

/// Entry point for the `duotone` binary.
pub fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Build { force } => build(cli.paths.into_config(force)),
        Command::Theme(command) => theme(cli.paths.into_config(false), command),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("duotone=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build(config: SiteConfig) -> Result<()> {
    let report = SiteBuilder::new(config).build()?;

    for path in &report.generated {
        println!("{} {}", style("generated").green().bold(), path.display());
    }
    for path in &report.skipped {
        println!("{} {}", style("up-to-date").dim(), path.display());
    }
    println!(
        "{} generated, {} up to date, theme {}",
        report.generated.len(),
        report.skipped.len(),
        style(report.theme).cyan()
    );
    Ok(())
}

fn theme(config: SiteConfig, command: ThemeCommand) -> Result<()> {
    let store = JsonFileStore::new(&config.preference_file);

    match command {
        ThemeCommand::Show => {
            let stored = store.load()?;
            let system = if system_prefers_dark() {
                Theme::Dark
            } else {
                Theme::Light
            };
            println!(
                "persisted: {}",
                stored.map_or_else(|| "unset".to_string(), |t| t.to_string())
            );
            println!("system:    {}", system);

            match root_document(&config) {
                Some(path) => {
                    let doc = HtmlDocument::from_file(&path)?;
                    let applied = Theme::from_marker(doc.marker().as_deref());
                    println!("applied:   {} ({})", applied, path.display());
                }
                None => println!("applied:   no built pages"),
            }
        }

        ThemeCommand::Init => {
            let pages = built_pages(&config)?;
            let theme = resolve_initial(store.load()?, system_prefers_dark());
            for path in &pages {
                let mut doc = load_page(path)?;
                apply_startup_marker(&mut doc, theme);
                doc.write_to(path)?;
            }
            println!(
                "{} {} across {} page(s)",
                style("initialized").green().bold(),
                theme,
                pages.len()
            );
        }

        ThemeCommand::Toggle => {
            let pages = built_pages(&config)?;
            // The site root is the canonical marker source; the flip it
            // decides is stamped onto every page.
            let canonical = root_document(&config).unwrap_or_else(|| pages[0].clone());

            let mut toggler = ThemeToggler::new(store, load_page(&canonical)?);
            let next = toggler.toggle();
            let (_, doc) = toggler.into_parts();
            doc.write_to(&canonical)?;

            stamp(pages.iter().filter(|p| **p != canonical), next)?;
            println!("{} {}", style("toggled to").green().bold(), next);
        }

        ThemeCommand::Set { theme } => {
            let pages = built_pages(&config)?;
            let mut store = store;
            stamp(pages.iter(), theme)?;
            if let Err(error) = store.save(theme) {
                tracing::warn!(error = %error, "theme preference not persisted");
            }
            println!("{} {}", style("set to").green().bold(), theme);
        }
    }

    Ok(())
}

/// The built pages, erroring when there is nothing to work on.
fn built_pages(config: &SiteConfig) -> Result<Vec<PathBuf>> {
    let pages = if config.output_dir.is_dir() {
        find_documents(&config.output_dir)?
    } else {
        Vec::new()
    };
    if pages.is_empty() {
        bail!(
            "no built pages under {}; run `duotone build` first",
            config.output_dir.display()
        );
    }
    Ok(pages)
}

/// The site root page, when it exists.
fn root_document(config: &SiteConfig) -> Option<PathBuf> {
    let path = config.output_dir.join("index.html");
    path.exists().then_some(path)
}

fn load_page(path: &Path) -> Result<HtmlDocument> {
    HtmlDocument::from_file(path).with_context(|| format!("loading {}", path.display()))
}

/// Writes an explicit marker onto each page.
fn stamp<'a>(pages: impl Iterator<Item = &'a PathBuf>, theme: Theme) -> Result<()> {
    for path in pages {
        let mut doc = load_page(path)?;
        doc.set_marker(theme.as_str());
        doc.write_to(path)?;
    }
    Ok(())
}
