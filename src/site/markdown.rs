//! Markdown to HTML conversion.

use pulldown_cmark::{html, Options, Parser};

/// Renders a markdown body to HTML.
///
/// Tables, footnotes, strikethrough and task lists are enabled; everything
/// else is CommonMark.
pub fn render_markdown(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(input, options);
    let mut out = String::with_capacity(input.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
