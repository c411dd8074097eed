//! Markdown Rendering
//!
//! Event and college descriptions are authored as markdown; this
//! renders them to HTML for `inner_html`. Tables and strikethrough are
//! enabled, raw HTML in the source is passed through pulldown-cmark's
//! default escaping.

use pulldown_cmark::{html::push_html, Options, Parser};

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options
}

pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, options());
    let mut html_output = String::new();
    push_html(&mut html_output, parser);
    html_output
}

/// Inline variant for card snippets (strips the outer <p> tags)
pub fn parse_markdown_inline(text: &str) -> String {
    let html = parse_markdown(text);

    html.trim()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .map(|s| s.to_string())
        .unwrap_or(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = parse_markdown("**Seminar** on _career paths_");
        assert!(html.contains("<strong>Seminar</strong>"));
        assert!(html.contains("<em>career paths</em>"));
    }

    #[test]
    fn test_inline_strips_paragraph() {
        assert_eq!(parse_markdown_inline("plain text"), "plain text");
    }
}
