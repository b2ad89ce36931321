//! Markdown to HTML for extracted sections.

use pulldown_cmark::{Options, Parser, html::push_html};

/// Render markdown to HTML.
///
/// Tables and strikethrough are enabled. Raw HTML (including `<Chip>` tags)
/// passes through unchanged.
///
/// ```
/// let html = folio_content::markdown::render_html("Built with **Rust**.");
/// assert_eq!(html, "<p>Built with <strong>Rust</strong>.</p>\n");
/// ```
pub fn render_html(markdown: &str) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let parser = Parser::new_ext(markdown, options);

    let mut html = String::with_capacity(markdown.len() * 2);
    push_html(&mut html, parser);
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        assert_eq!(render_html(""), "");
    }

    #[test]
    fn test_render_list() {
        let html = render_html("- one\n- two\n");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<li>two</li>"));
    }

    #[test]
    fn test_render_strikethrough() {
        assert!(render_html("~~old~~").contains("<del>old</del>"));
    }

    #[test]
    fn test_render_table() {
        let html = render_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_raw_html_passes_through() {
        assert!(render_html("<Chip>Rust</Chip>").contains("<Chip>Rust</Chip>"));
    }
}
