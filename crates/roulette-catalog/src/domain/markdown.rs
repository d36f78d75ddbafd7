//! Markdown rendering for joker challenge text.

use pulldown_cmark::{Event, Parser, html};

/// Renders a joker template (or its substituted text) to an HTML fragment.
///
/// Templates are single paragraphs using `**bold**` titles, so the output is
/// usually one `<p>` element. Raw HTML is emitted as escaped text, since
/// participant names end up in the source.
#[must_use]
pub fn render_html(markdown: &str) -> String {
    let parser = Parser::new(markdown).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::with_capacity(markdown.len() + 16);
    html::push_html(&mut out, parser);
    out
}

/// Backslash-escapes the Markdown punctuation in `text` so that it renders
/// literally when spliced into a template.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
