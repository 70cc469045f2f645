//! HTML rendering of span trees
//!
//! Produces the same markup highlight.js does for a grammar: nested
//! `<span class="hljs-CATEGORY">` elements around escaped text, so the
//! stock highlight.js stylesheets apply unchanged.

use crate::syntax::Span;

/// Class prefix highlight.js stylesheets expect
pub const CLASS_PREFIX: &str = "hljs-";

/// Render a span tree as HTML
pub fn render(text: &str, spans: &[Span]) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for span in spans {
        render_span(text, span, &mut out);
    }
    out
}

fn render_span(text: &str, span: &Span, out: &mut String) {
    if let Some(category) = span.category {
        out.push_str("<span class=\"");
        out.push_str(CLASS_PREFIX);
        out.push_str(category.name());
        out.push_str("\">");
    }
    if span.children.is_empty() {
        escape_into(span.text(text), out);
    } else {
        for child in &span.children {
            render_span(text, child, out);
        }
    }
    if span.category.is_some() {
        out.push_str("</span>");
    }
}

/// Escape text for use in HTML element content or attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(text, &mut out);
    out
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
}

/// Wrap rendered markup in a `<pre><code>` block tagged for `language`
pub fn code_block(language: &str, inner: &str) -> String {
    format!(
        "<pre><code class=\"hljs language-{}\">{}</code></pre>",
        escape(language),
        inner
    )
}
