//! Classified spans
//!
//! The classifier produces a tree: leaves are tokens or plain text, and
//! region spans hold children that tile their whole range, delimiters
//! included.

use std::fmt::Write as _;

use super::tokens::Category;

/// A classified range of source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Category, or `None` for plain text
    pub category: Option<Category>,
    /// Nested spans; empty for leaves
    pub children: Vec<Span>,
}

impl Span {
    /// Create an unclassified leaf
    pub fn plain(start: usize, end: usize) -> Self {
        Self { start, end, category: None, children: Vec::new() }
    }

    /// Create a classified leaf
    pub fn token(category: Category, start: usize, end: usize) -> Self {
        Self { start, end, category: Some(category), children: Vec::new() }
    }

    /// Create a region span around `children`
    pub fn region(category: Category, start: usize, end: usize, children: Vec<Span>) -> Self {
        Self { start, end, category: Some(category), children }
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Whether this span has nested spans
    pub fn is_region(&self) -> bool {
        !self.children.is_empty()
    }

    /// The source text this span covers
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Visit the leaves of this span in order
    pub fn leaves(&self) -> Vec<&Span> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }
}

fn collect_leaves<'a>(span: &'a Span, out: &mut Vec<&'a Span>) {
    if span.children.is_empty() {
        out.push(span);
    } else {
        for child in &span.children {
            collect_leaves(child, out);
        }
    }
}

/// Append plain text, merging with a directly preceding plain leaf
pub(crate) fn push_plain(out: &mut Vec<Span>, start: usize, end: usize) {
    if start >= end {
        return;
    }
    if let Some(last) = out.last_mut() {
        if last.category.is_none() && last.children.is_empty() && last.end == start {
            last.end = end;
            return;
        }
    }
    out.push(Span::plain(start, end));
}

/// A flattened leaf with the innermost category that encloses it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub end: usize,
    pub category: Option<Category>,
}

/// Flatten a span tree into styled runs
///
/// Plain delimiters inside a region inherit the region's category.
pub fn flatten(spans: &[Span]) -> Vec<Run> {
    let mut runs = Vec::new();
    for span in spans {
        flatten_into(span, None, &mut runs);
    }
    runs
}

fn flatten_into(span: &Span, inherited: Option<Category>, runs: &mut Vec<Run>) {
    let category = span.category.or(inherited);
    if span.children.is_empty() {
        if let Some(last) = runs.last_mut() {
            if last.category == category && last.end == span.start {
                last.end = span.end;
                return;
            }
        }
        runs.push(Run { start: span.start, end: span.end, category });
    } else {
        for child in &span.children {
            flatten_into(child, category, runs);
        }
    }
}

/// Concatenate the text of every leaf
pub fn leaf_text(source: &str, spans: &[Span]) -> String {
    spans
        .iter()
        .flat_map(|s| s.leaves())
        .map(|leaf| leaf.text(source))
        .collect()
}

/// Indented listing of a span tree, one span per line
pub fn dump_tree(source: &str, spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        dump_into(source, span, 0, &mut out);
    }
    out
}

fn dump_into(source: &str, span: &Span, depth: usize, out: &mut String) {
    let label = span.category.map_or("plain", |c| c.name());
    let _ = writeln!(
        out,
        "{:indent$}{} {}..{} {:?}",
        "",
        label,
        span.start,
        span.end,
        span.text(source),
        indent = depth * 2
    );
    for child in &span.children {
        dump_into(source, child, depth + 1, out);
    }
}
