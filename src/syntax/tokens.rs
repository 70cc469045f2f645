//! Token categories for syntax highlighting
//!
//! This module defines the categories a Calmare span can be classified
//! as and their default visual styles. The names double as the
//! highlight.js class suffixes used by the HTML renderer.

use super::style::{Color, Style};

/// Semantic categories assigned to classified spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Hex and decimal literals, with optional unit suffix (`10mm`, `0x1F`)
    Number,
    /// Bracketed-category tokens (`flag[1]`) and bare identifiers (`self`)
    Tag,
    /// Double-quoted strings and `@label` words
    String,
    /// Outer `{...}` text blocks
    Function,
    /// Nested `{...}` blocks and `#` directives inside text blocks
    Keyword,
    /// Operator runs (`+=`, `!=`, `->`)
    Symbol,
    /// Line comments
    Comment,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 7] = [
        Category::Number,
        Category::Tag,
        Category::String,
        Category::Function,
        Category::Keyword,
        Category::Symbol,
        Category::Comment,
    ];

    /// Get the default style for this category
    pub fn default_style(&self) -> Style {
        match self {
            Category::Number => Style::fg(Color::Cyan),
            Category::Tag => Style::fg(Color::Yellow),
            Category::String => Style::fg(Color::Green),
            Category::Function => Style::fg(Color::Blue),
            Category::Keyword => Style::fg(Color::Magenta).with_bold(),
            Category::Symbol => Style::fg(Color::BrightWhite),
            Category::Comment => Style::fg(Color::BrightBlack).with_italic(),
        }
    }

    /// Get the lowercase name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Category::Number => "number",
            Category::Tag => "tag",
            Category::String => "string",
            Category::Function => "function",
            Category::Keyword => "keyword",
            Category::Symbol => "symbol",
            Category::Comment => "comment",
        }
    }

    /// Parse a category from its name (for TOML loading)
    pub fn from_name(name: &str) -> Option<Self> {
        Category::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(name))
    }
}
