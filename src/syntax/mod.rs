//! Syntax classification
//!
//! This module provides the rule engine that turns source text into a
//! tree of classified spans, the built-in Calmare grammar, and the
//! registry hosts use to look grammars up by tag.

mod style;
mod tokens;
mod rules;
mod span;
mod language;
mod manager;
pub mod builtin;

pub use style::{Color, Style, Theme};
pub use tokens::Category;
pub use rules::{Rule, RuleBody, RuleSetId};
pub use span::{dump_tree, flatten, leaf_text, Run, Span};
pub use language::{LanguageDefinition, MAX_NESTING};
pub use manager::SyntaxManager;
