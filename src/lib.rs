//! Lexical highlighting for Calmare, the scripting language used in the
//! game-script documentation.
//!
//! The core is [`syntax::LanguageDefinition::classify`], which turns raw
//! source text into a tree of classified [`syntax::Span`]s. Hosts look
//! grammars up through [`syntax::SyntaxManager`] and render the tree with
//! [`html`] or [`terminal`].

pub mod config;
pub mod error;
pub mod html;
pub mod syntax;
pub mod terminal;

pub use config::Config;
pub use error::{HighlightError, Result};
pub use syntax::{Category, LanguageDefinition, Span, SyntaxManager};
