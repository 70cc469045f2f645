//! Built-in language definitions

mod calmare;

pub use calmare::{
    calmare_language, Edition, GrammarOptions, NumberStyle, ALIAS, BASE_VOCABULARY,
    EXTENDED_VOCABULARY, NAME,
};

use super::language::LanguageDefinition;
use crate::error::Result;

/// Get all built-in language definitions
pub fn all_languages(options: &GrammarOptions) -> Result<Vec<LanguageDefinition>> {
    Ok(vec![calmare_language(options)?])
}
