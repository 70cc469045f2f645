//! Syntax highlighting manager
//!
//! This module provides the SyntaxManager that hosts use to register
//! grammars and select one by name, alias or `language-<tag>` class.

use std::collections::HashMap;

use super::builtin::{self, GrammarOptions};
use super::language::LanguageDefinition;
use super::span::Span;
use crate::error::{HighlightError, Result};

/// Class prefixes documentation generators put on code blocks
const CLASS_PREFIXES: &[&str] = &["language-", "lang-"];

/// Registry of language definitions
#[derive(Debug, Clone)]
pub struct SyntaxManager {
    /// Loaded language definitions, keyed by canonical name
    languages: HashMap<String, LanguageDefinition>,
    /// Alias to canonical name mapping
    alias_map: HashMap<String, String>,
    /// Whether syntax highlighting is enabled
    pub enabled: bool,
}

impl SyntaxManager {
    /// Create a manager with the built-in languages in their canonical edition
    pub fn new() -> Result<Self> {
        Self::with_options(&GrammarOptions::default())
    }

    /// Create a manager with built-in languages built from `options`
    pub fn with_options(options: &GrammarOptions) -> Result<Self> {
        let mut manager = Self::empty();
        for lang in builtin::all_languages(options)? {
            manager.add_language(lang);
        }
        Ok(manager)
    }

    /// Create a manager with no languages
    pub fn empty() -> Self {
        Self {
            languages: HashMap::new(),
            alias_map: HashMap::new(),
            enabled: true,
        }
    }

    /// Add a language definition, replacing any with the same name
    pub fn add_language(&mut self, lang: LanguageDefinition) {
        let name = lang.name.to_lowercase();
        self.alias_map.retain(|_, target| *target != name);
        for alias in &lang.aliases {
            self.alias_map.insert(alias.to_lowercase(), name.clone());
        }
        self.languages.insert(name, lang);
    }

    /// Resolve a name, alias or class (`language-clm`) to a canonical name
    pub fn detect_language(&self, tag: &str) -> Option<&str> {
        let tag = tag.trim().to_lowercase();
        let tag = CLASS_PREFIXES
            .iter()
            .find_map(|prefix| tag.strip_prefix(prefix))
            .unwrap_or(&tag);

        if let Some((name, _)) = self.languages.get_key_value(tag) {
            return Some(name.as_str());
        }
        self.alias_map.get(tag).map(|s| s.as_str())
    }

    /// Get a language definition by name, alias or class
    pub fn get_language(&self, tag: &str) -> Option<&LanguageDefinition> {
        let name = self.detect_language(tag)?;
        self.languages.get(name)
    }

    /// Like [`get_language`](Self::get_language), but an unknown tag is an error
    pub fn require_language(&self, tag: &str) -> Result<&LanguageDefinition> {
        self.get_language(tag)
            .ok_or_else(|| HighlightError::UnknownLanguage(tag.to_string()))
    }

    /// Classify `text` with the grammar selected by `tag`
    ///
    /// Returns `None` if the tag is unknown or highlighting is disabled.
    pub fn highlight(&self, tag: &str, text: &str) -> Option<Vec<Span>> {
        if !self.enabled {
            return None;
        }
        self.get_language(tag).map(|lang| lang.classify(text))
    }

    /// List available languages
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Toggle syntax highlighting on/off
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::builtin::Edition;
    use crate::syntax::tokens::Category;
    use rstest::rstest;

    #[rstest]
    #[case("calmare")]
    #[case("clm")]
    #[case("CLM")]
    #[case("language-clm")]
    #[case("lang-calmare")]
    #[case(" language-clm ")]
    fn test_detect_language(#[case] tag: &str) {
        let manager = SyntaxManager::new().unwrap();
        assert_eq!(manager.detect_language(tag), Some("calmare"));
    }

    #[test]
    fn test_unknown_language() {
        let manager = SyntaxManager::new().unwrap();
        assert_eq!(manager.detect_language("language-rust"), None);
        assert!(manager.highlight("rust", "fn main() {}").is_none());
        assert!(matches!(
            manager.require_language("rust"),
            Err(HighlightError::UnknownLanguage(tag)) if tag == "rust"
        ));
    }

    #[test]
    fn test_highlight() {
        let manager = SyntaxManager::new().unwrap();
        let spans = manager.highlight("clm", "0x10").unwrap();
        assert_eq!(spans, vec![Span::token(Category::Number, 0, 4)]);
    }

    #[test]
    fn test_toggle() {
        let mut manager = SyntaxManager::new().unwrap();
        manager.toggle();
        assert!(manager.highlight("clm", "0x10").is_none());
        manager.toggle();
        assert!(manager.highlight("clm", "0x10").is_some());
    }

    #[test]
    fn test_replace_language() {
        let mut manager = SyntaxManager::new().unwrap();
        let guide = builtin::calmare_language(&Edition::Guide.options()).unwrap();
        manager.add_language(guide);
        assert_eq!(manager.list_languages(), vec!["calmare"]);
        // Guide edition has lax numbers
        let spans = manager.highlight("clm", "abc123").unwrap();
        assert!(spans.iter().any(|s| s.category == Some(Category::Number)));
    }

    #[test]
    fn test_custom_language() {
        let mut manager = SyntaxManager::empty();
        assert!(manager.list_languages().is_empty());

        let mut lang = LanguageDefinition::new("Scena");
        lang.add_alias("scn");
        manager.add_language(lang);
        assert_eq!(manager.detect_language("language-scn"), Some("scena"));
        assert_eq!(manager.highlight("scena", "abc").unwrap(), vec![Span::plain(0, 3)]);
    }

    #[test]
    fn test_classify_in_parallel() {
        let manager = SyntaxManager::new().unwrap();
        let inputs = ["flag[1]", "{ #2A }", "\"str\"", "// c"];
        let shared = &manager;
        let results: Vec<Vec<Span>> = std::thread::scope(|scope| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|text| scope.spawn(move || shared.highlight("clm", text).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for (text, spans) in inputs.iter().zip(&results) {
            assert_eq!(&manager.highlight("clm", text).unwrap(), spans);
        }
    }
}
