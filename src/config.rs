//! Configuration file support
//!
//! Loads settings from ~/.clm-highlight.toml (or %USERPROFILE%\.clm-highlight.toml
//! on Windows). Every key is optional.
//!
//! Example:
//! ```text
//! # clm-highlight configuration
//! edition = "canonical"        # canonical | book | guide
//! numbers = "strict"           # overrides the edition: strict | lax
//! at-labels = true             # overrides the edition
//! extra-vocabulary = ["sound_group"]
//! removed-vocabulary = ["custom"]
//! tab-width = 4
//!
//! [theme.comment]
//! fg = "bright-black"
//! italic = true
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{HighlightError, Result};
use crate::syntax::builtin::{Edition, GrammarOptions, NumberStyle};
use crate::syntax::{Category, Color, Theme};

/// File name looked up in the home directory
const CONFIG_FILE: &str = ".clm-highlight.toml";

/// Style override for one category
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub fg: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
}

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Grammar preset
    pub edition: Edition,
    /// Decimal literal anchoring, if different from the edition's
    pub numbers: Option<NumberStyle>,
    /// Whether `@word` labels are strings, if different from the edition's
    pub at_labels: Option<bool>,
    /// Words added to the bracketed-category vocabulary
    pub extra_vocabulary: Vec<String>,
    /// Words removed from the bracketed-category vocabulary
    pub removed_vocabulary: Vec<String>,
    /// Tab width for terminal output
    pub tab_width: usize,
    /// Per-category style overrides, keyed by category name
    pub theme: BTreeMap<String, StyleConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            edition: Edition::default(),
            numbers: None,
            at_labels: None,
            extra_vocabulary: Vec::new(),
            removed_vocabulary: Vec::new(),
            tab_width: 8,
            theme: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }
    }

    /// Load the default config file, or defaults if there is none
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.tab_width = config.tab_width.clamp(1, 16); // Between 1 and 16
        Ok(config)
    }

    /// Grammar options: the edition's preset with overrides applied
    pub fn grammar_options(&self) -> GrammarOptions {
        let mut options = self.edition.options();
        if let Some(numbers) = self.numbers {
            options.numbers = numbers;
        }
        if let Some(at_labels) = self.at_labels {
            options.at_labels = at_labels;
        }
        for word in &self.extra_vocabulary {
            options.add_word(word.trim());
        }
        for word in &self.removed_vocabulary {
            options.remove_word(word.trim());
        }
        options
    }

    /// Terminal theme: category defaults with overrides applied
    pub fn theme(&self) -> Result<Theme> {
        let mut theme = Theme::default();
        for (name, overrides) in &self.theme {
            let category = Category::from_name(name).ok_or_else(|| {
                HighlightError::Message(format!("Unknown category in theme: {}", name))
            })?;
            let mut style = theme.style(Some(category));
            if let Some(fg) = &overrides.fg {
                let color = Color::from_name(fg)
                    .ok_or_else(|| HighlightError::Message(format!("Unknown color: {}", fg)))?;
                style = style.with_fg(color);
            }
            if let Some(bold) = overrides.bold {
                style.bold = bold;
            }
            if let Some(italic) = overrides.italic {
                style.italic = italic;
            }
            if let Some(underline) = overrides.underline {
                style.underline = underline;
            }
            theme.set(category, style);
        }
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
edition = "guide"
numbers = "strict"
extra-vocabulary = ["sound_group"]
removed-vocabulary = ["emote"]
tab-width = 4

[theme.number]
fg = "red"
bold = true
        "#;

        let config = Config::parse(contents).unwrap();
        assert_eq!(config.edition, Edition::Guide);
        assert_eq!(config.numbers, Some(NumberStyle::Strict));
        assert_eq!(config.at_labels, None);
        assert_eq!(config.tab_width, 4);
        assert_eq!(config.theme["number"].fg.as_deref(), Some("red"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.grammar_options(), GrammarOptions::default());
        assert_eq!(config.theme().unwrap(), Theme::default());
    }

    #[test]
    fn test_grammar_options_overrides() {
        let config = Config::parse(
            r#"
edition = "guide"
numbers = "strict"
at-labels = true
extra-vocabulary = ["sound_group", "flag"]
removed-vocabulary = ["emote"]
            "#,
        )
        .unwrap();

        let options = config.grammar_options();
        assert_eq!(options.numbers, NumberStyle::Strict);
        assert!(options.at_labels);
        assert!(options.vocabulary.iter().any(|w| w == "sound_group"));
        assert!(options.vocabulary.iter().any(|w| w == "char_attr"));
        assert!(!options.vocabulary.iter().any(|w| w == "emote"));
        assert_eq!(options.vocabulary.iter().filter(|w| *w == "flag").count(), 1);
    }

    #[test]
    fn test_theme_overrides() {
        let config = Config::parse("[theme.comment]\nfg = \"green\"\nitalic = false\n").unwrap();
        let theme = config.theme().unwrap();
        let style = theme.style(Some(Category::Comment));
        assert_eq!(style.fg, Color::Green);
        assert!(!style.italic);
        assert_eq!(theme.style(Some(Category::Number)), Category::Number.default_style());
    }

    #[test]
    fn test_theme_errors() {
        let config = Config::parse("[theme.banana]\nfg = \"green\"\n").unwrap();
        assert!(matches!(config.theme(), Err(HighlightError::Message(_))));

        let config = Config::parse("[theme.number]\nfg = \"plaid\"\n").unwrap();
        assert!(matches!(config.theme(), Err(HighlightError::Message(_))));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(Config::parse("edition = \"deluxe\""), Err(HighlightError::Config(_))));
        assert!(matches!(Config::parse("tab-width = \"wide\""), Err(HighlightError::Config(_))));
        assert!(matches!(Config::parse("colour = true"), Err(HighlightError::Config(_))));
    }

    #[test]
    fn test_tab_width_clamped() {
        assert_eq!(Config::parse("tab-width = 0").unwrap().tab_width, 1);
        assert_eq!(Config::parse("tab-width = 99").unwrap().tab_width, 16);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "edition = \"book\"").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.edition, Edition::Book);

        let missing = file.path().with_extension("missing");
        assert!(matches!(Config::load_from(&missing), Err(HighlightError::Io(_))));
    }
}
