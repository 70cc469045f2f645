//! Calmare language definition
//!
//! One grammar, parameterised by [`GrammarOptions`]. The editions that
//! shipped with the game-script guides are presets of those options.

use serde::Deserialize;

use crate::error::{HighlightError, Result};
use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::{Rule, RuleSetId};
use crate::syntax::tokens::Category;

/// Canonical language name
pub const NAME: &str = "calmare";

/// Short alias used in `language-clm` code blocks
pub const ALIAS: &str = "clm";

/// Bracketed-category keywords shared by every edition
pub const BASE_VOCABULARY: &[&str] = &[
    "flag", "system", "var", "global", "name", "bgm", "magic", "quest", "shop", "sound",
    "town", "battle", "item", "look_point", "entrance", "object", "trigger", "label", "anim",
    "chip", "vis", "fork", "eff", "eff_instance", "menu", "sepith", "at_roll", "placement",
    "fn", "file", "char", "field_party", "party", "custom",
];

/// Keywords only the guide edition knew about
pub const EXTENDED_VOCABULARY: &[&str] = &["emote", "char_attr"];

/// Bare identifiers highlighted as tags
const IDENTIFIERS: &[&str] = &["self", "null", "random"];

/// How decimal literals are anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberStyle {
    /// Digits need a word boundary (or a leading `-`) before and a word
    /// boundary after, so `abc123` has no number
    #[default]
    Strict,
    /// No boundary anchoring. Deprecated: kept for the guide edition.
    Lax,
}

/// Named grammar presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    /// Strict numbers, full vocabulary, `@label` strings
    #[default]
    Canonical,
    /// Strict numbers, base vocabulary, `@label` strings
    Book,
    /// Lax numbers, full vocabulary, no `@label` strings
    Guide,
}

impl Edition {
    /// Every edition
    pub const ALL: [Edition; 3] = [Edition::Canonical, Edition::Book, Edition::Guide];

    /// Lowercase name, as used in configuration and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Edition::Canonical => "canonical",
            Edition::Book => "book",
            Edition::Guide => "guide",
        }
    }

    /// Parse an edition name
    pub fn from_name(name: &str) -> Result<Self> {
        Edition::ALL
            .into_iter()
            .find(|edition| edition.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| HighlightError::UnknownEdition(name.to_string()))
    }

    /// The options this edition stands for
    pub fn options(&self) -> GrammarOptions {
        match self {
            Edition::Canonical => GrammarOptions {
                vocabulary: words(BASE_VOCABULARY.iter().chain(EXTENDED_VOCABULARY)),
                numbers: NumberStyle::Strict,
                at_labels: true,
            },
            Edition::Book => GrammarOptions {
                vocabulary: words(BASE_VOCABULARY.iter()),
                numbers: NumberStyle::Strict,
                at_labels: true,
            },
            Edition::Guide => GrammarOptions {
                vocabulary: words(BASE_VOCABULARY.iter().chain(EXTENDED_VOCABULARY)),
                numbers: NumberStyle::Lax,
                at_labels: false,
            },
        }
    }
}

fn words<'a>(iter: impl Iterator<Item = &'a &'a str>) -> Vec<String> {
    iter.map(|w| w.to_string()).collect()
}

/// Knobs the Calmare grammar is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarOptions {
    /// Keywords recognised directly before `[`
    pub vocabulary: Vec<String>,
    /// Decimal literal anchoring
    pub numbers: NumberStyle,
    /// Whether `@word` is highlighted as a string
    pub at_labels: bool,
}

impl GrammarOptions {
    /// Add a vocabulary word unless already present
    pub fn add_word(&mut self, word: &str) {
        if !word.is_empty() && !self.vocabulary.iter().any(|w| w == word) {
            self.vocabulary.push(word.to_string());
        }
    }

    /// Remove a vocabulary word
    pub fn remove_word(&mut self, word: &str) {
        self.vocabulary.retain(|w| w != word);
    }
}

impl Default for GrammarOptions {
    fn default() -> Self {
        Edition::Canonical.options()
    }
}

fn alternation<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w.as_ref()))
        .collect::<Vec<_>>()
        .join("|")
}

fn number_pattern(style: NumberStyle) -> &'static str {
    match style {
        NumberStyle::Strict => {
            r"(?:-|(?-u:\b))[0-9]+(?:\.[0-9]*)?(?:(?:mm|ms|deg|mdeg)(?:/s)?)?(?-u:\b)"
        }
        NumberStyle::Lax => r"-?[0-9]+(?:\.[0-9]*)?(?:(?:mm|ms|deg|mdeg)(?:/s)?)?",
    }
}

fn line_comment(body: RuleSetId) -> Result<Rule> {
    Rule::region("line_comment", "//", "\n", Category::Comment, body)
}

/// Create the Calmare language definition
pub fn calmare_language(options: &GrammarOptions) -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new(NAME);
    lang.add_alias(ALIAS);

    let root = lang.root();
    let term = lang.add_rule_set();
    let bracket = lang.add_rule_set();
    let block = lang.add_rule_set();
    let opaque = lang.add_rule_set();

    // Literals shared by every context that allows expressions. Word
    // boundaries and `@label` characters are ASCII only.
    lang.add_rule(term, Rule::token("hex", r"0[xX][0-9A-Fa-f]+", Category::Number)?);
    lang.add_rule(term, Rule::token("number", number_pattern(options.numbers), Category::Number)?);
    if !options.vocabulary.is_empty() {
        let start = format!(r"(?-u:\b)(?:{})\[", alternation(&options.vocabulary));
        lang.add_rule(term, Rule::region("tag", &start, r"\]", Category::Tag, bracket)?);
    }
    let idents = format!(r"(?-u:\b)(?:{})(?-u:\b)", alternation(IDENTIFIERS));
    lang.add_rule(term, Rule::token("ident", &idents, Category::Tag)?);
    lang.add_rule(term, Rule::region("string", "\"", "\"", Category::String, opaque)?);
    if options.at_labels {
        lang.add_rule(term, Rule::token("at_label", r"@[0-9A-Za-z_]+", Category::String)?);
    }

    lang.extend_rule_set(bracket, term);
    lang.add_rule(bracket, line_comment(opaque)?);

    // Inside a text block only nested blocks and directives are recognised
    lang.add_rule(block, Rule::region("nested_block", r"\{", r"\}", Category::Keyword, term)?);
    lang.add_rule(block, Rule::token("directive", r"#[0-9]*[A-QS-Za-z]", Category::Keyword)?);
    lang.add_rule(block, Rule::token("raw_directive", r"#[0-9]*R[^#\n]*#", Category::Keyword)?);

    lang.extend_rule_set(root, term);
    lang.add_rule(root, Rule::region("block", r"\{", r"\}", Category::Function, block)?);
    lang.add_rule(root, line_comment(opaque)?);
    lang.add_rule(root, Rule::token("symbol", r"[-+*/%&^|<>!=~]+", Category::Symbol)?);

    Ok(lang)
}
