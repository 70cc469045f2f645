//! Pattern rules for syntax highlighting
//!
//! A rule pairs a start pattern with a category. Token rules classify
//! exactly the start match; region rules keep going until their end
//! pattern and classify the interior with another rule set.

use regex::Regex;

use super::tokens::Category;
use crate::error::Result;

/// Index of a rule set inside a [`LanguageDefinition`](super::LanguageDefinition)
///
/// Regions refer to their child rules by id rather than by ownership, so
/// a set may contain a region whose children are the set itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleSetId(pub(crate) usize);

/// What a rule produces once its start pattern matches
#[derive(Debug, Clone)]
pub enum RuleBody {
    /// The start match is the whole span
    Token,
    /// The span runs to the end match (or end of input) and its interior
    /// is classified with `children`
    Region { end: Regex, children: RuleSetId },
}

/// A single classification rule
#[derive(Debug, Clone)]
pub struct Rule {
    /// Name for debugging
    pub name: String,
    /// Category assigned to the span
    pub category: Category,
    /// Compiled start pattern
    pub start: Regex,
    /// Token or region
    pub body: RuleBody,
}

impl Rule {
    /// Create a token rule
    pub fn token(name: &str, pattern: &str, category: Category) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            category,
            start: Regex::new(pattern)?,
            body: RuleBody::Token,
        })
    }

    /// Create a region rule whose interior is classified by `children`
    pub fn region(
        name: &str,
        start_pattern: &str,
        end_pattern: &str,
        category: Category,
        children: RuleSetId,
    ) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            category,
            start: Regex::new(start_pattern)?,
            body: RuleBody::Region {
                end: Regex::new(end_pattern)?,
                children,
            },
        })
    }

    /// Whether this rule opens a region
    pub fn is_region(&self) -> bool {
        matches!(self.body, RuleBody::Region { .. })
    }

    /// Find the first start match at or after `start`
    ///
    /// Text before `start` still counts as context for `\b`.
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        find_at(&self.start, text, start)
    }
}

/// Leftmost match of `regex` at or after `start`, as byte offsets
pub(crate) fn find_at(regex: &Regex, text: &str, start: usize) -> Option<(usize, usize)> {
    if start >= text.len() {
        return None;
    }
    regex.find_at(text, start).map(|m| (m.start(), m.end()))
}

/// Cached result of searching one pattern ahead of the cursor
///
/// One cache exists per pattern for a whole classification. The cursor
/// only moves forward, so a match found from an earlier cursor is still
/// the leftmost one while it starts at or after the current cursor, and a
/// pattern with no match ahead never matches again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Lookahead {
    #[default]
    Unknown,
    Never,
    At(usize, usize),
}

impl Lookahead {
    /// Next match of `regex` at or after `pos`, reusing the cached one when valid
    ///
    /// Bytes covered by a fresh search are added to `scanned`.
    pub(crate) fn next(
        &mut self,
        regex: &Regex,
        text: &str,
        pos: usize,
        scanned: &mut usize,
    ) -> Option<(usize, usize)> {
        match *self {
            Lookahead::Never => None,
            Lookahead::At(start, end) if start >= pos => Some((start, end)),
            _ => {
                let found = find_at(regex, text, pos);
                *scanned += found.map_or(text.len(), |(_, end)| end).saturating_sub(pos);
                *self = found.map_or(Lookahead::Never, |(start, end)| Lookahead::At(start, end));
                found
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_rule() {
        let rule = Rule::token("number", r"\d+", Category::Number).unwrap();
        assert!(!rule.is_region());
        assert_eq!(rule.find_at("abc 123 def", 0), Some((4, 7)));
        assert_eq!(rule.find_at("abc 123 def", 5), Some((5, 7)));
        assert_eq!(rule.find_at("no numbers", 0), None);
        assert_eq!(rule.find_at("123", 3), None);
    }

    #[test]
    fn test_find_at_keeps_word_boundary_context() {
        let rule = Rule::token("number", r"\b\d+\b", Category::Number).unwrap();
        // Starting mid-word must not pretend the slice start is a boundary
        assert_eq!(rule.find_at("abc123 45", 3), Some((7, 9)));
    }

    #[test]
    fn test_region_rule() {
        let rule = Rule::region("string", "\"", "\"", Category::String, RuleSetId(0)).unwrap();
        assert!(rule.is_region());
        match &rule.body {
            RuleBody::Region { end, children } => {
                assert_eq!(*children, RuleSetId(0));
                assert_eq!(find_at(end, r#""hello""#, 1), Some((6, 7)));
            }
            RuleBody::Token => panic!("expected region"),
        }
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(Rule::token("broken", "(", Category::Symbol).is_err());
    }

    #[test]
    fn test_lookahead_cache() {
        let regex = Regex::new("x").unwrap();
        let text = "ab x x";
        let mut ahead = Lookahead::default();
        let mut scanned = 0;
        assert_eq!(ahead.next(&regex, text, 0, &mut scanned), Some((3, 4)));
        assert_eq!(ahead, Lookahead::At(3, 4));
        assert_eq!(scanned, 4);
        // Still ahead of the cursor, reused without searching
        assert_eq!(ahead.next(&regex, text, 2, &mut scanned), Some((3, 4)));
        assert_eq!(scanned, 4);
        // Cursor moved past it, searched again
        assert_eq!(ahead.next(&regex, text, 4, &mut scanned), Some((5, 6)));
        assert_eq!(ahead.next(&regex, text, 6, &mut scanned), None);
        assert_eq!(ahead, Lookahead::Never);
        assert_eq!(ahead.next(&regex, text, 6, &mut scanned), None);
        assert_eq!(scanned, 6);
    }
}
