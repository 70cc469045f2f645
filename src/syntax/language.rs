//! Language definitions for syntax highlighting
//!
//! A `LanguageDefinition` owns an arena of rule sets, one of which is the
//! root, and classifies text into a span tree.

use regex::Regex;

use super::rules::{Lookahead, Rule, RuleBody, RuleSetId};
use super::span::{push_plain, Span};

/// Deepest region nesting the classifier will enter
///
/// Past this depth region rules are skipped, so their text falls through
/// to token rules or plain text.
pub const MAX_NESTING: usize = 64;

/// A complete language definition for syntax highlighting
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    /// Canonical name (e.g. "calmare")
    pub name: String,
    /// Short names a host may select this language by (e.g. "clm")
    pub aliases: Vec<String>,
    /// Rule sets, in priority order within each set
    sets: Vec<Vec<Rule>>,
    /// Rule set applied at the top level
    root: RuleSetId,
}

/// Which candidate won a step of the scan
#[derive(Clone, Copy)]
enum Candidate {
    Rule(usize),
    End,
}

/// State shared by every level of one classification
///
/// The cursor never moves backwards, so each pattern keeps a single
/// lookahead cache for the whole input, however often its set is entered.
struct Scan<'t> {
    text: &'t str,
    /// Start pattern caches, per set and rule
    starts: Vec<Vec<Lookahead>>,
    /// End pattern caches of region rules, per set and rule
    ends: Vec<Vec<Lookahead>>,
    /// Bytes covered by regex searches
    scanned: usize,
}

impl LanguageDefinition {
    /// Create a new language definition with an empty root set
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            sets: vec![Vec::new()],
            root: RuleSetId(0),
        }
    }

    /// Add an alias
    pub fn add_alias(&mut self, alias: &str) {
        self.aliases.push(alias.to_string());
    }

    /// The root rule set
    pub fn root(&self) -> RuleSetId {
        self.root
    }

    /// Allocate a new, empty rule set
    pub fn add_rule_set(&mut self) -> RuleSetId {
        self.sets.push(Vec::new());
        RuleSetId(self.sets.len() - 1)
    }

    /// Append a rule to a set; earlier rules take priority
    ///
    /// # Panics
    ///
    /// Panics if `set` was not allocated by this definition.
    pub fn add_rule(&mut self, set: RuleSetId, rule: Rule) {
        self.sets[set.0].push(rule);
    }

    /// Append copies of every rule of `from` to `to`
    pub fn extend_rule_set(&mut self, to: RuleSetId, from: RuleSetId) {
        let rules = self.sets[from.0].clone();
        self.sets[to.0].extend(rules);
    }

    /// Rules of a set
    pub fn rules(&self, set: RuleSetId) -> &[Rule] {
        self.sets.get(set.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Classify `text` into a span tree
    ///
    /// Total over all input: unmatched text becomes plain spans and an
    /// unterminated region runs to the end of input.
    pub fn classify(&self, text: &str) -> Vec<Span> {
        self.scan(text).0
    }

    /// Classify `text`, also reporting how many bytes the regex searches covered
    pub(crate) fn scan(&self, text: &str) -> (Vec<Span>, usize) {
        let caches = || -> Vec<Vec<Lookahead>> {
            self.sets
                .iter()
                .map(|rules| vec![Lookahead::default(); rules.len()])
                .collect()
        };
        let mut scan = Scan {
            text,
            starts: caches(),
            ends: caches(),
            scanned: 0,
        };
        let mut spans = Vec::new();
        self.classify_in(&mut scan, 0, self.root, None, 0, &mut spans);
        (spans, scan.scanned)
    }

    /// End pattern of the region rule `index` of `set`
    fn end_pattern(&self, set: RuleSetId, index: usize) -> Option<&Regex> {
        match &self.rules(set).get(index)?.body {
            RuleBody::Region { end, .. } => Some(end),
            RuleBody::Token => None,
        }
    }

    /// Classify from `pos` with the rules of `set` until `end` matches
    ///
    /// `end` names the enclosing region rule by its set and index. Returns
    /// the position after the end delimiter, or the input length if the
    /// region is unterminated.
    fn classify_in(
        &self,
        scan: &mut Scan<'_>,
        mut pos: usize,
        set: RuleSetId,
        end: Option<(RuleSetId, usize)>,
        depth: usize,
        out: &mut Vec<Span>,
    ) -> usize {
        let text = scan.text;
        let rules = self.rules(set);
        let end_pattern = end.and_then(|(owner, index)| {
            self.end_pattern(owner, index).map(|regex| (owner, index, regex))
        });
        let mut plain_from = pos;

        while pos < text.len() {
            // Earliest match wins; ties go to the earlier rule, then to the end pattern
            let mut best: Option<(usize, usize, Candidate)> = None;
            for (i, rule) in rules.iter().enumerate() {
                if depth >= MAX_NESTING && rule.is_region() {
                    continue;
                }
                let ahead = &mut scan.starts[set.0][i];
                if let Some((start, stop)) = ahead.next(&rule.start, text, pos, &mut scan.scanned) {
                    if best.map_or(true, |(best_start, _, _)| start < best_start) {
                        best = Some((start, stop, Candidate::Rule(i)));
                    }
                }
            }
            if let Some((owner, index, regex)) = end_pattern {
                let ahead = &mut scan.ends[owner.0][index];
                if let Some((start, stop)) = ahead.next(regex, text, pos, &mut scan.scanned) {
                    if best.map_or(true, |(best_start, _, _)| start < best_start) {
                        best = Some((start, stop, Candidate::End));
                    }
                }
            }

            match best {
                None => break,
                Some((_, stop, Candidate::End)) => {
                    push_plain(out, plain_from, stop);
                    return stop;
                }
                Some((start, stop, Candidate::Rule(_))) if stop == start => {
                    // An empty match would stall the cursor; treat one char as plain
                    pos = start + text[start..].chars().next().map_or(1, char::len_utf8);
                }
                Some((start, stop, Candidate::Rule(i))) => {
                    push_plain(out, plain_from, start);
                    let rule = &rules[i];
                    pos = match &rule.body {
                        RuleBody::Token => {
                            out.push(Span::token(rule.category, start, stop));
                            stop
                        }
                        RuleBody::Region { children, .. } => {
                            let mut inner = vec![Span::plain(start, stop)];
                            let after = self.classify_in(
                                scan,
                                stop,
                                *children,
                                Some((set, i)),
                                depth + 1,
                                &mut inner,
                            );
                            out.push(Span::region(rule.category, start, after, inner));
                            after
                        }
                    };
                    plain_from = pos;
                }
            }
        }

        push_plain(out, plain_from, text.len());
        text.len()
    }
}
