//! Intent classifier.
//!
//! Decides whether an incoming comment is in scope: a `!cutoff` command,
//! a specific natural-language cutoff question, or noise to ignore. The
//! natural-language path is deliberately conjunctive — a cutoff keyword,
//! a question marker, and a recognizable campus/branch alias must all be
//! present — so generic chatter never triggers a reply.

use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;

use crate::data::AliasTable;

use super::extractor::{clean_text, normalize_for_lookup};
use super::types::{Classification, IncomingItem};

/// The command keyword accepted after the `!` sentinel.
pub const COMMAND_KEYWORD: &str = "cutoff";

/// Classifies incoming items against the cutoff-query policy.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    aliases: Arc<AliasTable>,
}

impl IntentClassifier {
    /// Create a classifier over the given alias table.
    pub fn new(aliases: Arc<AliasTable>) -> Self {
        Self { aliases }
    }

    /// Classify one incoming item. Pure and deterministic: the same item
    /// always yields the same classification.
    pub fn classify(&self, item: &IncomingItem) -> Classification {
        // Bot authors are rejected before any text analysis. This is the
        // guard against bot-to-bot reply loops.
        if item.is_bot {
            return Classification::Ignore;
        }

        let cleaned = clean_text(&item.text);
        let trimmed = cleaned.trim();
        if trimmed.is_empty() {
            return Classification::Ignore;
        }

        if let Some(rest) = trimmed.strip_prefix('!') {
            return self.classify_command(rest);
        }

        self.classify_natural(trimmed)
    }

    /// Parse the text after the `!` sentinel. Anything other than the
    /// `cutoff` keyword is a silent no-op.
    fn classify_command(&self, rest: &str) -> Classification {
        let rest = rest.trim_start();
        let mut tokens = rest.split_whitespace();
        let keyword = match tokens.next() {
            Some(k) => k,
            None => return Classification::Ignore,
        };
        if !keyword.eq_ignore_ascii_case(COMMAND_KEYWORD)
            && !keyword.eq_ignore_ascii_case("cutoffs")
        {
            return Classification::Ignore;
        }

        // Drop leading connector words so "!cutoff for CSE in Goa" hands
        // "CSE in Goa" to the extractor ("in"/"at" stay meaningful between
        // entities, only the leading connector is syntax).
        let mut remaining: Vec<&str> = tokens.collect();
        while remaining
            .first()
            .is_some_and(|t| matches!(t.to_ascii_lowercase().as_str(), "for" | "in" | "at" | "of"))
        {
            remaining.remove(0);
        }
        Classification::Command(remaining.join(" "))
    }

    /// The conjunctive specificity test for free text.
    fn classify_natural(&self, cleaned: &str) -> Classification {
        let lower = cleaned.to_lowercase();

        let has_intent_keyword = INTENT_KEYWORD_PATTERN.is_match(&lower);
        let has_question_marker = lower.contains('?') || QUESTION_PATTERN.is_match(&lower);
        let has_entity = self.aliases.mentions_entity(&normalize_for_lookup(&lower));

        if has_intent_keyword && has_question_marker && has_entity {
            Classification::NaturalLanguage(lower)
        } else {
            Classification::Ignore
        }
    }
}

// ============================================================================
// Predicate Patterns
// ============================================================================

/// Cutoff-intent keywords: the fragment must be about qualifying scores.
static INTENT_KEYWORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        cut-?offs? |
        marks\s+(needed|required|chahiye) |
        (required|needed|minimum|qualifying)\s+(marks?|scores?) |
        how\s+(many|much)\s+marks? |
        (score|marks?)\s+(needed|required)\s+for |
        admission\s+(score|marks?) |
        kitne\s+marks?
        ",
    )
    .expect("Invalid regex")
});

/// Question markers: interrogative words (English and Hinglish) and
/// imperative asking patterns.
static QUESTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \b(
            what | which | how | when |
            tell | show | give | share | know |
            need | want | looking | find |
            kya | kitna | kitne | batao | bata | chahiye
        )\b
        ",
    )
    .expect("Invalid regex")
});

// ============================================================================
// Tests
// ============================================================================
