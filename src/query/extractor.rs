//! Entity extractor and text normalization.
//!
//! Pulls campus and branch mentions out of accepted query text by sliding
//! token windows over the alias table. There is no grammar here: tolerance
//! for plurals, prepositions and Hinglish phrasing comes from alias-table
//! breadth, and anything unrecognized is simply not an entity.

use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;

use crate::data::aliases::MAX_PHRASE_TOKENS;
use crate::data::{AliasTable, Branch, Campus, Entity};

use super::types::Selector;

/// Hard cap on scanned characters. Input beyond this is dropped before
/// any tokenization, so pathological comments cannot blow up the scan.
pub const MAX_SCAN_CHARS: usize = 4096;

/// Hard cap on scanned tokens.
pub const MAX_TOKENS: usize = 256;

// ============================================================================
// Text Normalization
// ============================================================================

/// Strip platform markdown and control punctuation from raw comment text.
///
/// Keeps `? ! . , -` so the classifier can still see question marks and
/// hyphenated keywords like "cut-off". Bounded by [`MAX_SCAN_CHARS`].
pub fn clean_text(text: &str) -> String {
    let bounded: String = text.chars().take(MAX_SCAN_CHARS).collect();

    let text = CODE_BLOCK_PATTERN.replace_all(&bounded, "$1");
    let text = BOLD_PATTERN.replace_all(&text, "$1");
    let text = ITALIC_PATTERN.replace_all(&text, "$1");
    let text = INLINE_CODE_PATTERN.replace_all(&text, "$1");
    let text = STRIKE_PATTERN.replace_all(&text, "$1");
    let text = SUPERSCRIPT_PATTERN.replace_all(&text, "$1");
    let text = UNDERLINE_PATTERN.replace_all(&text, "$1");

    let text = SPECIAL_CHAR_PATTERN.replace_all(&text, " ");
    let text = WHITESPACE_PATTERN.replace_all(&text, " ");
    text.trim().to_string()
}

/// Collapse cleaned text down to lowercase alphanumeric tokens for alias
/// lookup. "B.Pharm cut-off" becomes "b pharm cut off".
pub fn normalize_for_lookup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true;
    for ch in text.chars().take(MAX_SCAN_CHARS) {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

static CODE_BLOCK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").expect("Invalid regex"));
static BOLD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid regex"));
static ITALIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("Invalid regex"));
static INLINE_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(.*?)`").expect("Invalid regex"));
static STRIKE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~(.*?)~~").expect("Invalid regex"));
static SUPERSCRIPT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\^(.*?)\^").expect("Invalid regex"));
static UNDERLINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(.*?)_").expect("Invalid regex"));
static SPECIAL_CHAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s?!.,-]").expect("Invalid regex"));
static WHITESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

/// Explicit "show everything" markers, English and Hinglish.
static ALL_SCOPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(all|every|complete|full|entire|sab|sabhi|sare|saare)\b")
        .expect("Invalid regex")
});

// ============================================================================
// Entity Extractor
// ============================================================================

/// Extracts campus/branch selectors from accepted query text.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    aliases: Arc<AliasTable>,
}

impl EntityExtractor {
    /// Create an extractor over the given alias table.
    pub fn new(aliases: Arc<AliasTable>) -> Self {
        Self { aliases }
    }

    /// Extract campus and branch selectors from query text.
    ///
    /// Scan order is left to right with the longest alias window winning
    /// at each position; if the text names several campuses (or several
    /// branches), the first one recognized wins. An axis with no match
    /// becomes `All` when the text carries an explicit all-scope marker,
    /// otherwise `Unspecified` — both render as "show everything".
    pub fn extract(&self, text: &str) -> (Selector<Campus>, Selector<Branch>) {
        let normalized = normalize_for_lookup(text);
        let tokens: Vec<&str> = normalized.split_whitespace().take(MAX_TOKENS).collect();

        let mut campus: Option<Campus> = None;
        let mut branch: Option<Branch> = None;

        let mut start = 0;
        while start < tokens.len() {
            let mut advance = 1;
            let widest = MAX_PHRASE_TOKENS.min(tokens.len() - start);
            for width in (1..=widest).rev() {
                let window = tokens[start..start + width].join(" ");
                match self.aliases.get(&window) {
                    Some(Entity::Campus(c)) => {
                        campus.get_or_insert(c);
                        advance = width;
                        break;
                    }
                    Some(Entity::Branch(b)) => {
                        branch.get_or_insert(b);
                        advance = width;
                        break;
                    }
                    None => {}
                }
            }
            if campus.is_some() && branch.is_some() {
                break;
            }
            start += advance;
        }

        let all_scope = ALL_SCOPE_PATTERN.is_match(&normalized);
        let campus = match campus {
            Some(c) => Selector::One(c),
            None if all_scope => Selector::All,
            None => Selector::Unspecified,
        };
        let branch = match branch {
            Some(b) => Selector::One(b),
            None if all_scope => Selector::All,
            None => Selector::Unspecified,
        };
        (campus, branch)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> EntityExtractor {
        EntityExtractor::new(Arc::new(AliasTable::builtin()))
    }

    #[test]
    fn clean_text_strips_markdown() {
        assert_eq!(clean_text("**bold** and *italic*"), "bold and italic");
        assert_eq!(clean_text("`!cutoff` ~~gone~~"), "!cutoff gone");
        assert_eq!(clean_text("weird \u{1f480} emoji?"), "weird emoji?");
    }

    #[test]
    fn normalize_collapses_punctuation() {
        assert_eq!(normalize_for_lookup("B.Pharm cut-off??"), "b pharm cut off");
        assert_eq!(normalize_for_lookup("  CSE,  Goa!  "), "cse goa");
    }

    #[test]
    fn extracts_campus_and_branch() {
        let (campus, branch) = extractor().extract("mechanical in Pilani");
        assert_eq!(campus, Selector::One(Campus::Pilani));
        assert_eq!(branch, Selector::One(Branch::Mechanical));
    }

    #[test]
    fn order_of_mention_does_not_matter() {
        let e = extractor();
        let a = e.extract("pilani mechanical");
        let b = e.extract("mechanical pilani");
        assert_eq!(a, b);
    }

    #[test]
    fn longest_alias_window_wins() {
        let e = extractor();
        // "electronics and communication" must resolve as ECE, not stop
        // at the single-token "electronics" and re-match later tokens.
        let (_, branch) = e.extract("electronics and communication at goa");
        assert_eq!(branch, Selector::One(Branch::Ece));
        let (_, branch) = e.extract("mathematics and computing cutoff");
        assert_eq!(branch, Selector::One(Branch::MathAndComputing));
    }

    #[test]
    fn first_match_wins_on_multiple_entities() {
        let e = extractor();
        let (_, branch) = e.extract("cutoff for CSE and ECE");
        assert_eq!(branch, Selector::One(Branch::Cse));
        let (_, branch) = e.extract("cutoff for ECE and CSE");
        assert_eq!(branch, Selector::One(Branch::Ece));
        let (campus, _) = e.extract("goa or hyderabad mech");
        assert_eq!(campus, Selector::One(Campus::Goa));
    }

    #[test]
    fn no_match_defaults_to_unspecified() {
        let (campus, branch) = extractor().extract("");
        assert_eq!(campus, Selector::Unspecified);
        assert_eq!(branch, Selector::Unspecified);
    }

    #[test]
    fn explicit_all_scope_marker() {
        let (campus, branch) = extractor().extract("complete cutoffs please");
        assert_eq!(campus, Selector::All);
        assert_eq!(branch, Selector::All);
        // A named branch plus an all marker scopes "all" to the campus axis.
        let (campus, branch) = extractor().extract("cse for all campuses");
        assert_eq!(campus, Selector::All);
        assert_eq!(branch, Selector::One(Branch::Cse));
    }

    #[test]
    fn hinglish_aliases_resolve() {
        let e = extractor();
        let (campus, branch) = e.extract("hyd mein mech ka scene kya hai");
        assert_eq!(campus, Selector::One(Campus::Hyderabad));
        assert_eq!(branch, Selector::One(Branch::Mechanical));
    }

    #[test]
    fn adversarial_input_is_bounded() {
        let e = extractor();
        let long = "a ".repeat(100_000);
        let (campus, branch) = e.extract(&long);
        assert_eq!(campus, Selector::Unspecified);
        assert_eq!(branch, Selector::Unspecified);
        let noise = "\u{0} \u{7f} \u{1f480}".repeat(10_000);
        let _ = e.extract(&noise);
    }
}
