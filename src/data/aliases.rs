//! Alias table: normalized free-text phrases mapped to a campus or branch.
//!
//! The table is deliberately broad rather than grammatical: plurals,
//! abbreviations and Hinglish variants are separate rows, and anything
//! it does not know simply fails to match. Unmatched text never produces
//! an entity, which is the conservative behavior the intent policy
//! relies on.

use std::collections::HashMap;

use crate::data::table::{Branch, Campus};

/// A recognized campus or branch mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Campus(Campus),
    Branch(Branch),
}

/// Longest alias phrase length, in tokens. Lookups never probe windows
/// wider than this, which keeps extraction bounded.
pub const MAX_PHRASE_TOKENS: usize = 3;

/// Mapping from normalized phrase to entity. Many-to-one by design.
#[derive(Debug, Clone)]
pub struct AliasTable {
    phrases: HashMap<String, Entity>,
}

const CAMPUS_ALIASES: &[(&str, Campus)] = &[
    ("pilani", Campus::Pilani),
    ("pilani campus", Campus::Pilani),
    ("bits pilani", Campus::Pilani),
    ("goa", Campus::Goa),
    ("goa campus", Campus::Goa),
    ("bits goa", Campus::Goa),
    ("k k birla goa", Campus::Goa),
    ("hyderabad", Campus::Hyderabad),
    ("hyd", Campus::Hyderabad),
    ("hyderabad campus", Campus::Hyderabad),
    ("bits hyderabad", Campus::Hyderabad),
    ("bits hyd", Campus::Hyderabad),
];

const BRANCH_ALIASES: &[(&str, Branch)] = &[
    ("cse", Branch::Cse),
    ("cs", Branch::Cse),
    ("computer", Branch::Cse),
    ("computers", Branch::Cse),
    ("computer science", Branch::Cse),
    ("comp sci", Branch::Cse),
    ("ece", Branch::Ece),
    ("electronics", Branch::Ece),
    ("communication", Branch::Ece),
    ("electronics and communication", Branch::Ece),
    ("eee", Branch::Eee),
    ("electrical", Branch::Eee),
    ("electrical and electronics", Branch::Eee),
    ("mechanical", Branch::Mechanical),
    ("mech", Branch::Mechanical),
    ("mechanical engineering", Branch::Mechanical),
    ("chemical", Branch::Chemical),
    ("chem", Branch::Chemical),
    ("chemical engineering", Branch::Chemical),
    ("civil", Branch::Civil),
    ("civil engineering", Branch::Civil),
    ("manufacturing", Branch::Manufacturing),
    ("manuf", Branch::Manufacturing),
    ("manufacturing engineering", Branch::Manufacturing),
    ("mnc", Branch::MathAndComputing),
    ("math", Branch::MathAndComputing),
    ("maths", Branch::MathAndComputing),
    ("mathematics", Branch::MathAndComputing),
    ("math and computing", Branch::MathAndComputing),
    ("maths and computing", Branch::MathAndComputing),
    ("mathematics and computing", Branch::MathAndComputing),
    ("instrumentation", Branch::Instrumentation),
    ("instru", Branch::Instrumentation),
    ("eni", Branch::Instrumentation),
    ("electronics and instrumentation", Branch::Instrumentation),
    ("biology", Branch::Biology),
    ("bio", Branch::Biology),
    ("biological", Branch::Biology),
    ("biological sciences", Branch::Biology),
    ("chemistry", Branch::Chemistry),
    ("msc chemistry", Branch::Chemistry),
    ("chemistry msc", Branch::Chemistry),
    ("physics", Branch::Physics),
    ("phy", Branch::Physics),
    ("msc physics", Branch::Physics),
    ("economics", Branch::Economics),
    ("eco", Branch::Economics),
    ("msc economics", Branch::Economics),
    ("msc math", Branch::Mathematics),
    ("msc maths", Branch::Mathematics),
    ("msc mathematics", Branch::Mathematics),
    ("pharma", Branch::BPharm),
    ("pharm", Branch::BPharm),
    ("pharmacy", Branch::BPharm),
    ("bpharm", Branch::BPharm),
    ("b pharm", Branch::BPharm),
];

impl AliasTable {
    /// Build the builtin alias table.
    pub fn builtin() -> Self {
        let mut phrases = HashMap::new();
        for &(phrase, campus) in CAMPUS_ALIASES {
            phrases.insert(phrase.to_string(), Entity::Campus(campus));
        }
        for &(phrase, branch) in BRANCH_ALIASES {
            phrases.insert(phrase.to_string(), Entity::Branch(branch));
        }
        Self { phrases }
    }

    /// Look up an already-normalized phrase.
    pub fn get(&self, phrase: &str) -> Option<Entity> {
        self.phrases.get(phrase).copied()
    }

    /// Whether the normalized text contains any recognizable campus or
    /// branch alias. Used by the specificity test before full extraction.
    pub fn mentions_entity(&self, normalized: &str) -> bool {
        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        for start in 0..tokens.len() {
            for width in 1..=MAX_PHRASE_TOKENS.min(tokens.len() - start) {
                let window = tokens[start..start + width].join(" ");
                if self.phrases.contains_key(window.as_str()) {
                    return true;
                }
            }
        }
        false
    }

    /// Add or override a single alias. Used for config-supplied extras.
    pub fn insert(&mut self, phrase: impl Into<String>, entity: Entity) {
        self.phrases.insert(phrase.into(), entity);
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campus_and_branch_aliases_resolve() {
        let aliases = AliasTable::builtin();
        assert_eq!(aliases.get("hyd"), Some(Entity::Campus(Campus::Hyderabad)));
        assert_eq!(aliases.get("cse"), Some(Entity::Branch(Branch::Cse)));
        assert_eq!(
            aliases.get("mathematics and computing"),
            Some(Entity::Branch(Branch::MathAndComputing))
        );
        assert_eq!(aliases.get("nonsense"), None);
    }

    #[test]
    fn mentions_entity_scans_token_windows() {
        let aliases = AliasTable::builtin();
        assert!(aliases.mentions_entity("what about bits goa then"));
        assert!(aliases.mentions_entity("electronics and communication pls"));
        assert!(!aliases.mentions_entity("general exam chatter"));
    }

    #[test]
    fn extra_alias_can_be_inserted() {
        let mut aliases = AliasTable::builtin();
        aliases.insert("pilly", Entity::Campus(Campus::Pilani));
        assert_eq!(aliases.get("pilly"), Some(Entity::Campus(Campus::Pilani)));
    }
}
