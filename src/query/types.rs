//! Types for the query classification pipeline.

use serde::{Deserialize, Serialize};

// ============================================================================
// Incoming Item
// ============================================================================

/// A comment handed to the core by the streaming collaborator.
///
/// `is_bot` is resolved upstream (author allow/deny check against known
/// bot accounts); `id` is only used by the runner for duplicate-reply
/// suppression and is never read by the core pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingItem {
    #[serde(default)]
    pub id: String,
    pub author: String,
    #[serde(default)]
    pub is_bot: bool,
    pub text: String,
}

impl IncomingItem {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            author: author.into(),
            is_bot: false,
            text: text.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn from_bot(mut self) -> Self {
        self.is_bot = true;
        self
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Result of intent classification for one incoming item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Out of scope: bot author, generic chatter, or malformed command.
    /// No reply is ever produced.
    Ignore,
    /// A `!cutoff` command; carries the argument text after the keyword.
    Command(String),
    /// A natural-language question that passed the specificity test;
    /// carries the cleaned text.
    NaturalLanguage(String),
}

/// Whether a query arrived as a command or as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    Command,
    NaturalLanguage,
}

// ============================================================================
// Selector
// ============================================================================

/// A filter on one axis of the cutoff table.
///
/// `All` (an explicit "show everything" request) and `Unspecified` (nothing
/// recognized on this axis) are distinct in provenance but identical in
/// effect: both admit every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector<T> {
    One(T),
    All,
    Unspecified,
}

impl<T: PartialEq> Selector<T> {
    /// Whether this selector admits the given value.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::One(wanted) => wanted == value,
            Self::All | Self::Unspecified => true,
        }
    }

    /// Whether the selector narrows the axis to a single value.
    pub fn is_constrained(&self) -> bool {
        matches!(self, Self::One(_))
    }

    /// The single selected value, if constrained.
    pub fn as_one(&self) -> Option<&T> {
        match self {
            Self::One(value) => Some(value),
            _ => None,
        }
    }
}

// ============================================================================
// Parsed Query
// ============================================================================

/// The structured form of an accepted query. Derived per item, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub campus: Selector<crate::data::Campus>,
    pub branch: Selector<crate::data::Branch>,
    pub mode: QueryMode,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Campus;

    #[test]
    fn selector_admission() {
        let one = Selector::One(Campus::Goa);
        assert!(one.admits(&Campus::Goa));
        assert!(!one.admits(&Campus::Pilani));
        assert!(Selector::All.admits(&Campus::Pilani));
        assert!(Selector::Unspecified.admits(&Campus::Hyderabad));
    }

    #[test]
    fn selector_constraint() {
        assert!(Selector::One(Campus::Goa).is_constrained());
        assert!(!Selector::<Campus>::All.is_constrained());
        assert_eq!(Selector::One(Campus::Goa).as_one(), Some(&Campus::Goa));
        assert_eq!(Selector::<Campus>::Unspecified.as_one(), None);
    }

    #[test]
    fn incoming_item_builder() {
        let item = IncomingItem::new("someone", "hello").with_id("t1_abc").from_bot();
        assert_eq!(item.id, "t1_abc");
        assert!(item.is_bot);
    }
}
