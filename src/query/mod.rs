//! Query classification and entity extraction.
//!
//! Turns raw comment text into a structured campus/branch lookup, with a
//! conjunctive specificity policy that keeps the bot silent on generic
//! chatter.

pub mod classifier;
pub mod extractor;
pub mod types;

pub use classifier::IntentClassifier;
pub use extractor::EntityExtractor;
pub use types::{Classification, IncomingItem, ParsedQuery, QueryMode, Selector};
