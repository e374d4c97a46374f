//! The core decision pipeline: classify → extract → lookup → render.
//!
//! Pure and synchronous. All state here is immutable after construction,
//! so a `Pipeline` can be shared across threads and invoked concurrently
//! without synchronization. Everything that blocks (streaming, posting,
//! pacing, retries) lives behind the platform traits instead.

use std::sync::Arc;

use tracing::debug;

use crate::data::{AliasTable, CutoffTable};
use crate::query::{
    Classification, EntityExtractor, IncomingItem, IntentClassifier, ParsedQuery, QueryMode,
};
use crate::reply::ReplyRenderer;

/// The full query-to-reply pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    classifier: IntentClassifier,
    extractor: EntityExtractor,
    table: Arc<CutoffTable>,
    renderer: ReplyRenderer,
}

impl Pipeline {
    /// Assemble a pipeline over the given table, aliases and renderer.
    pub fn new(table: CutoffTable, aliases: AliasTable, renderer: ReplyRenderer) -> Self {
        let aliases = Arc::new(aliases);
        Self {
            classifier: IntentClassifier::new(Arc::clone(&aliases)),
            extractor: EntityExtractor::new(aliases),
            table: Arc::new(table),
            renderer,
        }
    }

    /// Pipeline over the builtin table and aliases with default rendering.
    pub fn builtin() -> Self {
        Self::new(
            CutoffTable::builtin(),
            AliasTable::builtin(),
            ReplyRenderer::default(),
        )
    }

    /// Process one incoming item. Returns the reply text for in-scope
    /// queries and `None` for everything the bot must stay silent on.
    pub fn handle(&self, item: &IncomingItem) -> Option<String> {
        let (query_text, mode) = match self.classifier.classify(item) {
            Classification::Ignore => {
                debug!(author = %item.author, "ignoring out-of-scope item");
                return None;
            }
            Classification::Command(arg) => (arg, QueryMode::Command),
            Classification::NaturalLanguage(text) => (text, QueryMode::NaturalLanguage),
        };

        let (campus, branch) = self.extractor.extract(&query_text);
        let query = ParsedQuery {
            campus,
            branch,
            mode,
        };
        debug!(?query, author = %item.author, "accepted query");

        let entries = self.table.lookup(query.campus, query.branch);
        Some(self.renderer.render(&query, &entries, &item.author))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_command_renders_full_table() {
        let pipeline = Pipeline::builtin();
        let reply = pipeline
            .handle(&IncomingItem::new("someone", "!cutoff"))
            .expect("command must produce a reply");
        for campus in ["PILANI", "GOA", "HYDERABAD"] {
            assert!(reply.contains(campus), "missing {campus}");
        }
        assert!(reply.contains("327/390"));
        assert!(reply.contains("161/390"));
    }

    #[test]
    fn command_with_unknown_argument_degrades_to_full_table() {
        // In scope (valid command) but no extractable entity: forgiving
        // fallback to the all/all rendering rather than an error reply.
        let pipeline = Pipeline::builtin();
        let reply = pipeline
            .handle(&IncomingItem::new("someone", "!cutoff for underwater basket weaving"))
            .expect("command must produce a reply");
        assert!(reply.contains("PILANI") && reply.contains("HYDERABAD"));
    }

    #[test]
    fn natural_language_matches_command_result() {
        let pipeline = Pipeline::builtin();
        let by_command = pipeline
            .handle(&IncomingItem::new("someone", "!cutoff for CSE"))
            .unwrap();
        let by_question = pipeline
            .handle(&IncomingItem::new("someone", "What is the cutoff for CSE?"))
            .unwrap();
        // Same entries and same rendered body for the same author.
        assert_eq!(by_command, by_question);
    }

    #[test]
    fn chatter_and_bots_stay_silent() {
        let pipeline = Pipeline::builtin();
        assert!(pipeline
            .handle(&IncomingItem::new("someone", "BITSAT prep tips?"))
            .is_none());
        assert!(pipeline
            .handle(&IncomingItem::new("AutoModerator", "!cutoff").from_bot())
            .is_none());
    }

    #[test]
    fn end_to_end_is_deterministic() {
        let pipeline = Pipeline::builtin();
        let item = IncomingItem::new("fixed_author", "!cutoff for mechanical in Pilani");
        let first = pipeline.handle(&item).unwrap();
        for _ in 0..3 {
            assert_eq!(pipeline.handle(&item).unwrap(), first);
        }
        assert!(first.contains("**266/390**"));
    }
}
