//! Cutoffbot: a conversational filter for BITSAT cutoff questions.
//!
//! Classifies incoming comments as `!cutoff` commands or specific
//! natural-language cutoff questions, extracts the campus/branch they
//! refer to, and renders a formatted reply from a static cutoff table.
//! The decision core is pure and synchronous; streaming and posting live
//! behind the platform collaborator traits.

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod platform;
pub mod query;
pub mod reply;
pub mod schedule;

pub use config::Config;
pub use data::{AliasTable, Branch, Campus, CutoffEntry, CutoffTable};
pub use error::{BotError, ConfigError, DataError, PlatformError, Result};
pub use pipeline::Pipeline;
pub use platform::{
    BotRegistry, CommentSource, JsonLinesSink, JsonLinesSource, ReplySink, Runner, RunnerConfig,
};
pub use query::{
    Classification, EntityExtractor, IncomingItem, IntentClassifier, ParsedQuery, QueryMode,
    Selector,
};
pub use reply::ReplyRenderer;
pub use schedule::ActiveHours;
