//! Platform collaborator boundary.
//!
//! The core pipeline never touches the network. It consumes an
//! [`IncomingItem`] stream from a [`CommentSource`] and hands reply text
//! to a [`ReplySink`]; authentication, rate limits and platform API
//! details live behind these traits. The shipped implementations speak
//! JSON lines over arbitrary async readers/writers, which is enough for
//! piping a real platform adapter (or a test fixture) into the bot.

pub mod runner;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::PlatformError;
use crate::query::IncomingItem;

pub use runner::{Runner, RunnerConfig};

// ============================================================================
// Collaborator Traits
// ============================================================================

/// A stream of incoming comments.
#[async_trait]
pub trait CommentSource: Send {
    /// Next comment, or `None` when the stream is exhausted.
    async fn next_comment(&mut self) -> Result<Option<IncomingItem>, PlatformError>;
}

/// Posts rendered replies back to the platform.
#[async_trait]
pub trait ReplySink: Send {
    async fn post_reply(&mut self, item: &IncomingItem, body: &str) -> Result<(), PlatformError>;
}

// ============================================================================
// Bot Registry
// ============================================================================

/// Known-bot author detection.
///
/// An author whose lowercased name contains any registered fragment is
/// treated as a bot; the runner stamps `is_bot` before the classifier
/// ever sees the item.
#[derive(Debug, Clone)]
pub struct BotRegistry {
    fragments: Vec<String>,
}

impl Default for BotRegistry {
    fn default() -> Self {
        Self::new(Self::default_fragments())
    }
}

impl BotRegistry {
    /// The builtin list of known automated-account name fragments.
    pub fn default_fragments() -> Vec<String> {
        [
            "automoderator",
            "automod",
            "moderator",
            "bot",
            "_bot",
            "reddit",
            "snapshillbot",
            "totesmessenger",
            "remindmebot",
            "wikisummarizerbot",
        ]
        .into_iter()
        .map(str::to_string)
        .collect()
    }

    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments
                .into_iter()
                .map(|s| s.into().to_lowercase())
                .collect(),
        }
    }

    /// Whether the author name looks like a known automated account.
    pub fn is_bot(&self, author: &str) -> bool {
        let author = author.to_lowercase();
        self.fragments.iter().any(|f| author.contains(f))
    }
}

// ============================================================================
// JSON-Lines Implementations
// ============================================================================

/// Reads `IncomingItem` records as JSON lines from any buffered reader.
pub struct JsonLinesSource<R> {
    reader: R,
    buf: String,
}

impl<R: AsyncBufRead + Unpin + Send> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> CommentSource for JsonLinesSource<R> {
    async fn next_comment(&mut self) -> Result<Option<IncomingItem>, PlatformError> {
        loop {
            self.buf.clear();
            let read = self.reader.read_line(&mut self.buf).await?;
            if read == 0 {
                return Ok(None);
            }
            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            return Ok(Some(serde_json::from_str(line)?));
        }
    }
}

/// Writes each reply as a JSON record to any async writer.
pub struct JsonLinesSink<W> {
    writer: W,
}

#[derive(serde::Serialize)]
struct ReplyRecord<'a> {
    in_reply_to: &'a str,
    author: &'a str,
    body: &'a str,
}

impl<W: AsyncWrite + Unpin + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> ReplySink for JsonLinesSink<W> {
    async fn post_reply(&mut self, item: &IncomingItem, body: &str) -> Result<(), PlatformError> {
        let record = ReplyRecord {
            in_reply_to: &item.id,
            author: &item.author,
            body,
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
