//! Supervision loop around the core pipeline.
//!
//! Owns everything the pure core refuses to: duplicate-reply suppression,
//! pacing between replies, retry with backoff on collaborator errors, and
//! the active-hours gate.

use std::collections::HashSet;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::pipeline::Pipeline;
use crate::platform::{BotRegistry, CommentSource, ReplySink};
use crate::schedule::ActiveHours;

/// Tunables for the supervision loop.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Pause after each posted reply.
    pub reply_delay: Duration,
    /// Pause after a stream error before retrying.
    pub retry_backoff: Duration,
    /// Consecutive stream errors tolerated before giving up.
    pub max_stream_retries: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_secs(10),
            retry_backoff: Duration::from_secs(30),
            max_stream_retries: 5,
        }
    }
}

/// Counters reported when a run ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub seen: u64,
    pub replied: u64,
    pub skipped: u64,
}

/// Drives items from a [`CommentSource`] through the pipeline into a
/// [`ReplySink`].
pub struct Runner {
    pipeline: Pipeline,
    bots: BotRegistry,
    hours: ActiveHours,
    config: RunnerConfig,
    replied_to: HashSet<String>,
}

impl Runner {
    pub fn new(
        pipeline: Pipeline,
        bots: BotRegistry,
        hours: ActiveHours,
        config: RunnerConfig,
    ) -> Self {
        Self {
            pipeline,
            bots,
            hours,
            config,
            replied_to: HashSet::new(),
        }
    }

    /// Run until the source is exhausted, the active window closes, or
    /// stream errors exceed the retry budget.
    pub async fn run<S, K>(&mut self, source: &mut S, sink: &mut K) -> RunSummary
    where
        S: CommentSource,
        K: ReplySink,
    {
        let mut summary = RunSummary::default();
        let mut stream_errors: u32 = 0;

        loop {
            if !self.hours.is_active_now() {
                info!("active window closed, stopping run");
                break;
            }

            let item = match source.next_comment().await {
                Ok(Some(item)) => {
                    stream_errors = 0;
                    item
                }
                Ok(None) => {
                    info!("comment stream exhausted");
                    break;
                }
                Err(err) => {
                    stream_errors += 1;
                    if stream_errors > self.config.max_stream_retries {
                        error!(%err, "stream retry budget exhausted, stopping run");
                        break;
                    }
                    warn!(%err, attempt = stream_errors, "stream error, backing off");
                    tokio::time::sleep(self.config.retry_backoff).await;
                    continue;
                }
            };

            summary.seen += 1;
            let mut item = item;
            if !item.is_bot && self.bots.is_bot(&item.author) {
                item.is_bot = true;
            }

            // Duplicate suppression is collaborator state, not core state:
            // an item already answered is skipped before classification.
            if !item.id.is_empty() && self.replied_to.contains(&item.id) {
                summary.skipped += 1;
                continue;
            }

            let Some(reply) = self.pipeline.handle(&item) else {
                summary.skipped += 1;
                continue;
            };

            match sink.post_reply(&item, &reply).await {
                Ok(()) => {
                    summary.replied += 1;
                    if !item.id.is_empty() {
                        self.replied_to.insert(item.id.clone());
                    }
                    info!(id = %item.id, author = %item.author, "replied");
                    tokio::time::sleep(self.config.reply_delay).await;
                }
                Err(err) => {
                    // Posting failures are logged and skipped; the next
                    // encounter of the same id may retry.
                    warn!(id = %item.id, %err, "failed to post reply");
                }
            }
        }

        info!(
            seen = summary.seen,
            replied = summary.replied,
            skipped = summary.skipped,
            "run finished"
        );
        summary
    }
}

// ============================================================================
// Tests
// ============================================================================
