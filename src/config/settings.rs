//! Configuration settings for the cutoff bot.
//!
//! Everything the core consumes at startup is assembled here into one
//! immutable struct: rendering knobs, platform collaborator settings,
//! the active-hours window, and optional data-file overrides. The core
//! pipeline itself never reads configuration after construction.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::data::{AliasTable, Branch, Campus, CutoffTable, Entity};
use crate::error::{BotError, ConfigError};
use crate::pipeline::Pipeline;
use crate::platform::{BotRegistry, RunnerConfig};
use crate::reply::renderer::{ReplyRenderer, DEFAULT_FOOTER_URL};
use crate::schedule::ActiveHours;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bot: BotConfig,
    pub platform: PlatformConfig,
    pub schedule: ActiveHours,
    pub data: DataConfig,
}

/// Reply behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Footer link appended to every reply.
    pub footer_url: String,
    /// Seed mixed into the deterministic flourish pick.
    pub flourish_seed: u64,
    /// Seconds to pause after each posted reply.
    pub reply_delay_secs: u64,
    /// Seconds to back off after a stream error.
    pub retry_backoff_secs: u64,
    /// Consecutive stream errors tolerated before giving up.
    pub max_stream_retries: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            footer_url: DEFAULT_FOOTER_URL.to_string(),
            flourish_seed: 0,
            reply_delay_secs: 10,
            retry_backoff_secs: 30,
            max_stream_retries: 5,
        }
    }
}

/// Streaming/posting collaborator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Channel (subreddit) the collaborator monitors. Informational for
    /// the adapter; the core never reads it.
    pub channel: String,
    /// Author-name fragments that mark an account as a bot.
    pub bot_name_fragments: Vec<String>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            channel: "bitsatards".to_string(),
            bot_name_fragments: BotRegistry::default_fragments(),
        }
    }
}

/// Static-data overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Optional TOML file replacing the builtin cutoff table.
    pub cutoff_file: Option<PathBuf>,
    /// Extra alias phrases mapped to campus/branch config keys
    /// (e.g. `"pilly" = "pilani"`, `"compsci" = "cse"`).
    pub extra_aliases: BTreeMap<String, String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations, falling back to
    /// defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let mut candidates = vec![PathBuf::from("cutoffbot.toml")];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("cutoffbot/config.toml"));
        }
        for path in candidates {
            if path.is_file() {
                return Self::from_file(path);
            }
        }
        Ok(Self::default())
    }

    /// Validate semantic constraints the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schedule.start_hour > 23 || self.schedule.end_hour > 23 {
            return Err(ConfigError::Invalid(
                "schedule hours must be in 0..=23".to_string(),
            ));
        }
        if self.bot.footer_url.is_empty() {
            return Err(ConfigError::Invalid("footer_url must not be empty".to_string()));
        }
        for (phrase, key) in &self.data.extra_aliases {
            if Campus::from_key(key).is_none() && Branch::from_key(key).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "extra alias {phrase:?} maps to unknown key {key:?}"
                )));
            }
        }
        Ok(())
    }

    /// Build the immutable core pipeline this configuration describes.
    pub fn build_pipeline(&self) -> Result<Pipeline, BotError> {
        let table = match &self.data.cutoff_file {
            Some(path) => CutoffTable::from_file(path)?,
            None => CutoffTable::builtin(),
        };

        let mut aliases = AliasTable::builtin();
        for (phrase, key) in &self.data.extra_aliases {
            let entity = Campus::from_key(key)
                .map(Entity::Campus)
                .or_else(|| Branch::from_key(key).map(Entity::Branch))
                .ok_or_else(|| {
                    ConfigError::Invalid(format!("extra alias {phrase:?} maps to unknown key"))
                })?;
            aliases.insert(phrase.to_lowercase(), entity);
        }

        let renderer = ReplyRenderer::new(self.bot.footer_url.clone(), self.bot.flourish_seed);
        Ok(Pipeline::new(table, aliases, renderer))
    }

    /// Bot registry described by the platform section.
    pub fn bot_registry(&self) -> BotRegistry {
        BotRegistry::new(self.platform.bot_name_fragments.iter().cloned())
    }

    /// Runner tunables described by the bot section.
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            reply_delay: Duration::from_secs(self.bot.reply_delay_secs),
            retry_backoff: Duration::from_secs(self.bot.retry_backoff_secs),
            max_stream_retries: self.bot.max_stream_retries,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.build_pipeline().is_ok());
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config = Config::from_toml_str(
            r#"
            [bot]
            flourish_seed = 7

            [schedule]
            start_hour = 10
            end_hour = 22
            enabled = true
            "#,
        )
        .unwrap();
        assert_eq!(config.bot.flourish_seed, 7);
        assert_eq!(config.bot.reply_delay_secs, 10);
        assert_eq!(config.schedule.start_hour, 10);
        assert_eq!(config.platform.channel, "bitsatards");
    }

    #[test]
    fn rejects_out_of_range_hours() {
        let err = Config::from_toml_str(
            r#"
            [schedule]
            start_hour = 25
            end_hour = 1
            enabled = true
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_alias_target() {
        let err = Config::from_toml_str(
            r#"
            [data.extra_aliases]
            "pilly" = "atlantis"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn extra_aliases_reach_the_pipeline() {
        let config = Config::from_toml_str(
            r#"
            [data.extra_aliases]
            "pilly" = "pilani"
            "compsci" = "cse"
            "#,
        )
        .unwrap();
        let pipeline = config.build_pipeline().unwrap();
        let reply = pipeline
            .handle(&crate::query::IncomingItem::new(
                "someone",
                "!cutoff for compsci in pilly",
            ))
            .unwrap();
        assert!(reply.contains("**327/390**"));
    }

    #[test]
    fn cutoff_file_override_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "max_score = 400\n\n[pilani]\ncse = 333\n"
        )
        .unwrap();
        let mut config = Config::default();
        config.data.cutoff_file = Some(file.path().to_path_buf());
        let pipeline = config.build_pipeline().unwrap();
        let reply = pipeline
            .handle(&crate::query::IncomingItem::new("someone", "!cutoff for cse in pilani"))
            .unwrap();
        assert!(reply.contains("**333/400**"));
    }
}
