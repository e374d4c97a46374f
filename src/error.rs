//! Error types for the cutoff bot.

use thiserror::Error;

/// Main error type for bot operations.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Cutoff-table data errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read data file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse data file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown campus: {0}")]
    UnknownCampus(String),

    #[error("Unknown branch: {0}")]
    UnknownBranch(String),

    #[error("Duplicate entry for {campus} / {branch}")]
    DuplicateEntry { campus: String, branch: String },

    #[error("Cutoff table is empty")]
    EmptyTable,
}

/// Errors at the streaming/posting collaborator boundary.
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Comment stream error: {0}")]
    Stream(String),

    #[error("Failed to post reply: {0}")]
    Post(String),

    #[error("Malformed incoming item: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
