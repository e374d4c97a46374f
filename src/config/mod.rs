//! Configuration loading.

pub mod settings;

pub use settings::{BotConfig, Config, DataConfig, PlatformConfig};
