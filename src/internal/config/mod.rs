// src/internal/config/mod.rs

#[allow(clippy::module_inception)]
pub mod config;

pub use self::config::{get_version_info, AppConfig, LoggerBinding, LoggingConfig, SinkConfig, VERSION};
