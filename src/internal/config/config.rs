use std::path::Path;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

// Version information from build script - using option_env! for safety
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version information
pub fn get_version_info() -> String {
    let build_timestamp = option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown");
    let rustc_semver = option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown");
    let cargo_target_triple = option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown");

    format!(
        "logger-depot version {}\n\
         Built: {}\n\
         Rust: {}\n\
         Target: {}",
        VERSION, build_timestamp, rustc_semver, cargo_target_triple
    )
}

/// Diagnostics of the depot itself (not the loggers it stores)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub append_to_file: bool,
    #[serde(default)]
    pub disable_console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            color: true,
            output_path: None,
            append_to_file: false,
            disable_console: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
fn default_true() -> bool {
    true
}

/// Concrete logger to build for a binding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkConfig {
    #[serde(rename = "noop", alias = "null")]
    Null,
    Stderr {
        #[serde(default)]
        channel: Option<String>,
    },
    Stdout {
        #[serde(default)]
        channel: Option<String>,
    },
    File {
        path: String,
        #[serde(default)]
        append: bool,
        #[serde(default)]
        channel: Option<String>,
    },
    Tracing {
        #[serde(default)]
        channel: Option<String>,
    },
    Aggregate {
        members: Vec<SinkConfig>,
    },
}

impl SinkConfig {
    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        match self {
            SinkConfig::File { path, .. } if path.trim().is_empty() => Err(ConfigError::Message(
                format!("logger '{}': file sink requires a path", key),
            )),
            SinkConfig::Aggregate { members } if members.is_empty() => Err(ConfigError::Message(
                format!("logger '{}': aggregate sink requires at least one member", key),
            )),
            SinkConfig::Aggregate { members } => {
                members.iter().try_for_each(|member| member.validate(key))
            }
            _ => Ok(()),
        }
    }
}

/// A logger registered under `key` when the depot is built
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggerBinding {
    pub key: String,
    #[serde(default)]
    pub fallback: bool,
    pub sink: SinkConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub loggers: Vec<LoggerBinding>,
}

impl AppConfig {
    /// Load configuration from the default locations, then `path` if given,
    /// then `LOGGER_DEPOT__*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // Start with default values
            .set_default("logging.level", "warn")?
            .set_default("logging.color", true)?
            // Load config files in order of precedence
            .add_source(File::with_name("logger-depot").required(false))
            .add_source(File::with_name("/etc/logger-depot/config").required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("LOGGER_DEPOT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Parse a YAML document, applying the same validation as [`AppConfig::load`]
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let app_config: AppConfig =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Message(e.to_string()))?;
        app_config.validate()?;
        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.loggers
            .iter()
            .try_for_each(|binding| binding.sink.validate(&binding.key))
    }
}
