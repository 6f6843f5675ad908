// src/internal/log/mod.rs

pub mod aggregate;
pub mod interpolate;
pub mod null;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use aggregate::LoggerAggregate;
pub use interpolate::interpolate;
pub use null::NullLogger;

/// Auxiliary key/value data attached to a log call
pub type Context = serde_json::Map<String, serde_json::Value>;

/// Shared handle to any logger stored in a depot or an aggregate
pub type LoggerHandle = Arc<dyn Logger>;

/// Log severities, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

impl Level {
    pub const ALL: [Level; 8] = [
        Level::Emergency,
        Level::Alert,
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Notice,
        Level::Info,
        Level::Debug,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Emergency => "emergency",
            Level::Alert => "alert",
            Level::Critical => "critical",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Notice => "notice",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LogError::InvalidLevel(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Context serialization failed: {0}")]
    Context(#[from] serde_json::Error),
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),
    #[error("Logger '{logger}' failed: {message}")]
    Sink { logger: String, message: String },
}

/// Minimal logging capability shared by every logger the depot can hold.
///
/// Only [`Logger::log`] is required; the per-severity methods forward to it
/// with a fixed level.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str, context: &Context) -> Result<(), LogError>;

    fn emergency(&self, message: &str, context: &Context) -> Result<(), LogError> {
        self.log(Level::Emergency, message, context)
    }

    fn alert(&self, message: &str, context: &Context) -> Result<(), LogError> {
        self.log(Level::Alert, message, context)
    }

    fn critical(&self, message: &str, context: &Context) -> Result<(), LogError> {
        self.log(Level::Critical, message, context)
    }

    fn error(&self, message: &str, context: &Context) -> Result<(), LogError> {
        self.log(Level::Error, message, context)
    }

    fn warning(&self, message: &str, context: &Context) -> Result<(), LogError> {
        self.log(Level::Warning, message, context)
    }

    fn notice(&self, message: &str, context: &Context) -> Result<(), LogError> {
        self.log(Level::Notice, message, context)
    }

    fn info(&self, message: &str, context: &Context) -> Result<(), LogError> {
        self.log(Level::Info, message, context)
    }

    fn debug(&self, message: &str, context: &Context) -> Result<(), LogError> {
        self.log(Level::Debug, message, context)
    }
}
