use std::sync::{Arc, Mutex};

use crate::internal::log::{Context, Level, LogError, Logger};

/// A single call captured by [`MemoryLogger`]
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    pub context: Context,
}

/// Logger for tests - records every call, optionally failing each one
#[derive(Clone)]
pub struct MemoryLogger {
    name: String,
    fail: bool,
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemoryLogger {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fail: false,
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A logger whose every call fails after recording it
    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            fail: true,
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str, context: &Context) -> Result<(), LogError> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(LogRecord {
                level,
                message: message.to_string(),
                context: context.clone(),
            });

        if self.fail {
            return Err(LogError::Sink {
                logger: self.name.clone(),
                message: "configured to fail".to_string(),
            });
        }
        Ok(())
    }
}
