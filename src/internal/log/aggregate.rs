use std::fmt;

use super::{Context, Level, LogError, Logger, LoggerHandle};

/// Treats several loggers as one by replaying every call on each member.
///
/// Members are invoked in insertion order. The first member that fails
/// stops the fan-out and its error is returned to the caller; members
/// after it do not see the record.
#[derive(Default, Clone)]
pub struct LoggerAggregate {
    loggers: Vec<LoggerHandle>,
}

impl LoggerAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loggers<I>(loggers: I) -> Self
    where
        I: IntoIterator<Item = LoggerHandle>,
    {
        let mut aggregate = Self::new();
        aggregate.set_loggers(loggers);
        aggregate
    }

    /// Append a single member
    pub fn add_logger(&mut self, logger: LoggerHandle) -> &mut Self {
        self.loggers.push(logger);
        self
    }

    /// Append every logger in order; existing members are kept
    pub fn set_loggers<I>(&mut self, loggers: I) -> &mut Self
    where
        I: IntoIterator<Item = LoggerHandle>,
    {
        for logger in loggers {
            self.add_logger(logger);
        }
        self
    }

    pub fn loggers(&self) -> &[LoggerHandle] {
        &self.loggers
    }
}

impl fmt::Debug for LoggerAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerAggregate")
            .field("members", &self.loggers.len())
            .finish()
    }
}

impl Logger for LoggerAggregate {
    fn log(&self, level: Level, message: &str, context: &Context) -> Result<(), LogError> {
        for logger in &self.loggers {
            logger.log(level, message, context)?;
        }
        Ok(())
    }
}
