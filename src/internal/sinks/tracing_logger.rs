use crate::internal::log::{interpolate, Context, Level, LogError, Logger};

/// Forwards records into the process's `tracing` subscriber.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    channel: String,
}

impl TracingLogger {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }
}

/// Collapse the eight log severities onto tracing's five levels
pub fn tracing_level(level: Level) -> tracing::Level {
    match level {
        Level::Emergency | Level::Alert | Level::Critical | Level::Error => tracing::Level::ERROR,
        Level::Warning => tracing::Level::WARN,
        Level::Notice | Level::Info => tracing::Level::INFO,
        Level::Debug => tracing::Level::DEBUG,
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str, context: &Context) -> Result<(), LogError> {
        let message = interpolate(message, context);
        let context = serde_json::to_string(context)?;
        let channel = self.channel.as_str();
        let severity = level.as_str();

        match tracing_level(level) {
            tracing::Level::ERROR => {
                tracing::error!(channel, severity, context = %context, "{}", message)
            }
            tracing::Level::WARN => {
                tracing::warn!(channel, severity, context = %context, "{}", message)
            }
            tracing::Level::INFO => {
                tracing::info!(channel, severity, context = %context, "{}", message)
            }
            _ => tracing::debug!(channel, severity, context = %context, "{}", message),
        }
        Ok(())
    }
}
