use std::sync::Arc;

use tracing::info;

use super::error::DepotError;
use super::registry::LoggerDepot;
use crate::internal::config::{LoggerBinding, SinkConfig};
use crate::internal::log::{LoggerAggregate, LoggerHandle, NullLogger};
use crate::internal::sinks::{StreamLogger, TracingLogger};

/// Build the logger described by `sink`. `key` names the channel when the
/// sink does not set one.
pub fn build_logger(key: &str, sink: &SinkConfig) -> Result<LoggerHandle, DepotError> {
    let channel = |explicit: &Option<String>| {
        explicit
            .clone()
            .unwrap_or_else(|| if key.is_empty() { "app".to_string() } else { key.to_string() })
    };

    let logger: LoggerHandle = match sink {
        SinkConfig::Null => Arc::new(NullLogger),
        SinkConfig::Stderr { channel: c } => Arc::new(StreamLogger::stderr(channel(c))),
        SinkConfig::Stdout { channel: c } => Arc::new(StreamLogger::stdout(channel(c))),
        SinkConfig::File {
            path,
            append,
            channel: c,
        } => {
            let logger = StreamLogger::file(channel(c), path, *append).map_err(|source| {
                DepotError::Sink {
                    key: key.to_string(),
                    source,
                }
            })?;
            Arc::new(logger)
        }
        SinkConfig::Tracing { channel: c } => Arc::new(TracingLogger::new(channel(c))),
        SinkConfig::Aggregate { members } => {
            let members = members
                .iter()
                .map(|member| build_logger(key, member))
                .collect::<Result<Vec<_>, _>>()?;
            Arc::new(LoggerAggregate::with_loggers(members))
        }
    };
    Ok(logger)
}

impl LoggerDepot {
    /// Register a logger for every binding, in order
    pub fn populate(&self, bindings: &[LoggerBinding]) -> Result<(), DepotError> {
        for binding in bindings {
            let logger = build_logger(&binding.key, &binding.sink)?;
            self.register_with(&binding.key, logger, binding.fallback);
        }
        info!(count = bindings.len(), "logger depot populated");
        Ok(())
    }

    pub fn from_bindings(bindings: &[LoggerBinding]) -> Result<Self, DepotError> {
        let depot = Self::new();
        depot.populate(bindings)?;
        Ok(depot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::config::AppConfig;

    #[test]
    fn test_from_bindings_registers_in_order() {
        let config = AppConfig::from_yaml(
            r#"
loggers:
  - { key: 'Foo', sink: { type: noop } }
  - { key: 'Foo\Bar', sink: { type: tracing } }
  - { key: 'Baz', fallback: true, sink: { type: aggregate, members: [ { type: noop }, { type: tracing } ] } }
"#,
        )
        .unwrap();

        let depot = LoggerDepot::from_bindings(&config.loggers).unwrap();

        assert_eq!(depot.keys(), vec!["Foo", "Foo\\Bar", "Baz"]);
        assert_eq!(depot.fallback_key().unwrap(), "Baz");
        assert_eq!(depot.resolve_key("Foo\\Bar\\Qux").as_deref(), Some("Foo\\Bar"));
    }

    #[test]
    fn test_file_sink_failure_names_key() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a log file
        let sink = SinkConfig::File {
            path: dir.path().to_string_lossy().into_owned(),
            append: true,
            channel: None,
        };

        match build_logger("Audit", &sink) {
            Err(DepotError::Sink { key, .. }) => assert_eq!(key, "Audit"),
            other => panic!("expected sink error, got {:?}", other.map(|_| ())),
        }
    }
}
