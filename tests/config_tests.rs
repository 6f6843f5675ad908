use logger_depot::internal::config::{AppConfig, SinkConfig};
use logger_depot::{Context, Logger, LoggerDepot};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to create a temp file with YAML content
    fn create_temp_yaml(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write temp file");
        file
    }

    // ==================== load() tests ====================

    #[test]
    fn test_load_explicit_file() {
        let file = create_temp_yaml(
            r#"
logging:
  level: debug
  color: false
loggers:
  - key: 'Shop'
    sink: { type: tracing }
  - key: 'Shop\Billing'
    fallback: true
    sink: { type: noop }
"#,
        );

        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.color);
        assert_eq!(config.loggers.len(), 2);
        assert_eq!(config.loggers[1].key, "Shop\\Billing");
        assert_eq!(config.loggers[1].sink, SinkConfig::Null);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = AppConfig::load(Some(std::path::Path::new("/nonexistent/logger-depot.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_rejects_invalid_binding() {
        let file = create_temp_yaml(
            r#"
loggers:
  - key: 'Broken'
    sink: { type: file, path: "" }
"#,
        );

        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }

    // ==================== depot from config ====================

    #[test]
    fn test_file_bindings_write_through_depot() {
        let dir = tempfile::tempdir().unwrap();
        let audit = dir.path().join("logs").join("audit.log");
        let yaml = format!(
            r#"
loggers:
  - key: 'App'
    sink: {{ type: noop }}
  - key: 'App\Audit'
    sink:
      type: aggregate
      members:
        - {{ type: file, path: '{}', channel: audit }}
        - {{ type: noop }}
"#,
            audit.display()
        );
        let config = AppConfig::from_yaml(&yaml).unwrap();
        let depot = LoggerDepot::from_bindings(&config.loggers).unwrap();

        let mut context = Context::new();
        context.insert("user".to_string(), serde_json::json!("dana"));
        depot
            .get_logger("App\\Audit\\Login")
            .notice("{user} signed in", &context)
            .unwrap();
        depot
            .get_logger("App\\Other")
            .notice("discarded", &Context::new())
            .unwrap();

        let contents = fs::read_to_string(&audit).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("audit.NOTICE: dana signed in {\"user\":\"dana\"}"));
    }
}
