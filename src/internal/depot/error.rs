use config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum DepotError {
    #[error("No fallback logger configured")]
    NoFallback,
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to open logger for '{key}': {source}")]
    Sink {
        key: String,
        #[source]
        source: std::io::Error,
    },
}
