pub mod cli;
pub mod internal;

// Re-export commonly used types
pub use internal::depot::{DepotError, LoggerDepot};
pub use internal::log::{Context, Level, LogError, Logger, LoggerAggregate, LoggerHandle, NullLogger};
