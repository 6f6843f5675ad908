pub mod config;
pub mod depot;
pub mod log;
pub mod logger;
pub mod sinks;
