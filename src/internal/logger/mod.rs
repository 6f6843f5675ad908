// src/internal/logger/mod.rs

#[allow(clippy::module_inception)]
pub mod logger;

// Export the init_logger function
pub use logger::init_logger;
