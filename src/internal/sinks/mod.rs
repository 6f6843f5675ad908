// src/internal/sinks/mod.rs

pub mod stream;
pub mod tracing_logger;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use stream::StreamLogger;
pub use tracing_logger::TracingLogger;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::{LogRecord, MemoryLogger};
