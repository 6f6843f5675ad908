// src/internal/depot/mod.rs

pub mod builder;
pub mod error;
pub mod key;
pub mod registry;

pub use builder::build_logger;
pub use error::DepotError;
pub use key::{DepotKey, SEPARATOR};
pub use registry::LoggerDepot;
