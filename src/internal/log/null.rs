use super::{Context, Level, LogError, Logger};

/// Logger that discards every call.
///
/// Returned by the depot when neither a hierarchical match nor a fallback
/// logger exists, so callers always get something usable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Level, _message: &str, _context: &Context) -> Result<(), LogError> {
        Ok(())
    }
}
