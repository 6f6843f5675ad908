use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};

use crate::internal::log::{interpolate, Context, Level, LogError, Logger};

/// Line-oriented logger over any writer.
///
/// Each record becomes one line:
/// `[2026-01-01T00:00:00.000Z] channel.LEVEL: message {"context":"json"}`.
pub struct StreamLogger {
    channel: String,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl StreamLogger {
    pub fn from_writer(channel: impl Into<String>, writer: Box<dyn Write + Send>) -> Self {
        Self {
            channel: channel.into(),
            writer: Mutex::new(writer),
        }
    }

    pub fn stderr(channel: impl Into<String>) -> Self {
        Self::from_writer(channel, Box::new(io::stderr()))
    }

    pub fn stdout(channel: impl Into<String>) -> Self {
        Self::from_writer(channel, Box::new(io::stdout()))
    }

    /// Open `path` for logging, creating parent directories as needed.
    /// Without `append` an existing file is truncated.
    pub fn file(channel: impl Into<String>, path: impl AsRef<Path>, append: bool) -> io::Result<Self> {
        let file = open_log_file(path.as_ref(), append)?;
        Ok(Self::from_writer(channel, Box::new(file)))
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    fn format_line(&self, level: Level, message: &str, context: &Context) -> Result<String, LogError> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut line = format!(
            "[{}] {}.{}: {}",
            timestamp,
            self.channel,
            level.as_str().to_uppercase(),
            interpolate(message, context)
        );
        if !context.is_empty() {
            line.push(' ');
            line.push_str(&serde_json::to_string(context)?);
        }
        line.push('\n');
        Ok(line)
    }
}

pub(crate) fn open_log_file(path: &Path, append: bool) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
}

impl Logger for StreamLogger {
    fn log(&self, level: Level, message: &str, context: &Context) -> Result<(), LogError> {
        let line = self.format_line(level, message, context)?;
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
