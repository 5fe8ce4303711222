//! Destinations for rendered log entries.

use std::fmt;
use std::sync::Mutex;

use crate::logging::{LogEntry, LogLevel};

/// Receives every entry that passes the logger's level filter.
pub trait LogSink: fmt::Debug + Send + Sync {
    fn write(&self, entry: &LogEntry, rendered: &str);
}

/// Forwards entries to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, entry: &LogEntry, rendered: &str) {
        let view_id = entry.view_id.as_str();
        match entry.level {
            LogLevel::Trace => tracing::trace!(view_id, "{}", rendered),
            LogLevel::Debug => tracing::debug!(view_id, "{}", rendered),
            LogLevel::Info => tracing::info!(view_id, "{}", rendered),
            LogLevel::Warn => tracing::warn!(view_id, "{}", rendered),
            LogLevel::Error => tracing::error!(view_id, "{}", rendered),
        }
    }
}

/// Keeps entries in memory so they can be inspected.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(LogEntry, String)>>,
}

impl MemorySink {
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().iter().map(|(entry, _)| entry.clone()).collect()
    }

    pub fn rendered(&self) -> Vec<String> {
        self.lock().iter().map(|(_, line)| line.clone()).collect()
    }

    /// Entries at or above `level`.
    pub fn at_least(&self, level: LogLevel) -> Vec<LogEntry> {
        self.lock()
            .iter()
            .filter(|(entry, _)| entry.level >= level)
            .map(|(entry, _)| entry.clone())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(LogEntry, String)>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for MemorySink {
    fn write(&self, entry: &LogEntry, rendered: &str) {
        self.lock().push((entry.clone(), rendered.to_string()));
    }
}
