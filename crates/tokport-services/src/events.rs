//! Diagnostic events emitted while exporting and publishing.
//!
//! Components take a `&dyn EventSink` instead of logging globally; a
//! [`DebugLog`] wraps the sink and drops everything unless debugging is on.

use serde::Serialize;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

pub trait EventSink {
    fn emit(&self, level: LogLevel, message: &str);
}

/// Forwards events to `tracing` under the `tokport::events` target.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info | LogLevel::Success => {
                tracing::info!(target: "tokport::events", kind = ?level, "{message}")
            }
            LogLevel::Warn => tracing::warn!(target: "tokport::events", "{message}"),
            LogLevel::Error => tracing::error!(target: "tokport::events", "{message}"),
        }
    }
}

/// Keeps every event in memory.
#[derive(Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain collected entries.
    pub fn take(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(mut v) => std::mem::take(&mut *v),
            Err(_) => Vec::new(),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        match self.entries.lock() {
            Ok(v) => v.iter().map(|e| e.message.clone()).collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl EventSink for MemorySink {
    fn emit(&self, level: LogLevel, message: &str) {
        if let Ok(mut v) = self.entries.lock() {
            v.push(LogEntry {
                level,
                message: message.to_string(),
            });
        }
    }
}

pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _level: LogLevel, _message: &str) {}
}

/// A sink gated by the `debug` flag.
#[derive(Clone, Copy)]
pub struct DebugLog<'a> {
    sink: &'a dyn EventSink,
    enabled: bool,
}

impl<'a> DebugLog<'a> {
    pub fn new(sink: &'a dyn EventSink, enabled: bool) -> Self {
        Self { sink, enabled }
    }

    pub fn disabled() -> DebugLog<'static> {
        DebugLog {
            sink: &NullSink,
            enabled: false,
        }
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Info, message.as_ref());
    }

    pub fn success(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Success, message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Warn, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Error, message.as_ref());
    }

    fn emit(&self, level: LogLevel, message: &str) {
        if self.enabled {
            self.sink.emit(level, message);
        }
    }
}
