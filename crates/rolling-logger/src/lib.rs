//! Rolling Logger
//!
//! A `tracing_subscriber` layer that keeps the most recent events in a
//! bounded in-memory buffer and hands each one to a pluggable sink (the
//! browser console in the UI). When the buffer is full the oldest event is
//! dropped. Records from the `log` facade are bridged into tracing when the
//! logger is installed, so crates on either facade end up in the same buffer.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::Layer;

pub use tracing::level_filters::LevelFilter;
pub use tracing::Level;

/// Events kept when no capacity is configured
pub const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("failed to install logger: {0}")]
    Install(#[from] TryInitError),
}

/// One captured event
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:<5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level.as_str(),
            self.target,
            self.message
        )
    }
}

/// Receives every event that passes the level filter
pub type Sink = Arc<dyn Fn(&LogEntry) + Send + Sync>;

pub struct LoggerConfig {
    pub app_name: String,
    pub level: LevelFilter,
    pub capacity: usize,
    pub sink: Option<Sink>,
}

impl LoggerConfig {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            level: LevelFilter::INFO,
            capacity: DEFAULT_CAPACITY,
            sink: None,
        }
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn with_sink(mut self, sink: impl Fn(&LogEntry) + Send + Sync + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }
}

/// Shared handle to the circular buffer
#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Buffered events, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    fn push(&self, entry: LogEntry) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }
}

/// Layer that records events into a [`LogBuffer`] and forwards them to the sink
pub struct RollingLayer {
    buffer: LogBuffer,
    sink: Option<Sink>,
}

impl RollingLayer {
    pub fn new(capacity: usize, sink: Option<Sink>) -> Self {
        Self {
            buffer: LogBuffer::new(capacity),
            sink,
        }
    }

    pub fn buffer(&self) -> LogBuffer {
        self.buffer.clone()
    }
}

/// Pulls the message out of an event. Bridged `log` records carry their
/// real target in a `log.target` field.
#[derive(Default)]
struct EntryVisitor {
    message: String,
    log_target: Option<String>,
    fields: Vec<String>,
}

impl Visit for EntryVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "log.target" => self.log_target = Some(value.to_string()),
            name if name.starts_with("log.") => {}
            name => self.fields.push(format!("{}={}", name, value)),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{:?}", value),
            name if name.starts_with("log.") => {}
            name => self.fields.push(format!("{}={:?}", name, value)),
        }
    }
}

impl<S> Layer<S> for RollingLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = EntryVisitor::default();
        event.record(&mut visitor);

        let mut message = visitor.message;
        for field in visitor.fields {
            if !message.is_empty() {
                message.push(' ');
            }
            message.push_str(&field);
        }

        let entry = LogEntry {
            timestamp: Local::now(),
            level: *metadata.level(),
            target: visitor.log_target.unwrap_or_else(|| metadata.target().to_string()),
            message,
        };
        if let Some(sink) = &self.sink {
            sink(&entry);
        }
        self.buffer.push(entry);
    }
}

// ============================================================================
// Global logger
// ============================================================================

static BUFFER: OnceLock<LogBuffer> = OnceLock::new();

/// Install the rolling layer as the global subscriber and bridge `log`
pub fn init_logger(config: LoggerConfig) -> Result<LogBuffer, LoggerError> {
    if BUFFER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }
    let layer = RollingLayer::new(config.capacity, config.sink);
    let buffer = layer.buffer();
    tracing_subscriber::registry()
        .with(layer.with_filter(config.level))
        .try_init()?;
    BUFFER.set(buffer.clone()).map_err(|_| LoggerError::AlreadyInitialized)?;
    tracing::info!(target: "rolling_logger", "{} logging started", config.app_name);
    Ok(buffer)
}

/// Snapshot of the global buffer; empty before initialization
pub fn recent_entries() -> Vec<LogEntry> {
    BUFFER.get().map(LogBuffer::entries).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn capture(layer: RollingLayer, level: LevelFilter) -> tracing::subscriber::DefaultGuard {
        tracing::subscriber::set_default(tracing_subscriber::registry().with(layer.with_filter(level)))
    }

    fn messages(buffer: &LogBuffer) -> Vec<String> {
        buffer.entries().into_iter().map(|e| e.message).collect()
    }

    #[test]
    fn test_buffer_rolls_over() {
        let layer = RollingLayer::new(3, None);
        let buffer = layer.buffer();
        let _guard = capture(layer, LevelFilter::TRACE);

        for i in 0..5 {
            tracing::info!("line {}", i);
        }
        assert_eq!(messages(&buffer), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_level_filter() {
        let layer = RollingLayer::new(DEFAULT_CAPACITY, None);
        let buffer = layer.buffer();
        let _guard = capture(layer, LevelFilter::WARN);

        tracing::debug!(target: "test", "hidden");
        tracing::error!(target: "test", "shown");

        let entries = buffer.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::ERROR);
        assert_eq!(entries[0].target, "test");
    }

    #[test]
    fn test_fields_follow_message() {
        let layer = RollingLayer::new(DEFAULT_CAPACITY, None);
        let buffer = layer.buffer();
        let _guard = capture(layer, LevelFilter::INFO);

        tracing::info!(count = 3, key = "tasks", "saved");
        assert_eq!(messages(&buffer), vec!["saved count=3 key=tasks"]);
    }

    #[test]
    fn test_sink_receives_events() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let sink: Sink = Arc::new(move |entry: &LogEntry| {
            assert!(entry.to_string().contains("INFO  test: hello"));
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let _guard = capture(RollingLayer::new(DEFAULT_CAPACITY, Some(sink)), LevelFilter::INFO);

        tracing::info!(target: "test", "hello");
        tracing::trace!(target: "test", "filtered");
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_global_logger_bridges_log_records() {
        // The only test touching the global subscriber
        assert!(recent_entries().is_empty());
        let buffer = init_logger(LoggerConfig::new("Global").with_capacity(50)).expect("first init succeeds");
        assert!(matches!(init_logger(LoggerConfig::new("Again")), Err(LoggerError::AlreadyInitialized)));

        log::warn!(target: "taskirra_core::store", "disk almost full");
        let recent = recent_entries();
        assert!(recent.iter().any(|e| e.message == "Global logging started"));
        assert!(recent
            .iter()
            .any(|e| e.message == "disk almost full" && e.target == "taskirra_core::store" && e.level == Level::WARN));
        assert_eq!(buffer.entries(), recent);
    }
}
