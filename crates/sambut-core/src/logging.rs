#![forbid(unsafe_code)]

//! Tracing layer that formats events as single lines for a pluggable sink.
//!
//! The page has no terminal. `sambut-web` installs a sink that forwards each
//! line to the matching `console` method; tests capture lines in memory.
//!
//! # Quick Start
//!
//! ```
//! use sambut_core::logging::{CaptureSink, PageLogLayer};
//! use tracing_subscriber::prelude::*;
//!
//! let sink = CaptureSink::new();
//! let layer = PageLogLayer::new(sink.clone());
//! let subscriber = tracing_subscriber::registry().with(layer);
//!
//! tracing::subscriber::with_default(subscriber, || {
//!     tracing::info!(entries = 3, "history loaded");
//! });
//! assert!(sink.lines()[0].ends_with("history loaded entries=3"));
//! ```

use std::fmt::{self, Write as FmtWrite};
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;

// ============================================================================
// Configuration
// ============================================================================

/// Which parts of an event end up in the line.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Show log level. Default: true.
    pub show_level: bool,
    /// Show the tracing target (module path). Default: true.
    pub show_target: bool,
    /// Show structured fields beyond `message`. Default: true.
    pub show_fields: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            show_level: true,
            show_target: true,
            show_fields: true,
        }
    }
}

/// Parse a level name from configuration. Unknown names fall back to `INFO`.
#[must_use]
pub fn parse_level_filter(name: &str) -> LevelFilter {
    match name.trim().to_ascii_lowercase().as_str() {
        "off" => LevelFilter::OFF,
        "error" => LevelFilter::ERROR,
        "warn" => LevelFilter::WARN,
        "debug" => LevelFilter::DEBUG,
        "trace" => LevelFilter::TRACE,
        _ => LevelFilter::INFO,
    }
}

/// Format level as a fixed-width string.
fn level_str(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN ",
        Level::INFO => "INFO ",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

// ============================================================================
// Sinks
// ============================================================================

/// Destination for formatted lines.
pub trait LogSink: Send + Sync {
    fn write_line(&self, level: Level, line: &str);
}

/// Keeps every line in memory.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CaptureSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LogSink for CaptureSink {
    fn write_line(&self, _level: Level, line: &str) {
        let mut lines = match self.lines.lock() {
            Ok(l) => l,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push(line.to_string());
    }
}

// ============================================================================
// Event Visitor
// ============================================================================

/// Extracts message and structured fields from a tracing event.
#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        let rendered = strip_debug_quotes(&rendered);
        if field.name() == "message" {
            self.message = Some(rendered);
        } else {
            self.fields.push((field.name().to_string(), rendered));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }
    }
}

/// Remove surrounding quotes from Debug-formatted strings.
fn strip_debug_quotes(s: &str) -> String {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

// ============================================================================
// PageLogLayer
// ============================================================================

/// A `tracing_subscriber::Layer` that writes one line per event to a
/// [`LogSink`].
pub struct PageLogLayer<K> {
    sink: K,
    config: LogConfig,
    max_level: LevelFilter,
}

impl<K: LogSink> PageLogLayer<K> {
    pub fn new(sink: K) -> Self {
        Self::with_config(sink, LogConfig::default())
    }

    pub fn with_config(sink: K, config: LogConfig) -> Self {
        Self {
            sink,
            config,
            max_level: LevelFilter::TRACE,
        }
    }

    /// Drop events more verbose than `max_level`.
    #[must_use]
    pub fn max_level(mut self, max_level: LevelFilter) -> Self {
        self.max_level = max_level;
        self
    }

    fn format_event(&self, event: &Event<'_>) -> String {
        let metadata = event.metadata();

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut line = String::new();
        if self.config.show_level {
            line.push_str(level_str(*metadata.level()));
            line.push(' ');
        }
        if self.config.show_target {
            let _ = write!(line, "{}: ", metadata.target());
        }
        line.push_str(visitor.message.as_deref().unwrap_or_default());
        if self.config.show_fields {
            for (k, v) in &visitor.fields {
                let _ = write!(line, " {k}={v}");
            }
        }
        line
    }
}

impl<S, K> Layer<S> for PageLogLayer<K>
where
    S: Subscriber,
    K: LogSink + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        if level > self.max_level {
            return;
        }
        self.sink.write_line(level, &self.format_event(event));
    }
}
