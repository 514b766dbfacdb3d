#![forbid(unsafe_code)]

//! Tracing output routed to the browser console.

use sambut_core::logging::{LogSink, PageLogLayer, parse_level_filter};
use tracing::Level;
use tracing_subscriber::prelude::*;
use wasm_bindgen::JsValue;
use web_sys::console;

/// Writes each line with the `console` method matching its level.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write_line(&self, level: Level, line: &str) {
        let line = JsValue::from_str(line);
        match level {
            Level::ERROR => console::error_1(&line),
            Level::WARN => console::warn_1(&line),
            Level::INFO => console::info_1(&line),
            Level::DEBUG | Level::TRACE => console::debug_1(&line),
        }
    }
}

/// Install the console layer as the global subscriber.
///
/// A second call (another mount in the same document) keeps the first
/// subscriber.
pub(crate) fn install(level: &str) {
    let layer = PageLogLayer::new(ConsoleSink).max_level(parse_level_filter(level));
    let subscriber = tracing_subscriber::registry().with(layer);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("console logging already installed");
    }
}
