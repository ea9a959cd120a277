//! Capture `tracing` events for assertions.
//!
//! # Examples
//!
//! ```
//! use config_binder_test_helpers::capture::capture_events;
//!
//! let ((), events) = capture_events(|| tracing::warn!(key = "Port", "skipped"));
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].field("key"), Some("Port"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    /// Severity of the event.
    pub level: Level,
    /// The formatted message, empty when the event had none.
    pub message: String,
    /// Every other field, rendered as text.
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    /// Rendered value of the field named `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Whether the event was logged at `WARN`.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.level == Level::WARN
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: BTreeMap<String, String>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.insert(field.name().to_owned(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_owned());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }
}

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events.lock().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

/// Run `f` with a subscriber that records every event, returning the
/// closure's output and the events in emission order.
///
/// The subscriber is scoped to the current thread for the duration of `f`.
pub fn capture_events<T>(f: impl FnOnce() -> T) -> (T, Vec<CapturedEvent>) {
    let layer = CaptureLayer::default();
    let events = Arc::clone(&layer.events);
    let subscriber = Registry::default().with(layer);
    let output = tracing::subscriber::with_default(subscriber, f);
    let captured = std::mem::take(&mut *events.lock());
    (output, captured)
}

/// Only the `WARN` events recorded while `f` ran.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<CapturedEvent>) {
    let (output, events) = capture_events(f);
    (
        output,
        events.into_iter().filter(CapturedEvent::is_warning).collect(),
    )
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};

    use super::*;

    #[test]
    fn records_message_and_fields() -> Result<()> {
        let (value, events) = capture_events(|| {
            tracing::warn!(key = "Port", size = 3_u64, "skipped entry");
            tracing::debug!(path = "Root", "bound");
            7
        });
        ensure!(value == 7);
        ensure!(events.len() == 2, "{events:?}");
        let first = events.first();
        ensure!(first.is_some_and(|e| e.message == "skipped entry" && e.is_warning()));
        ensure!(first.and_then(|e| e.field("key")) == Some("Port"));
        ensure!(first.and_then(|e| e.field("size")) == Some("3"));
        Ok(())
    }

    #[test]
    fn warnings_only_filters_lower_levels() -> Result<()> {
        let ((), events) = capture_warnings(|| {
            tracing::info!("ignored");
            tracing::warn!("kept");
        });
        ensure!(events.len() == 1);
        ensure!(events.first().is_some_and(|e| e.message == "kept"));
        Ok(())
    }
}
