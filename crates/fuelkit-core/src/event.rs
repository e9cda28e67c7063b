//! Event helper: named events with ordered callbacks.

use serde_json::Value;
use std::collections::BTreeMap;

/// Event callback. Returning `None` contributes nothing to the result.
pub type Callback = Box<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// Event fired once when the application finishes.
pub const SHUTDOWN: &str = "shutdown";

/// How callback results are returned from [`EventBus::trigger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnType {
    Array,
    Json,
    #[default]
    String,
    None,
}

/// Combined callback results.
#[derive(Debug, Clone, PartialEq)]
pub enum Triggered {
    Array(Vec<Value>),
    Json(String),
    String(String),
    None,
}

/// Registry of event callbacks.
#[derive(Default)]
pub struct EventBus {
    events: BTreeMap<String, Vec<Callback>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `callback` to the callbacks of `event`.
    pub fn register<F>(&mut self, event: &str, callback: F)
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.events
            .entry(event.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Drops every callback of `event`. Returns `true` if there were any.
    pub fn unregister(&mut self, event: &str) -> bool {
        self.events.remove(event).is_some()
    }

    pub fn has_events(&self, event: &str) -> bool {
        self.events.get(event).is_some_and(|c| !c.is_empty())
    }

    /// Calls every callback of `event` with `data` in registration order.
    ///
    /// `String` concatenates the results (strings verbatim, other values as
    /// JSON), `Json` encodes them as a JSON array.
    pub fn trigger(&self, event: &str, data: &Value, return_type: ReturnType) -> Triggered {
        let results: Vec<Value> = self
            .events
            .get(event)
            .map(|callbacks| callbacks.iter().filter_map(|cb| cb(data)).collect())
            .unwrap_or_default();
        tracing::debug!(event, results = results.len(), "event triggered");

        match return_type {
            ReturnType::Array => Triggered::Array(results),
            ReturnType::Json => Triggered::Json(Value::Array(results).to_string()),
            ReturnType::String => Triggered::String(
                results
                    .iter()
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            ReturnType::None => Triggered::None,
        }
    }

    /// Triggers [`SHUTDOWN`] and discards the results.
    pub fn shutdown(&self) {
        self.trigger(SHUTDOWN, &Value::Null, ReturnType::None);
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: BTreeMap<&str, usize> = self
            .events
            .iter()
            .map(|(name, callbacks)| (name.as_str(), callbacks.len()))
            .collect();
        f.debug_struct("EventBus").field("events", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn bus() -> EventBus {
        let mut bus = EventBus::new();
        bus.register("greet", |data| Some(json!(format!("hi {}", data["name"].as_str()?))));
        bus.register("greet", |_| None);
        bus.register("greet", |_| Some(json!(42)));
        bus
    }

    #[test]
    fn test_string_return_concatenates() {
        let out = bus().trigger("greet", &json!({"name": "ann"}), ReturnType::String);
        assert_eq!(out, Triggered::String("hi ann42".into()));
    }

    #[test]
    fn test_array_and_json_returns() {
        let bus = bus();
        let data = json!({"name": "bo"});
        assert_eq!(
            bus.trigger("greet", &data, ReturnType::Array),
            Triggered::Array(vec![json!("hi bo"), json!(42)])
        );
        assert_eq!(
            bus.trigger("greet", &data, ReturnType::Json),
            Triggered::Json("[\"hi bo\",42]".into())
        );
    }

    #[test]
    fn test_unknown_event_yields_empty() {
        let bus = EventBus::new();
        assert!(!bus.has_events("nothing"));
        assert_eq!(
            bus.trigger("nothing", &Value::Null, ReturnType::default()),
            Triggered::String(String::new())
        );
    }

    #[test]
    fn test_shutdown_runs_callbacks() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();
        let counter = hits.clone();
        bus.register(SHUTDOWN, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            None
        });

        bus.shutdown();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(bus.unregister(SHUTDOWN));
        assert!(!bus.has_events(SHUTDOWN));
    }
}
