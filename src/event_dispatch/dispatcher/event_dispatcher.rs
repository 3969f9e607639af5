use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;

use crate::event_dispatch::core::{DomainEvent, EventEnvelope, EventHandler};
use crate::metrics::Metrics;

use super::config::{DispatcherConfig, FailurePolicy};
use super::errors::DispatchError;

// ============================================================================
// Event Dispatcher - In-process Publish/Subscribe
// ============================================================================
//
// Maps an event type name to an ordered list of handlers.
//
// - register appends, duplicates are kept
// - unregister removes the first pointer-identical handler only
// - notify calls every handler for the event's type, in order, on the
//   caller's thread
//
// The list for an event type is cloned under the read lock and the lock is
// released before any handler runs, so handlers may register or unregister
// while being notified.
//
// ============================================================================

pub type SharedHandler<E> = Arc<dyn EventHandler<E>>;

/// Outcome of a `notify` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchSummary {
    /// Handlers whose `handle` was called
    pub invoked: usize,
    /// Invoked handlers that returned an error (only non-zero under `Continue`)
    pub failed: usize,
}

pub struct EventDispatcher<E: DomainEvent> {
    handlers: RwLock<HashMap<String, Vec<SharedHandler<E>>>>,
    config: DispatcherConfig,
    metrics: Option<Arc<Metrics>>,
}

impl<E: DomainEvent> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DomainEvent> EventDispatcher<E> {
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Append `handler` to the list for `event_type`.
    ///
    /// Takes the shared trait object, so `Arc<ConcreteHandler>` coerces at the
    /// call site and a handler read back from `handlers_for` can be registered
    /// again under another key.
    pub fn register(&self, event_type: &str, handler: SharedHandler<E>) -> Result<(), DispatchError> {
        if event_type.is_empty() {
            return Err(DispatchError::EmptyEventType);
        }

        let name = handler.name();
        let mut handlers = self.handlers.write();
        let list = handlers.entry(event_type.to_string()).or_default();
        list.push(handler);
        let position = list.len();

        self.update_registered_gauge(&handlers);
        drop(handlers);

        tracing::debug!(
            event_type = event_type,
            handler = name,
            position = position,
            "Registered event handler"
        );

        Ok(())
    }

    /// Remove the first registration of this exact handler instance.
    ///
    /// Returns `true` if a handler was removed. Unknown event types are left
    /// absent and an emptied list stays registered under its key.
    pub fn unregister<H>(&self, event_type: &str, handler: &Arc<H>) -> bool
    where
        H: ?Sized,
    {
        let target = Arc::as_ptr(handler).cast::<()>();

        let mut handlers = self.handlers.write();
        let Some(list) = handlers.get_mut(event_type) else {
            tracing::debug!(event_type = event_type, "No handlers registered, nothing to unregister");
            return false;
        };

        let Some(index) = list
            .iter()
            .position(|registered| Arc::as_ptr(registered).cast::<()>() == target)
        else {
            tracing::debug!(event_type = event_type, "Handler not registered for event type");
            return false;
        };

        let removed = list.remove(index);
        self.update_registered_gauge(&handlers);
        drop(handlers);

        tracing::debug!(
            event_type = event_type,
            handler = removed.name(),
            "Unregistered event handler"
        );

        true
    }

    /// Drop every registration for every event type
    pub fn unregister_all(&self) {
        let mut handlers = self.handlers.write();
        let cleared = handlers.len();
        handlers.clear();
        self.update_registered_gauge(&handlers);
        drop(handlers);

        tracing::debug!(event_types = cleared, "Unregistered all event handlers");
    }

    /// Deliver `event` to every handler registered for its type, in order.
    pub fn notify(&self, event: &EventEnvelope<E>) -> Result<DispatchSummary, DispatchError> {
        let event_type = event.event_type.as_str();
        let started = Instant::now();

        let snapshot = self.handlers.read().get(event_type).cloned();

        let Some(handlers) = snapshot else {
            tracing::debug!(event_type = event_type, "No handlers registered for event type");
            self.record_notify(event_type, started, false);
            return Ok(DispatchSummary::default());
        };

        let mut summary = DispatchSummary::default();

        for handler in &handlers {
            summary.invoked += 1;

            match handler.handle(event) {
                Ok(()) => {
                    self.record_handler(event_type, true);
                }
                Err(error) => {
                    self.record_handler(event_type, false);

                    match self.config.failure_policy {
                        FailurePolicy::Abort => {
                            tracing::error!(
                                event_type = event_type,
                                event_id = %event.event_id,
                                handler = handler.name(),
                                error = %error,
                                "Handler failed, aborting delivery"
                            );
                            self.record_notify(event_type, started, true);
                            return Err(DispatchError::HandlerFailed {
                                event_type: event_type.to_string(),
                                handler: handler.name(),
                                source: error,
                            });
                        }
                        FailurePolicy::Continue => {
                            tracing::warn!(
                                event_type = event_type,
                                event_id = %event.event_id,
                                handler = handler.name(),
                                error = %error,
                                "Handler failed, continuing delivery"
                            );
                            summary.failed += 1;
                        }
                    }
                }
            }
        }

        self.record_notify(event_type, started, true);

        tracing::debug!(
            event_type = event_type,
            event_id = %event.event_id,
            invoked = summary.invoked,
            failed = summary.failed,
            "Event delivered"
        );

        Ok(summary)
    }

    /// Copy of the whole registry as it is right now
    pub fn event_handlers(&self) -> HashMap<String, Vec<SharedHandler<E>>> {
        self.handlers.read().clone()
    }

    /// Copy of the handler list for one event type, `None` if it was never registered
    pub fn handlers_for(&self, event_type: &str) -> Option<Vec<SharedHandler<E>>> {
        self.handlers.read().get(event_type).cloned()
    }

    /// Whether `handler` is currently registered under `event_type`
    pub fn is_registered<H: ?Sized>(&self, event_type: &str, handler: &Arc<H>) -> bool {
        let target = Arc::as_ptr(handler).cast::<()>();
        self.handlers
            .read()
            .get(event_type)
            .is_some_and(|list| list.iter().any(|h| Arc::as_ptr(h).cast::<()>() == target))
    }

    fn update_registered_gauge(&self, handlers: &HashMap<String, Vec<SharedHandler<E>>>) {
        if let Some(metrics) = &self.metrics {
            metrics.set_registered_handlers(handlers.values().map(Vec::len).sum());
        }
    }

    fn record_notify(&self, event_type: &str, started: Instant, handled: bool) {
        if let Some(metrics) = &self.metrics {
            metrics.record_notify(event_type, started.elapsed().as_secs_f64(), handled);
        }
    }

    fn record_handler(&self, event_type: &str, success: bool) {
        if let Some(metrics) = &self.metrics {
            metrics.record_handler(event_type, success);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    enum TestEvent {
        X(u32),
        Y(u32),
    }

    impl DomainEvent for TestEvent {
        fn event_name(&self) -> &'static str {
            match self {
                TestEvent::X(_) => "X",
                TestEvent::Y(_) => "Y",
            }
        }
    }

    type CallLog = Arc<Mutex<Vec<(String, uuid::Uuid)>>>;

    /// Records its label and the event id it was given into a shared log
    struct Recorder {
        label: &'static str,
        log: CallLog,
    }

    impl Recorder {
        fn new(label: &'static str, log: &CallLog) -> Arc<Self> {
            Arc::new(Self { label, log: log.clone() })
        }
    }

    impl EventHandler<TestEvent> for Recorder {
        fn handle(&self, event: &EventEnvelope<TestEvent>) -> anyhow::Result<()> {
            self.log.lock().push((self.label.to_string(), event.event_id));
            Ok(())
        }
    }

    struct Failing;

    impl EventHandler<TestEvent> for Failing {
        fn handle(&self, _event: &EventEnvelope<TestEvent>) -> anyhow::Result<()> {
            anyhow::bail!("boom")
        }
    }

    fn labels(log: &CallLog) -> Vec<String> {
        log.lock().iter().map(|(label, _)| label.clone()).collect()
    }

    #[test]
    fn test_register_appends_handler() {
        let dispatcher = EventDispatcher::<TestEvent>::new();
        let log = CallLog::default();
        let a = Recorder::new("a", &log);

        dispatcher.register("X", a.clone()).unwrap();

        let list = dispatcher.handlers_for("X").unwrap();
        assert_eq!(list.len(), 1);
        assert!(dispatcher.is_registered("X", &a));
    }

    #[test]
    fn test_register_keeps_duplicates_in_order() {
        let dispatcher = EventDispatcher::<TestEvent>::new();
        let log = CallLog::default();
        let a = Recorder::new("a", &log);
        let b = Recorder::new("b", &log);

        dispatcher.register("X", a.clone()).unwrap();
        dispatcher.register("X", b.clone()).unwrap();
        dispatcher.register("X", a.clone()).unwrap();

        let list = dispatcher.handlers_for("X").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(Arc::as_ptr(&list[2]).cast::<()>(), Arc::as_ptr(&a).cast::<()>());

        dispatcher.notify(&EventEnvelope::new(TestEvent::X(1))).unwrap();
        assert_eq!(labels(&log), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_register_rejects_empty_event_type() {
        let dispatcher = EventDispatcher::<TestEvent>::new();
        let log = CallLog::default();

        let result = dispatcher.register("", Recorder::new("a", &log));

        assert!(matches!(result, Err(DispatchError::EmptyEventType)));
        assert!(dispatcher.event_handlers().is_empty());
    }

    #[test]
    fn test_unregister_leaves_empty_list() {
        let dispatcher = EventDispatcher::<TestEvent>::new();
        let log = CallLog::default();
        let a = Recorder::new("a", &log);

        dispatcher.register("X", a.clone()).unwrap();
        assert!(dispatcher.unregister("X", &a));

        let list = dispatcher.handlers_for("X").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_unregister_unknown_type_creates_nothing() {
        let dispatcher = EventDispatcher::<TestEvent>::new();
        let log = CallLog::default();
        let a = Recorder::new("a", &log);

        assert!(!dispatcher.unregister("X", &a));
        assert!(dispatcher.handlers_for("X").is_none());
        assert!(dispatcher.event_handlers().is_empty());
    }

    #[test]
    fn test_unregister_missing_handler_is_noop() {
        let dispatcher = EventDispatcher::<TestEvent>::new();
        let log = CallLog::default();
        let a = Recorder::new("a", &log);
        let b = Recorder::new("b", &log);

        dispatcher.register("X", a.clone()).unwrap();
        assert!(!dispatcher.unregister("X", &b));
        assert_eq!(dispatcher.handlers_for("X").unwrap().len(), 1);
    }

    #[test]
    fn test_unregister_removes_one_occurrence_and_keeps_order() {
        let dispatcher = EventDispatcher::<TestEvent>::new();
        let log = CallLog::default();
        let a = Recorder::new("a", &log);
        let b = Recorder::new("b", &log);
        let c = Recorder::new("c", &log);

        for handler in [&a, &b, &a, &c] {
            dispatcher.register("X", handler.clone()).unwrap();
        }

        assert!(dispatcher.unregister("X", &a));
        dispatcher.notify(&EventEnvelope::new(TestEvent::X(1))).unwrap();

        assert_eq!(labels(&log), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_unregister_uses_identity_not_equality() {
        let dispatcher = EventDispatcher::<TestEvent>::new();
        let log = CallLog::default();
        let first = Recorder::new("same", &log);
        let second = Recorder::new("same", &log);

        dispatcher.register("X", first.clone()).unwrap();
        dispatcher.register("X", second.clone()).unwrap();

        assert!(dispatcher.unregister("X", &second));
        assert!(dispatcher.is_registered("X", &first));
        assert!(!dispatcher.is_registered("X", &second));
    }

    #[test]
    fn test_unregister_accepts_trait_object() {
        let dispatcher = EventDispatcher::<TestEvent>::new();
        let log = CallLog::default();
        let a = Recorder::new("a", &log);
        dispatcher.register("X", a).unwrap();

        let stored = dispatcher.handlers_for("X").unwrap().remove(0);
        assert!(dispatcher.unregister("X", &stored));
        assert!(dispatcher.handlers_for("X").unwrap().is_empty());
    }

    #[test]
    fn test_register_accepts_stored_trait_object() {
        let dispatcher = EventDispatcher::<TestEvent>::new();
        let log = CallLog::default();
        let a = Recorder::new("a", &log);
        dispatcher.register("X", a.clone()).unwrap();

        let stored: SharedHandler<TestEvent> = dispatcher.handlers_for("X").unwrap().remove(0);
        dispatcher.register("Y", stored.clone()).unwrap();
        assert!(dispatcher.unregister("X", &stored));

        let moved = dispatcher.handlers_for("Y").unwrap();
        assert_eq!(moved.len(), 1);
        assert_eq!(Arc::as_ptr(&moved[0]).cast::<()>(), Arc::as_ptr(&a).cast::<()>());
        assert!(dispatcher.handlers_for("X").unwrap().is_empty());

        dispatcher.notify(&EventEnvelope::new(TestEvent::Y(1))).unwrap();
        assert_eq!(labels(&log), vec!["a"]);
    }

    #[test]
    fn test_unregister_all_removes_every_key() {
        let dispatcher = EventDispatcher::<TestEvent>::new();
        let log = CallLog::default();
        let a = Recorder::new("a", &log);

        dispatcher.register("X", a.clone()).unwrap();
        dispatcher.register("Y", a.clone()).unwrap();
        dispatcher.unregister_all();

        assert!(dispatcher.event_handlers().is_empty());
        assert!(dispatcher.handlers_for("X").is_none());
        assert!(dispatcher.handlers_for("Y").is_none());
    }

    #[test]
    fn test_notify_without_handlers_is_noop() {
        let dispatcher = EventDispatcher::<TestEvent>::new();

        let summary = dispatcher.notify(&EventEnvelope::new(TestEvent::X(1))).unwrap();

        assert_eq!(summary, DispatchSummary::default());
        assert!(dispatcher.handlers_for("X").is_none());
    }

    #[test]
    fn test_notify_passes_same_event_to_every_handler() {
        let dispatcher = EventDispatcher::<TestEvent>::new();
        let log = CallLog::default();
        dispatcher.register("X", Recorder::new("a", &log)).unwrap();
        dispatcher.register("X", Recorder::new("b", &log)).unwrap();

        let event = EventEnvelope::new(TestEvent::X(7));
        let summary = dispatcher.notify(&event).unwrap();

        assert_eq!(summary.invoked, 2);
        assert!(log.lock().iter().all(|(_, id)| *id == event.event_id));
    }

    #[test]
    fn test_notify_in_order_then_after_unregister() {
        let dispatcher = EventDispatcher::<TestEvent>::new();
        let log = CallLog::default();
        let a = Recorder::new("a", &log);
        let b = Recorder::new("b", &log);

        dispatcher.register("X", a.clone()).unwrap();
        dispatcher.register("X", b.clone()).unwrap();
        dispatcher.notify(&EventEnvelope::new(TestEvent::X(1))).unwrap();
        assert_eq!(labels(&log), vec!["a", "b"]);

        log.lock().clear();
        dispatcher.unregister("X", &a);
        dispatcher.notify(&EventEnvelope::new(TestEvent::X(2))).unwrap();
        assert_eq!(labels(&log), vec!["b"]);
    }

    #[test]
    fn test_notify_only_fires_matching_type() {
        let dispatcher = EventDispatcher::<TestEvent>::new();
        let log = CallLog::default();
        let a = Recorder::new("a", &log);

        dispatcher.register("X", a.clone()).unwrap();
        dispatcher.register("Y", a.clone()).unwrap();

        let summary = dispatcher.notify(&EventEnvelope::new(TestEvent::Y(1))).unwrap();

        assert_eq!(summary.invoked, 1);
        assert_eq!(labels(&log), vec!["a"]);
        assert!(dispatcher.is_registered("X", &a));
        assert_eq!(dispatcher.handlers_for("X").unwrap().len(), 1);
    }

    #[test]
    fn test_abort_policy_stops_at_first_failure() {
        let dispatcher = EventDispatcher::<TestEvent>::with_config(DispatcherConfig::strict());
        let log = CallLog::default();
        dispatcher.register("X", Recorder::new("a", &log)).unwrap();
        dispatcher.register("X", Arc::new(Failing)).unwrap();
        dispatcher.register("X", Recorder::new("c", &log)).unwrap();

        let result = dispatcher.notify(&EventEnvelope::new(TestEvent::X(1)));

        match result {
            Err(DispatchError::HandlerFailed { event_type, handler, .. }) => {
                assert_eq!(event_type, "X");
                assert_eq!(handler, "Failing");
            }
            other => panic!("expected handler failure, got {other:?}"),
        }
        assert_eq!(labels(&log), vec!["a"]);
    }

    #[test]
    fn test_continue_policy_delivers_to_remaining_handlers() {
        let dispatcher = EventDispatcher::<TestEvent>::with_config(DispatcherConfig::lenient());
        let log = CallLog::default();
        dispatcher.register("X", Recorder::new("a", &log)).unwrap();
        dispatcher.register("X", Arc::new(Failing)).unwrap();
        dispatcher.register("X", Recorder::new("c", &log)).unwrap();

        let summary = dispatcher.notify(&EventEnvelope::new(TestEvent::X(1))).unwrap();

        assert_eq!(summary, DispatchSummary { invoked: 3, failed: 1 });
        assert_eq!(labels(&log), vec!["a", "c"]);
    }

    /// Registers another handler for the same type while being notified
    struct SelfExtending {
        dispatcher: Arc<EventDispatcher<TestEvent>>,
        extra: Arc<Recorder>,
    }

    impl EventHandler<TestEvent> for SelfExtending {
        fn handle(&self, event: &EventEnvelope<TestEvent>) -> anyhow::Result<()> {
            self.dispatcher.register(&event.event_type, self.extra.clone())?;
            Ok(())
        }
    }

    #[test]
    fn test_register_during_notify_does_not_deadlock() {
        let dispatcher = Arc::new(EventDispatcher::<TestEvent>::new());
        let log = CallLog::default();
        let extra = Recorder::new("extra", &log);

        dispatcher
            .register(
                "X",
                Arc::new(SelfExtending {
                    dispatcher: dispatcher.clone(),
                    extra: extra.clone(),
                }),
            )
            .unwrap();

        let summary = dispatcher.notify(&EventEnvelope::new(TestEvent::X(1))).unwrap();

        assert_eq!(summary.invoked, 1);
        assert!(log.lock().is_empty());
        assert!(dispatcher.is_registered("X", &extra));
    }

    #[test]
    fn test_metrics_are_recorded() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let dispatcher = EventDispatcher::<TestEvent>::new().with_metrics(metrics.clone());
        let log = CallLog::default();

        dispatcher.register("X", Recorder::new("a", &log)).unwrap();
        dispatcher.register("X", Recorder::new("b", &log)).unwrap();
        dispatcher.notify(&EventEnvelope::new(TestEvent::X(1))).unwrap();
        dispatcher.notify(&EventEnvelope::new(TestEvent::Y(1))).unwrap();

        assert_eq!(metrics.registered_handlers.get(), 2);
        assert_eq!(metrics.handler_invocations.with_label_values(&["X"]).get(), 2);
        assert_eq!(metrics.events_unhandled.with_label_values(&["Y"]).get(), 1);

        dispatcher.unregister_all();
        assert_eq!(metrics.registered_handlers.get(), 0);
    }

    #[test]
    fn test_dispatcher_is_shareable_across_threads() {
        let dispatcher = Arc::new(EventDispatcher::<TestEvent>::new());
        let log = CallLog::default();

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let dispatcher = dispatcher.clone();
                let log = log.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        dispatcher.register("X", Recorder::new("t", &log)).unwrap();
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(dispatcher.handlers_for("X").unwrap().len(), 100);
    }
}
