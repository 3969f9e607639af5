use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

// ============================================================================
// Metrics Module - Prometheus metrics for event dispatch
// ============================================================================
//
// Provides metrics for:
// - Events notified (with and without registered handlers)
// - Handler invocations and failures
// - Notify latency
// - Number of registered handlers
//
// `render()` produces the Prometheus text exposition format.
// ============================================================================

/// Central metrics registry for event dispatch
pub struct Metrics {
    registry: Registry,

    // Notify Metrics
    pub events_notified: IntCounterVec,
    pub events_unhandled: IntCounterVec,
    pub notify_duration: HistogramVec,

    // Handler Metrics
    pub handler_invocations: IntCounterVec,
    pub handler_failures: IntCounterVec,

    // Registry Metrics
    pub registered_handlers: IntGauge,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let events_notified = IntCounterVec::new(
            Opts::new("events_notified_total", "Total events passed to notify"),
            &["event_type"],
        )?;
        registry.register(Box::new(events_notified.clone()))?;

        let events_unhandled = IntCounterVec::new(
            Opts::new("events_unhandled_total", "Events notified with no handler list"),
            &["event_type"],
        )?;
        registry.register(Box::new(events_unhandled.clone()))?;

        let notify_duration = HistogramVec::new(
            HistogramOpts::new("notify_duration_seconds", "Time spent delivering one event")
                .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
            &["event_type"],
        )?;
        registry.register(Box::new(notify_duration.clone()))?;

        let handler_invocations = IntCounterVec::new(
            Opts::new("handler_invocations_total", "Total handler invocations"),
            &["event_type"],
        )?;
        registry.register(Box::new(handler_invocations.clone()))?;

        let handler_failures = IntCounterVec::new(
            Opts::new("handler_failures_total", "Total handler invocations that returned an error"),
            &["event_type"],
        )?;
        registry.register(Box::new(handler_failures.clone()))?;

        let registered_handlers = IntGauge::new(
            "registered_handlers",
            "Handlers currently registered across all event types",
        )?;
        registry.register(Box::new(registered_handlers.clone()))?;

        Ok(Self {
            registry,
            events_notified,
            events_unhandled,
            notify_duration,
            handler_invocations,
            handler_failures,
            registered_handlers,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record one notify call
    pub fn record_notify(&self, event_type: &str, duration_secs: f64, handled: bool) {
        self.events_notified.with_label_values(&[event_type]).inc();
        if !handled {
            self.events_unhandled.with_label_values(&[event_type]).inc();
        }
        self.notify_duration.with_label_values(&[event_type]).observe(duration_secs);
    }

    /// Helper to record one handler call
    pub fn record_handler(&self, event_type: &str, success: bool) {
        self.handler_invocations.with_label_values(&[event_type]).inc();
        if !success {
            self.handler_failures.with_label_values(&[event_type]).inc();
        }
    }

    pub fn set_registered_handlers(&self, count: usize) {
        self.registered_handlers.set(count as i64);
    }

    /// Encode all metrics in the Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
