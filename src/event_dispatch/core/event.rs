use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

// ============================================================================
// Event Envelope - Event Data + Dispatch Metadata
// ============================================================================
//
// Wraps a domain event with the metadata handlers may need.
// The event type name is taken from the event itself when the envelope is
// built, and is the key the dispatcher routes on.
//
// ============================================================================

/// Generic Event Envelope - wraps any domain event with metadata
///
/// Type Parameter:
/// - `E`: The domain event type (must implement DomainEvent trait)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EventEnvelope<E> {
    // Event Identity
    pub event_id: Uuid,

    // Routing key, e.g. "CustomerCreatedEvent"
    pub event_type: String,

    // Event Payload
    pub event_data: E,

    // Groups related events (optional, in-process only)
    pub correlation_id: Option<Uuid>,

    // Timing
    pub timestamp: DateTime<Utc>,

    // Additional Metadata
    pub metadata: HashMap<String, String>,
}

impl<E: DomainEvent> EventEnvelope<E> {
    pub fn new(event_data: E) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type: event_data.event_name().to_string(),
            event_data,
            correlation_id: None,
            timestamp: Utc::now(),
            metadata: HashMap::new(),
        }
    }
}

impl<E> EventEnvelope<E> {
    pub fn with_correlation(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

// ============================================================================
// Domain Event Trait
// ============================================================================

/// Generic Domain Event trait
///
/// Every event value names its own type. Event enums implement this with a
/// plain `match`, so the routing key never depends on runtime type names.
pub trait DomainEvent: Serialize + for<'de> Deserialize<'de> + Clone + std::fmt::Debug + Send + Sync + 'static {
    fn event_name(&self) -> &'static str;
}

// ============================================================================
// Tests
// ============================================================================
