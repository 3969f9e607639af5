use super::event::{DomainEvent, EventEnvelope};

// ============================================================================
// Event Handler Trait
// ============================================================================
//
// A handler is a single `handle(event)` capability. Side effects belong
// entirely to the handler; the dispatcher only holds a shared reference.
//
// ============================================================================

/// Handler for events of type `E`
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    /// Process one event. Errors are reported back to the dispatcher.
    fn handle(&self, event: &EventEnvelope<E>) -> anyhow::Result<()>;

    /// Name used in logs and dispatch errors
    fn name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        // Generic arguments carry their own paths, strip them first
        let path = full.split('<').next().unwrap_or(full);
        path.rsplit("::").next().unwrap_or("EventHandler")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::marker::PhantomData;

    #[derive(Serialize, Deserialize, Clone, Debug)]
    struct Ping;

    impl DomainEvent for Ping {
        fn event_name(&self) -> &'static str { "Ping" }
    }

    struct Plain;

    impl EventHandler<Ping> for Plain {
        fn handle(&self, _event: &EventEnvelope<Ping>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct Wrapping<T>(PhantomData<T>);

    impl<T: Send + Sync> EventHandler<Ping> for Wrapping<T> {
        fn handle(&self, _event: &EventEnvelope<Ping>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_name_is_type_name() {
        assert_eq!(Plain.name(), "Plain");
    }

    #[test]
    fn test_default_name_ignores_generic_arguments() {
        let handler = Wrapping::<std::collections::HashMap<String, Vec<u8>>>(PhantomData);
        assert_eq!(handler.name(), "Wrapping");

        let shared: std::sync::Arc<dyn EventHandler<Ping>> =
            std::sync::Arc::new(Wrapping::<Plain>(PhantomData));
        assert_eq!(shared.name(), "Wrapping");
    }
}
