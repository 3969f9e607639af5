// ============================================================================
// Dispatch Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Event type name cannot be empty")]
    EmptyEventType,

    #[error("Handler {handler} failed to process {event_type}: {source}")]
    HandlerFailed {
        event_type: String,
        handler: &'static str,
        #[source]
        source: anyhow::Error,
    },
}
