// ============================================================================
// Event Dispatcher
// ============================================================================
//
// Synchronous, in-memory routing of events to registered handlers.
//
// ============================================================================

mod config;
mod errors;
mod event_dispatcher;

pub use config::{DispatcherConfig, FailurePolicy};
pub use errors::DispatchError;
pub use event_dispatcher::{DispatchSummary, EventDispatcher, SharedHandler};
