// ============================================================================
// Event Dispatch Infrastructure
// ============================================================================
//
// Generic, reusable publish/subscribe for domain events.
// Domain-specific events and handlers are in src/domain/
//
// ============================================================================

// Core abstractions (GENERIC - works with any event type)
mod core;
mod dispatcher;

pub use self::core::*;
pub use self::dispatcher::*;
