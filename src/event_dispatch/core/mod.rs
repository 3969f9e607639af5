// ============================================================================
// Event Dispatch Core - Generic Abstractions
// ============================================================================
//
// Key Principles:
// - No domain-specific code (no Customer, Product, Order, etc.)
// - Generic over the event type
// - Events carry their own routing key
//
// ============================================================================

pub mod event;
pub mod handler;

// Re-export core types for convenience
pub use event::{DomainEvent, EventEnvelope};
pub use handler::EventHandler;
