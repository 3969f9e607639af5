// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each area has its own subdirectory with its entities, value objects,
// events, errors, handlers and services.
//
// This layer is separate from the generic event dispatch infrastructure.
//
// ============================================================================

pub mod customer;
pub mod events;
pub mod order;
pub mod product;

pub use events::{ShopEvent, ShopEventDispatcher};
