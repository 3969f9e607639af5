// ============================================================================
// Customer Domain - Business Logic for the Customer Entity
// ============================================================================
//
// This module contains ALL Customer-specific code:
// - Value objects (Address)
// - Entity (Customer)
// - Events (CustomerCreated, CustomerAddressChanged)
// - Errors (CustomerError, AddressError)
// - Event handlers (logging)
// - Service (CustomerService)
//
// ============================================================================

pub mod value_objects;
pub mod entity;
pub mod events;
pub mod errors;
pub mod handlers;
pub mod service;

// Re-export for convenience
pub use value_objects::*;
pub use entity::*;
pub use events::*;
pub use errors::*;
pub use handlers::*;
pub use service::*;
