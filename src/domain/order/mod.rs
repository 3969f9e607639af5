// ============================================================================
// Order Domain - Order Entity and its Items
// ============================================================================
//
// - Value objects (OrderItem)
// - Entity (Order)
// - Errors (OrderError)
//
// Orders publish no events.
//
// ============================================================================

pub mod value_objects;
pub mod entity;
pub mod errors;

// Re-export for convenience
pub use value_objects::*;
pub use entity::*;
pub use errors::*;
