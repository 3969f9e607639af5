// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Id is required")]
    EmptyId,

    #[error("CustomerId is required")]
    EmptyCustomerId,

    #[error("Items are required")]
    EmptyItems,

    #[error("Quantity must be greater than zero")]
    InvalidQuantity,

    #[error("Price must be greater than zero")]
    InvalidPrice,
}
