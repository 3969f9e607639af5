// ============================================================================
// Customer Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CustomerError {
    #[error("Id is required")]
    EmptyId,

    #[error("Name is required")]
    EmptyName,

    #[error("Address is mandatory to activate a customer")]
    MissingAddress,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Street is required")]
    EmptyStreet,

    #[error("Number is required")]
    MissingNumber,

    #[error("Zip is required")]
    EmptyZip,

    #[error("City is required")]
    EmptyCity,
}
