// ============================================================================
// Repositories
// ============================================================================
//
// Storage contract for domain entities plus an in-memory implementation.
// Entities are keyed by their string id.
//
// ============================================================================

mod memory;

pub use memory::InMemoryRepository;

use async_trait::async_trait;

/// Anything a repository can store
pub trait Entity: Clone + Send + Sync + 'static {
    /// Entity name used in error messages, e.g. "Customer"
    const KIND: &'static str;

    fn id(&self) -> &str;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{kind} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} {id} already exists")]
    AlreadyExists { kind: &'static str, id: String },
}

#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn create(&self, entity: &T) -> Result<(), RepositoryError>;

    async fn update(&self, entity: &T) -> Result<(), RepositoryError>;

    async fn find(&self, id: &str) -> Result<T, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<T>, RepositoryError>;
}
