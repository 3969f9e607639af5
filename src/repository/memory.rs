use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{Entity, Repository, RepositoryError};

// ============================================================================
// In-memory Repository
// ============================================================================
//
// Keeps entities in insertion order; `find_all` returns them in that order.
// Entities are never removed, so stored positions stay valid.
//
// ============================================================================

struct Store<T> {
    positions: HashMap<String, usize>,
    entities: Vec<T>,
}

pub struct InMemoryRepository<T: Entity> {
    store: RwLock<Store<T>>,
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                positions: HashMap::new(),
                entities: Vec::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.store.read().entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn create(&self, entity: &T) -> Result<(), RepositoryError> {
        let mut store = self.store.write();
        if store.positions.contains_key(entity.id()) {
            return Err(RepositoryError::AlreadyExists {
                kind: T::KIND,
                id: entity.id().to_string(),
            });
        }

        let position = store.entities.len();
        store.positions.insert(entity.id().to_string(), position);
        store.entities.push(entity.clone());

        tracing::debug!(kind = T::KIND, id = entity.id(), "Entity created");
        Ok(())
    }

    async fn update(&self, entity: &T) -> Result<(), RepositoryError> {
        let mut store = self.store.write();
        let Some(&position) = store.positions.get(entity.id()) else {
            return Err(RepositoryError::NotFound {
                kind: T::KIND,
                id: entity.id().to_string(),
            });
        };

        store.entities[position] = entity.clone();

        tracing::debug!(kind = T::KIND, id = entity.id(), "Entity updated");
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<T, RepositoryError> {
        let store = self.store.read();
        store
            .positions
            .get(id)
            .map(|&position| store.entities[position].clone())
            .ok_or_else(|| RepositoryError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })
    }

    async fn find_all(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.store.read().entities.clone())
    }
}
