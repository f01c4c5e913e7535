use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use photoreport_core::{DomainError, DomainResult, Entity};

/// Id-keyed record store.
pub trait EntityStore<E: Entity>: Send + Sync {
    fn get(&self, id: &E::Id) -> DomainResult<Option<E>>;
    /// Fails with `Conflict` if the id is taken.
    fn insert(&self, entity: E) -> DomainResult<()>;
    /// Insert or overwrite.
    fn upsert(&self, entity: E) -> DomainResult<()>;
    /// Returns the removed record, if any.
    fn remove(&self, id: &E::Id) -> DomainResult<Option<E>>;
    fn list(&self) -> DomainResult<Vec<E>>;

    fn count(&self) -> DomainResult<usize> {
        Ok(self.list()?.len())
    }
}

impl<E, S> EntityStore<E> for Arc<S>
where
    E: Entity,
    S: EntityStore<E> + ?Sized,
{
    fn get(&self, id: &E::Id) -> DomainResult<Option<E>> {
        (**self).get(id)
    }

    fn insert(&self, entity: E) -> DomainResult<()> {
        (**self).insert(entity)
    }

    fn upsert(&self, entity: E) -> DomainResult<()> {
        (**self).upsert(entity)
    }

    fn remove(&self, id: &E::Id) -> DomainResult<Option<E>> {
        (**self).remove(id)
    }

    fn list(&self) -> DomainResult<Vec<E>> {
        (**self).list()
    }

    fn count(&self) -> DomainResult<usize> {
        (**self).count()
    }
}

/// In-memory store for tests/dev.
#[derive(Debug)]
pub struct InMemoryEntityStore<E: Entity> {
    inner: RwLock<HashMap<E::Id, E>>,
}

impl<E: Entity> InMemoryEntityStore<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Run `f` against the map under a single write lock, so checks made
    /// inside `f` still hold when it writes.
    pub fn write_with<T>(&self, f: impl FnOnce(&mut HashMap<E::Id, E>) -> DomainResult<T>) -> DomainResult<T> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        f(&mut map)
    }
}

impl<E: Entity> Default for InMemoryEntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> DomainError {
    DomainError::unavailable("store lock poisoned")
}

impl<E> EntityStore<E> for InMemoryEntityStore<E>
where
    E: Entity + Clone + Send + Sync + 'static,
    E::Id: Send + Sync,
{
    fn get(&self, id: &E::Id) -> DomainResult<Option<E>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(id).cloned())
    }

    fn insert(&self, entity: E) -> DomainResult<()> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        if map.contains_key(entity.id()) {
            return Err(DomainError::conflict(format!("duplicate id {:?}", entity.id())));
        }
        map.insert(entity.id().clone(), entity);
        Ok(())
    }

    fn upsert(&self, entity: E) -> DomainResult<()> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(entity.id().clone(), entity);
        Ok(())
    }

    fn remove(&self, id: &E::Id) -> DomainResult<Option<E>> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        Ok(map.remove(id))
    }

    fn list(&self) -> DomainResult<Vec<E>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().cloned().collect())
    }

    fn count(&self) -> DomainResult<usize> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.len())
    }
}
