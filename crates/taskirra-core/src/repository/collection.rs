//! JSON Collection Repository
//!
//! Keeps an entity array in memory and mirrors the whole array to one
//! storage key after every change. There is no diffing: each write is a
//! full replacement.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::storage::{load_json_or, save_json, KeyValueStorage};
use super::traits::Repository;
use crate::domain::{DomainError, DomainResult, Entity, Project, Task};

/// Array of entities persisted under a single key
pub struct CollectionRepository<T, S: KeyValueStorage> {
    storage: Rc<S>,
    key: String,
    items: Vec<T>,
}

pub type TaskRepository<S> = CollectionRepository<Task, S>;
pub type ProjectRepository<S> = CollectionRepository<Project, S>;

impl<T, S> CollectionRepository<T, S>
where
    T: Entity + Serialize + DeserializeOwned,
    S: KeyValueStorage,
{
    /// Load the collection, starting empty if the key is missing or unreadable
    pub fn load(storage: Rc<S>, key: impl Into<String>) -> Self {
        let key = key.into();
        let items: Vec<T> = load_json_or(&*storage, &key, Vec::new);
        log::debug!("repository: loaded {} records from '{}'", items.len(), key);
        Self { storage, key, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the whole array and persist it
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.flush();
    }

    /// Append several entities with one write
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
        self.flush();
    }

    /// Edit entities in place with one write; returns how many were touched
    pub fn update_where<P, F>(&mut self, mut predicate: P, mut edit: F) -> usize
    where
        P: FnMut(&T) -> bool,
        F: FnMut(&mut T),
    {
        let mut touched = 0;
        for item in self.items.iter_mut().filter(|i| predicate(&**i)) {
            edit(item);
            touched += 1;
        }
        if touched > 0 {
            self.flush();
        }
        touched
    }

    /// Remove matching entities with one write, returning them in list order
    pub fn remove_where<P>(&mut self, mut predicate: P) -> Vec<T>
    where
        P: FnMut(&T) -> bool,
    {
        let (removed, kept): (Vec<T>, Vec<T>) = std::mem::take(&mut self.items).into_iter().partition(|i| predicate(i));
        self.items = kept;
        if !removed.is_empty() {
            self.flush();
        }
        removed
    }

    /// Write the in-memory array; failures are logged, never raised
    fn flush(&self) {
        if let Err(e) = save_json(&*self.storage, &self.key, &self.items) {
            log::error!("repository: could not persist '{}': {}", self.key, e);
        }
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|i| i.id() == id)
    }
}

impl<T, S> Repository<T> for CollectionRepository<T, S>
where
    T: Entity + Serialize + DeserializeOwned,
    S: KeyValueStorage,
{
    fn create(&mut self, entity: T) -> DomainResult<T> {
        if self.position(entity.id()).is_some() {
            return Err(DomainError::Conflict(format!("id {:?} already exists", entity.id())));
        }
        self.items.push(entity.clone());
        self.flush();
        Ok(entity)
    }

    fn find_by_id(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|i| i.id() == id)
    }

    fn list(&self) -> &[T] {
        &self.items
    }

    fn update(&mut self, entity: T) -> DomainResult<T> {
        let pos = self
            .position(entity.id())
            .ok_or_else(|| DomainError::NotFound(format!("{:?}", entity.id())))?;
        self.items[pos] = entity.clone();
        self.flush();
        Ok(entity)
    }

    fn delete(&mut self, id: &T::Id) -> DomainResult<T> {
        let pos = self
            .position(id)
            .ok_or_else(|| DomainError::NotFound(format!("{:?}", id)))?;
        let removed = self.items.remove(pos);
        self.flush();
        Ok(removed)
    }
}
