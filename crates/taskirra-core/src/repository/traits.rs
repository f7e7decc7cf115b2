//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Backends are synchronous, like the browser storage they wrap.

use crate::domain::{DomainResult, Entity};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
pub trait Repository<T: Entity> {
    /// Insert a new entity; its id must not exist yet
    fn create(&mut self, entity: T) -> DomainResult<T>;

    /// Find entity by ID
    fn find_by_id(&self, id: &T::Id) -> Option<&T>;

    /// List all entities in stored order
    fn list(&self) -> &[T];

    /// Replace an existing entity (full-object replacement)
    fn update(&mut self, entity: T) -> DomainResult<T>;

    /// Delete entity by ID, returning it
    fn delete(&mut self, id: &T::Id) -> DomainResult<T>;
}
