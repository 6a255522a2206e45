//! In-memory person store

use crate::person::models::{Person, PersonId};
use crate::person::store::{PersonStore, StoreError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug)]
struct Registry {
    persons: BTreeMap<PersonId, Person>,
    /// `None` once an id of `PersonId::MAX` has been handed out
    next_id: Option<PersonId>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            persons: BTreeMap::new(),
            next_id: Some(1),
        }
    }
}

/// Person store backed by an ordered map held in process memory
///
/// Ids are handed out from a counter starting at 1. Saving a record with an
/// explicit id moves the counter past it. Once the counter passes the top of
/// the id range, saves without an id fail with [`StoreError::IdExhausted`].
#[derive(Debug, Default)]
pub struct MemoryPersonStore {
    registry: RwLock<Registry>,
}

impl MemoryPersonStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored persons
    pub async fn len(&self) -> usize {
        self.registry.read().await.persons.len()
    }

    /// Whether the store holds no persons
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PersonStore for MemoryPersonStore {
    async fn find_all(&self) -> Result<Vec<Person>, StoreError> {
        let registry = self.registry.read().await;
        Ok(registry.persons.values().cloned().collect())
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, StoreError> {
        let registry = self.registry.read().await;
        Ok(registry.persons.get(&id).cloned())
    }

    async fn save(&self, person: Person) -> Result<Person, StoreError> {
        let mut registry = self.registry.write().await;
        let id = match person.id {
            Some(id) => id,
            None => registry.next_id.ok_or(StoreError::IdExhausted)?,
        };
        if registry.next_id.is_some_and(|next| id >= next) {
            registry.next_id = id.checked_add(1);
        }

        let person = person.with_id(id);
        registry.persons.insert(id, person.clone());
        debug!(person_id = id, "Saved person");
        Ok(person)
    }

    async fn delete_by_id(&self, id: PersonId) -> Result<(), StoreError> {
        let mut registry = self.registry.write().await;
        if registry.persons.remove(&id).is_some() {
            debug!(person_id = id, "Deleted person");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn named(name: &str) -> Person {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.to_string()));
        Person::new(fields)
    }

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = MemoryPersonStore::new();
        assert!(store.is_empty().await);
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let store = MemoryPersonStore::new();
        let first = store.save(named("Alice")).await.unwrap();
        let second = store.save(named("Bob")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_save_with_explicit_id_advances_counter() {
        let store = MemoryPersonStore::new();
        let explicit = store.save(named("Zed").with_id(10)).await.unwrap();
        assert_eq!(explicit.id, Some(10));

        let next = store.save(named("Amy")).await.unwrap();
        assert_eq!(next.id, Some(11));
    }

    #[tokio::test]
    async fn test_save_after_max_id_fails_without_overwriting() {
        let store = MemoryPersonStore::new();
        store.save(named("Max").with_id(PersonId::MAX)).await.unwrap();

        let result = store.save(named("Next")).await;
        assert!(matches!(result, Err(StoreError::IdExhausted)));

        let kept = store.find_by_id(PersonId::MAX).await.unwrap().unwrap();
        assert_eq!(kept.field("name"), Some(&json!("Max")));
        assert_eq!(store.len().await, 1);

        // explicit ids are still accepted
        let explicit = store.save(named("Low").with_id(3)).await.unwrap();
        assert_eq!(explicit.id, Some(3));
    }

    #[tokio::test]
    async fn test_save_existing_id_replaces_record() {
        let store = MemoryPersonStore::new();
        let saved = store.save(named("Alice")).await.unwrap();
        let id = saved.id.unwrap();

        store.save(named("Alicia").with_id(id)).await.unwrap();

        let found = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.field("name"), Some(&json!("Alicia")));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_id() {
        let store = MemoryPersonStore::new();
        store.save(named("C").with_id(3)).await.unwrap();
        store.save(named("A").with_id(1)).await.unwrap();
        store.save(named("B").with_id(2)).await.unwrap();

        let ids: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_noop() {
        let store = MemoryPersonStore::new();
        store.save(named("Alice")).await.unwrap();

        store.delete_by_id(42).await.unwrap();
        assert_eq!(store.len().await, 1);

        store.delete_by_id(1).await.unwrap();
        assert!(store.find_by_id(1).await.unwrap().is_none());
    }
}
