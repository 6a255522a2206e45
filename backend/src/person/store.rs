//! Person store contract
//!
//! The API layer only talks to persistence through [`PersonStore`], so the
//! backing store can be swapped at startup without touching the handlers.

use crate::person::models::{Person, PersonId};
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a person store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying database rejected the operation
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Person fields could not be encoded or decoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem access around the store failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored row does not hold a valid field document
    #[error("Corrupt person record: {0}")]
    Corrupt(String),

    /// Every assignable id has been used
    #[error("No person ids left to assign")]
    IdExhausted,
}

/// CRUD persistence primitives for Person records
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Return every stored person, in ascending id order
    async fn find_all(&self) -> Result<Vec<Person>, StoreError>;

    /// Return the person with the given id, if any
    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, StoreError>;

    /// Insert or replace a person and return the stored record
    ///
    /// A person without an id is assigned the next free one. A person with
    /// an id replaces whatever is stored under it.
    async fn save(&self, person: Person) -> Result<Person, StoreError>;

    /// Remove the person with the given id; absent ids are a no-op
    async fn delete_by_id(&self, id: PersonId) -> Result<(), StoreError>;
}
