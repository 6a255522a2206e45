//! Person domain module
//!
//! Defines the Person record and the stores that persist it.

pub mod db;
pub mod memory;
pub mod models;
pub mod store;

pub use db::SqlitePersonStore;
pub use memory::MemoryPersonStore;
pub use models::{Person, PersonId};
pub use store::{PersonStore, StoreError};
