// Application state
// Carries the person store handed to every handler

use crate::config::{Config, StoreBackend};
use crate::person::{MemoryPersonStore, PersonStore, SqlitePersonStore, StoreError};
use std::sync::Arc;
use tracing::info;

/// Main application state
/// Cheap to clone; all clones share the same store
#[derive(Clone)]
pub struct AppState {
    /// Person persistence collaborator
    pub persons: Arc<dyn PersonStore>,
}

impl AppState {
    /// Create state around an existing store
    pub fn new(persons: Arc<dyn PersonStore>) -> Self {
        Self { persons }
    }

    /// Create state backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryPersonStore::new()))
    }

    /// Build the store selected by configuration
    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        match config.persistence.backend {
            StoreBackend::Memory => {
                info!("Using in-memory person store");
                Ok(Self::in_memory())
            }
            StoreBackend::Sqlite => {
                info!(
                    path = %config.persistence.database_path,
                    "Using SQLite person store"
                );
                let store = SqlitePersonStore::new(&config.persistence.database_path).await?;
                Ok(Self::new(Arc::new(store)))
            }
        }
    }
}
