//! How the orchestrator obtains its backing store.

use std::sync::Arc;

use geotrust_core::config::StorageConfig;
use geotrust_core::errors::StorageError;
use geotrust_core::traits::PipelineStore;
use geotrust_storage::StorageEngine;

/// Opens the store for one run. Injected so tests can substitute failing or
/// in-memory stores.
pub trait Connector: Send + Sync {
    fn connect(&self, config: &StorageConfig) -> Result<Arc<dyn PipelineStore>, StorageError>;
}

/// Opens the SQLite database named by `storage.path`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteConnector;

impl Connector for SqliteConnector {
    fn connect(&self, config: &StorageConfig) -> Result<Arc<dyn PipelineStore>, StorageError> {
        let engine = StorageEngine::open_configured(config)?;
        Ok(Arc::new(engine))
    }
}

/// Hands out an already-open store. Each run still pings it and takes the
/// run lock.
pub struct SharedConnector {
    store: Arc<dyn PipelineStore>,
}

impl SharedConnector {
    pub fn new(store: Arc<dyn PipelineStore>) -> Self {
        Self { store }
    }
}

impl Connector for SharedConnector {
    fn connect(&self, _config: &StorageConfig) -> Result<Arc<dyn PipelineStore>, StorageError> {
        Ok(Arc::clone(&self.store))
    }
}
