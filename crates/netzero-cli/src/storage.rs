use crate::cli::StorageBackend;
use anyhow::{Context, Result};
use netzero_core::config::LayeredConfig;
use netzero_store::{FileKeyValueStore, KeyValueStore, LedgerStore, MemoryKeyValueStore};
use std::sync::Arc;

/// Open the ledger over the selected persistence medium
pub async fn open_ledger(backend: StorageBackend, config: &LayeredConfig) -> Result<LedgerStore> {
    let medium: Arc<dyn KeyValueStore> = match backend {
        StorageBackend::Memory => Arc::new(MemoryKeyValueStore::new()),
        StorageBackend::File => {
            let dir = &config.data_dir.value;
            let store = FileKeyValueStore::open(dir.clone()).await.with_context(|| {
                format!("Failed to create data directory {}", dir.display())
            })?;
            Arc::new(store)
        }
    };

    LedgerStore::open(medium, config.seed_policy.value)
        .await
        .context("Failed to open ledger")
}
