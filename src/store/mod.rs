pub mod disk;
pub mod memory;

use crate::core::repository::CurrencyStore;
use disk::DiskStore;
use memory::MemoryStore;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Opens the on-disk store under `data_path`, falling back to an in-memory
/// store when the directory cannot be used.
pub fn open_store(data_path: &Path) -> Arc<dyn CurrencyStore> {
    match DiskStore::open(data_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(error = %e, "Falling back to in-memory store");
            Arc::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::{Currency, CurrencyCode};
    use crate::core::repository::{LocalCurrencyRepository, UpdatedTimeRepository};
    use crate::core::request_state::RequestState;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_store_on_disk() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        store
            .insert_currency_data(&[Currency::new(CurrencyCode::USD, 1.0)])
            .await
            .unwrap();
        drop(store);

        let reopened = open_store(dir.path());
        assert_eq!(
            reopened.read_currency_data().await,
            RequestState::Success(vec![Currency::new(CurrencyCode::USD, 1.0)])
        );
    }

    #[tokio::test]
    async fn test_open_store_falls_back_to_memory() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("not-a-dir");
        std::fs::write(&file_path, "occupied").unwrap();

        let store = open_store(&file_path);
        store.save_last_updated(7).await.unwrap();
        assert_eq!(store.get_last_updated_time().await, 7);
    }
}
