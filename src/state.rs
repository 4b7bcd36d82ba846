use crate::errors::AppError;
use crate::storage::{persist_store, KvStore};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub store: Arc<Mutex<KvStore>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, store: KvStore) -> Self {
        Self {
            data_path,
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub async fn read<T>(&self, f: impl FnOnce(&KvStore) -> T) -> T {
        let store = self.store.lock().await;
        f(&*store)
    }

    /// Applies `f` and writes the store file. If `f` fails or the file
    /// cannot be written, the in-memory store is rolled back.
    pub async fn update<T>(
        &self,
        f: impl FnOnce(&mut KvStore) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut store = self.store.lock().await;
        let snapshot = store.clone();

        let result = match f(&mut *store) {
            Ok(value) => value,
            Err(err) => {
                *store = snapshot;
                return Err(err);
            }
        };

        if let Err(err) = persist_store(&self.data_path, &*store).await {
            error!("failed to write store file {}: {err}", self.data_path.display());
            *store = snapshot;
            return Err(err);
        }
        Ok(result)
    }
}
