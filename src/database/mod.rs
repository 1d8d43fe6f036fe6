pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use repository::PgStore;
pub use store::{EmployeeStore, FormStore, Store};

use std::sync::Arc;
use tracing::info;

use crate::config::{AppConfig, StoreBackend};

/// Open the backend selected by configuration
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn Store>, DatabaseError> {
    let store: Arc<dyn Store> = match config.store.backend {
        StoreBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database).await?;
            Arc::new(PgStore::new(pool))
        }
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };
    info!("Using {} store", store.backend_name());
    Ok(store)
}
