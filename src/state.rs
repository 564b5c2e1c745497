use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::db::{PgStore, Store};
use crate::memory::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        Self::from_config(config).await
    }

    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let store = if config.uses_memory_store() {
            info!("using in-memory store");
            Arc::new(MemoryStore::default()) as Arc<dyn Store>
        } else {
            let pg = PgStore::connect(&config).await?;
            pg.migrate().await?;
            Arc::new(pg) as Arc<dyn Store>
        };
        Ok(Self::from_parts(store, Arc::new(config)))
    }

    pub fn from_parts(store: Arc<dyn Store>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::from_parts(
            Arc::new(MemoryStore::default()),
            Arc::new(crate::config::test_config()),
        )
    }
}
