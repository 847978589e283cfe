use std::sync::Arc;
use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::{Config, StorageBackend};
use crate::error::{Error, Result};
use crate::repository::{memory::MemoryStore, postgres::PgStore, DynStore};

pub async fn create_pool(config: &Config) -> Result<PgPool> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| Error::Config("Missing environment variable: DATABASE_URL".to_string()))?;
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(url)
        .await?;
    Ok(pool)
}

/// Opens the configured backend; Postgres schemas are migrated before use.
pub async fn connect_store(config: &Config) -> Result<DynStore> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = create_pool(config).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("connected to postgres, migrations applied");
            Ok(Arc::new(PgStore::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
