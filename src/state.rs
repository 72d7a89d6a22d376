use crate::config::AppConfig;
use crate::db;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config.database_url).await?;
        Ok(Self { db, config })
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// In-memory store with the schema applied and a fixed test secret.
    #[cfg(test)]
    pub async fn fake() -> Self {
        let db = db::memory_pool().await;
        db::init_schema(&db).await.expect("schema on in-memory db");

        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            jwt: crate::config::JwtConfig {
                secret: "test-secret".into(),
                ttl_minutes: 60,
            },
            host: "127.0.0.1".into(),
            port: 0,
        });

        Self::from_parts(db, config)
    }
}
