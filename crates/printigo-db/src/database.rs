use printigo_core::AppError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::DatabaseConfig;
use crate::store::PgDocumentStore;

/// Handle on the Printigo PostgreSQL database.
///
/// Holds the pool shared by every [`PgDocumentStore`] handed out, and owns
/// the `services` / `reviews` schema through the embedded migrations.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open the pool described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| AppError::DatabaseError(format!("connect: {e}")))?;

        tracing::info!(max_connections = config.max_connections, "database pool ready");
        Ok(Self { pool })
    }

    /// Wrap a pool opened elsewhere, e.g. against a test container.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the document tables and their indexes if they are missing.
    pub async fn migrate(&self) -> Result<(), AppError> {
        let migrator = sqlx::migrate!("../../migrations");
        migrator
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("migrate: {e}")))?;

        tracing::info!(migrations = migrator.iter().count(), "schema up to date");
        Ok(())
    }

    /// A document store over both collections, sharing this pool.
    pub fn document_store(&self) -> PgDocumentStore {
        PgDocumentStore::new(self.pool.clone())
    }
}
