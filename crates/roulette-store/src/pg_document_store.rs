//! `PostgreSQL` implementation of the `DocumentStore` trait.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;

use roulette_core::error::DomainError;
use roulette_core::repository::{DocumentStore, StoredDocument};

/// Catalog documents in the `catalog_documents` table, one row per name.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Creates a new `PgDocumentStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn load_document(&self, name: &str) -> Result<Option<StoredDocument>, DomainError> {
        let row = sqlx::query(
            "SELECT name, body, version_hash, saved_at FROM catalog_documents WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::PersistenceFailure(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let decode = |e: sqlx::Error| {
            DomainError::Infrastructure(format!("catalog row decoding failed: {e}"))
        };
        Ok(Some(StoredDocument {
            name: row.try_get("name").map_err(decode)?,
            body: row.try_get("body").map_err(decode)?,
            version_hash: row.try_get("version_hash").map_err(decode)?,
            saved_at: row.try_get("saved_at").map_err(decode)?,
        }))
    }

    async fn save_document(&self, document: &StoredDocument) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO catalog_documents (name, body, version_hash, saved_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (name) DO UPDATE \
             SET body = EXCLUDED.body, \
                 version_hash = EXCLUDED.version_hash, \
                 saved_at = EXCLUDED.saved_at",
        )
        .bind(&document.name)
        .bind(&document.body)
        .bind(&document.version_hash)
        .bind(document.saved_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::PersistenceFailure(e.to_string()))?;

        debug!(name = %document.name, version_hash = %document.version_hash, "catalog document saved");
        Ok(())
    }
}
