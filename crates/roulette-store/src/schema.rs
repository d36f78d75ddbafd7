//! Database schema for the event store and the content store.
//!
//! The same statements live in the workspace `migrations/` directory, which
//! is what `sqlx::test` applies. [`ensure_schema`] runs them directly at
//! startup so a fresh database works without a migration step.

use roulette_core::error::DomainError;
use sqlx::PgPool;
use tracing::debug;

/// SQL to create the events table.
pub const CREATE_EVENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS domain_events (
    event_id        UUID PRIMARY KEY,
    aggregate_id    UUID NOT NULL,
    event_type      VARCHAR(255) NOT NULL,
    payload         JSONB NOT NULL,
    sequence_number BIGINT NOT NULL,
    correlation_id  UUID NOT NULL,
    causation_id    UUID NOT NULL,
    occurred_at     TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (aggregate_id, sequence_number)
);

CREATE INDEX IF NOT EXISTS idx_domain_events_aggregate_id
    ON domain_events (aggregate_id, sequence_number);

CREATE INDEX IF NOT EXISTS idx_domain_events_correlation_id
    ON domain_events (correlation_id);
";

/// SQL to create the catalog documents table.
pub const CREATE_CATALOG_DOCUMENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS catalog_documents (
    name         VARCHAR(64) PRIMARY KEY,
    body         JSONB NOT NULL,
    version_hash VARCHAR(64) NOT NULL,
    saved_at     TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

/// Creates both tables if they do not exist.
///
/// # Errors
///
/// Returns `DomainError::PersistenceFailure` if a statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DomainError> {
    for statement in [CREATE_EVENTS_TABLE, CREATE_CATALOG_DOCUMENTS_TABLE] {
        sqlx::raw_sql(statement)
            .execute(pool)
            .await
            .map_err(|e| DomainError::PersistenceFailure(format!("schema setup failed: {e}")))?;
    }
    debug!("database schema ready");
    Ok(())
}
