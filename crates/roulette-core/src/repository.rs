//! Persistence abstractions: the event stream behind game sessions and the
//! document store behind the content catalogs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Stored representation of a domain event.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Aggregate this event belongs to.
    pub aggregate_id: Uuid,
    /// Event type name for deserialization routing.
    pub event_type: String,
    /// Serialized event payload.
    pub payload: serde_json::Value,
    /// Sequence number within the aggregate stream.
    pub sequence_number: i64,
    /// Correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Causation ID linking to the causing event/command.
    pub causation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

/// Repository trait for loading and appending domain events.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Load all events for a given aggregate, ordered by sequence number.
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError>;

    /// Append new events to an aggregate stream with optimistic concurrency.
    /// `expected_version` is the last known sequence number.
    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError>;
}

/// A named JSON document held by the content store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Catalog name (`actions`, `bodyParts`, `jokerChallenges`).
    pub name: String,
    /// Document body.
    pub body: serde_json::Value,
    /// Hex SHA-256 of the canonical body.
    pub version_hash: String,
    /// When the document was last written.
    pub saved_at: DateTime<Utc>,
}

/// Read/write access to catalog documents keyed by name.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns the document, or `None` when nothing has been saved yet.
    async fn load_document(&self, name: &str) -> Result<Option<StoredDocument>, DomainError>;

    /// Inserts or replaces the document with the same name.
    async fn save_document(&self, document: &StoredDocument) -> Result<(), DomainError>;
}
