//! In-memory stores.
//!
//! Used by the API when no `DATABASE_URL` is configured, and by handler and
//! route tests. Both enforce the same contracts as the `PostgreSQL` adapters:
//! appends check the expected version, documents are upserted by name.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use roulette_core::error::DomainError;
use roulette_core::repository::{DocumentStore, EventRepository, StoredDocument, StoredEvent};

fn poisoned<T>(_: T) -> DomainError {
    DomainError::Infrastructure("in-memory store lock poisoned".into())
}

/// Event streams held in a map keyed by aggregate id.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    streams: Mutex<HashMap<Uuid, Vec<StoredEvent>>>,
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let streams = self.streams.lock().map_err(poisoned)?;
        Ok(streams.get(&aggregate_id).cloned().unwrap_or_default())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        if events.is_empty() {
            return Ok(());
        }
        let mut streams = self.streams.lock().map_err(poisoned)?;
        let stream = streams.entry(aggregate_id).or_default();
        let actual = stream.last().map_or(0, |e| e.sequence_number);
        if actual != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }
        stream.extend_from_slice(events);
        Ok(())
    }
}

/// Catalog documents keyed by name.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<String, StoredDocument>>,
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn load_document(&self, name: &str) -> Result<Option<StoredDocument>, DomainError> {
        let documents = self.documents.read().map_err(poisoned)?;
        Ok(documents.get(name).cloned())
    }

    async fn save_document(&self, document: &StoredDocument) -> Result<(), DomainError> {
        let mut documents = self.documents.write().map_err(poisoned)?;
        documents.insert(document.name.clone(), document.clone());
        Ok(())
    }
}
