//! Query handlers for the content catalogs.

use roulette_core::clock::Clock;
use roulette_core::error::DomainError;
use roulette_core::repository::{DocumentStore, StoredDocument};
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::catalog::{CatalogName, Catalogs};
use crate::domain::version::version_hash;

/// Read-only view of one catalog document.
#[derive(Debug, Serialize)]
pub struct CatalogView {
    /// Document key.
    pub name: String,
    /// Hash of `body`.
    pub version_hash: String,
    /// The document as the game currently uses it.
    pub body: serde_json::Value,
}

/// Builds the live snapshot from the content store.
///
/// Documents the store has never seen are seeded from `defaults`. A stored
/// document that no longer decodes is logged and replaced by the default in
/// the snapshot, without touching the store.
///
/// # Errors
///
/// Returns the store's error if a read or a seeding write fails.
pub async fn load_catalogs(
    defaults: &Catalogs,
    clock: &dyn Clock,
    store: &dyn DocumentStore,
) -> Result<Catalogs, DomainError> {
    let mut catalogs = defaults.clone();
    for name in CatalogName::ALL {
        match store.load_document(name.as_str()).await? {
            Some(document) => {
                catalogs = match catalogs.clone().with_document(name, document.body) {
                    Ok(updated) => updated,
                    Err(e) => {
                        warn!(catalog = %name, error = %e, "stored catalog unreadable, using default");
                        catalogs
                    }
                };
            }
            None => {
                let body = defaults.document(name);
                let document = StoredDocument {
                    name: name.as_str().to_owned(),
                    version_hash: version_hash(&body),
                    body,
                    saved_at: clock.now(),
                };
                store.save_document(&document).await?;
                info!(catalog = %name, "seeded catalog with defaults");
            }
        }
    }
    Ok(catalogs)
}

/// Returns one document of the live snapshot.
#[must_use]
pub fn get_catalog(name: CatalogName, catalogs: &Catalogs) -> CatalogView {
    let body = catalogs.document(name);
    CatalogView {
        name: name.as_str().to_owned(),
        version_hash: version_hash(&body),
        body,
    }
}
