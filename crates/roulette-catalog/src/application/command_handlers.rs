//! Command handlers for the content catalogs.
//!
//! Saving validates the edited document against the catalog's shape before
//! anything is written, so a rejected edit leaves both the store and the
//! live snapshot untouched.

use roulette_core::clock::Clock;
use roulette_core::command::Command;
use roulette_core::error::DomainError;
use roulette_core::repository::{DocumentStore, StoredDocument};
use tracing::info;

use crate::application::query_handlers;
use crate::domain::catalog::{CatalogName, Catalogs};
use crate::domain::commands::{ReloadCatalogs, SaveCatalog};
use crate::domain::version::version_hash;

/// Result of a successful save.
#[derive(Debug)]
pub struct CatalogSaved {
    /// The document that was replaced.
    pub name: CatalogName,
    /// Hash of the stored body.
    pub version_hash: String,
    /// The live snapshot with the edit applied.
    pub catalogs: Catalogs,
}

/// Handles the `SaveCatalog` command: validates the body, writes the
/// normalized document, and returns the updated snapshot.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the body does not match the catalog
/// shape, or the store's error if the write fails.
pub async fn handle_save_catalog(
    command: &SaveCatalog,
    current: &Catalogs,
    clock: &dyn Clock,
    store: &dyn DocumentStore,
) -> Result<CatalogSaved, DomainError> {
    let catalogs = current
        .clone()
        .with_document(command.name, command.body.clone())?;

    let body = catalogs.document(command.name);
    let hash = version_hash(&body);
    let document = StoredDocument {
        name: command.name.as_str().to_owned(),
        body,
        version_hash: hash.clone(),
        saved_at: clock.now(),
    };
    store.save_document(&document).await?;

    info!(
        correlation_id = %command.correlation_id(),
        catalog = %command.name,
        version_hash = %hash,
        "catalog saved"
    );

    Ok(CatalogSaved {
        name: command.name,
        version_hash: hash,
        catalogs,
    })
}

/// Handles the `ReloadCatalogs` command: re-reads every document from the
/// store, falling back to `defaults` for documents that are missing.
///
/// # Errors
///
/// Returns the store's error if a read fails.
pub async fn handle_reload_catalogs(
    command: &ReloadCatalogs,
    defaults: &Catalogs,
    clock: &dyn Clock,
    store: &dyn DocumentStore,
) -> Result<Catalogs, DomainError> {
    let catalogs = query_handlers::load_catalogs(defaults, clock, store).await?;
    info!(correlation_id = %command.correlation_id(), "catalogs reloaded");
    Ok(catalogs)
}
