//! Commands for the content catalogs.

use roulette_core::command::Command;
use uuid::Uuid;

use super::catalog::CatalogName;

/// Replace one catalog document with an edited version.
#[derive(Debug, Clone)]
pub struct SaveCatalog {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Which document to replace.
    pub name: CatalogName,
    /// The new document body, in the catalog's JSON shape.
    pub body: serde_json::Value,
}

impl Command for SaveCatalog {
    fn command_type(&self) -> &'static str {
        "catalog.save"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Re-read every catalog from the content store.
#[derive(Debug, Clone)]
pub struct ReloadCatalogs {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ReloadCatalogs {
    fn command_type(&self) -> &'static str {
        "catalog.reload"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
