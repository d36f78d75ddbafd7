//! Shared application state.

use std::sync::{Arc, Mutex, RwLock};

use roulette_catalog::domain::catalog::Catalogs;
use roulette_core::clock::Clock;
use roulette_core::error::DomainError;
use roulette_core::repository::{DocumentStore, EventRepository};
use roulette_core::rng::DeterministicRng;
use roulette_game::config::GameConfig;

use crate::countdown::CountdownRegistry;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of event timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// The one random source every draw goes through.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Game session event streams.
    pub event_repository: Arc<dyn EventRepository>,
    /// Catalog documents.
    pub document_store: Arc<dyn DocumentStore>,
    /// Built-in (or seed-file) catalogs used for missing documents.
    pub defaults: Arc<Catalogs>,
    /// Game tunables.
    pub game_config: Arc<GameConfig>,
    /// Running countdowns.
    pub countdowns: CountdownRegistry,
    catalogs: Arc<RwLock<Arc<Catalogs>>>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        event_repository: Arc<dyn EventRepository>,
        document_store: Arc<dyn DocumentStore>,
        defaults: Catalogs,
        catalogs: Catalogs,
        game_config: GameConfig,
    ) -> Self {
        Self {
            clock,
            rng,
            event_repository,
            document_store,
            defaults: Arc::new(defaults),
            game_config: Arc::new(game_config),
            countdowns: CountdownRegistry::default(),
            catalogs: Arc::new(RwLock::new(Arc::new(catalogs))),
        }
    }

    /// The live catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the lock is poisoned.
    pub fn catalogs(&self) -> Result<Arc<Catalogs>, DomainError> {
        self.catalogs
            .read()
            .map(|guard| Arc::clone(&*guard))
            .map_err(|e| DomainError::Infrastructure(format!("catalog cache poisoned: {e}")))
    }

    /// Swaps in a new catalog snapshot. Games mid-command keep the snapshot
    /// they started with.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the lock is poisoned.
    pub fn replace_catalogs(&self, catalogs: Catalogs) -> Result<(), DomainError> {
        let mut guard = self
            .catalogs
            .write()
            .map_err(|e| DomainError::Infrastructure(format!("catalog cache poisoned: {e}")))?;
        *guard = Arc::new(catalogs);
        Ok(())
    }
}
