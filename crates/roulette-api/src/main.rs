//! Roulette API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use roulette_api::config::AppConfig;
use roulette_api::error::AppError;
use roulette_api::state::AppState;
use roulette_catalog::application::query_handlers::load_catalogs;
use roulette_catalog::domain::catalog::Catalogs;
use roulette_core::clock::{Clock, SystemClock};
use roulette_core::repository::{DocumentStore, EventRepository};
use roulette_core::rng::{DeterministicRng, StdRandom};
use roulette_store::memory::{InMemoryDocumentStore, InMemoryEventRepository};
use roulette_store::pg_document_store::PgDocumentStore;
use roulette_store::pg_event_repository::PgEventRepository;
use roulette_store::schema::ensure_schema;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Event repository and document store, PostgreSQL-backed when a database
/// URL is configured.
async fn build_stores(
    config: &AppConfig,
) -> Result<(Arc<dyn EventRepository>, Arc<dyn DocumentStore>), AppError> {
    let Some(database_url) = &config.database_url else {
        warn!("DATABASE_URL not set, games and catalogs are kept in memory");
        return Ok((
            Arc::new(InMemoryEventRepository::default()),
            Arc::new(InMemoryDocumentStore::default()),
        ));
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    ensure_schema(&pool).await?;
    Ok((
        Arc::new(PgEventRepository::new(pool.clone())),
        Arc::new(PgDocumentStore::new(pool)),
    ))
}

/// Built-in catalogs, or the seed file's when one is configured.
async fn load_defaults(config: &AppConfig) -> Result<Catalogs, AppError> {
    let Some(path) = &config.catalog_seed_path else {
        return Ok(Catalogs::default());
    };
    let source = tokio::fs::read_to_string(path).await?;
    let catalogs = Catalogs::from_yaml_str(&source)?;
    info!(path = %path.display(), "loaded catalog seed file");
    Ok(catalogs)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("Starting Roulette API server");

    let config = AppConfig::from_env()?;
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(SystemClock);
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> =
        Arc::new(Mutex::new(StdRandom::from_entropy()));
    let (event_repository, document_store) = build_stores(&config).await?;

    let defaults = load_defaults(&config).await?;
    let catalogs = match load_catalogs(&defaults, clock.as_ref(), document_store.as_ref()).await {
        Ok(catalogs) => catalogs,
        Err(e) => {
            warn!(error = %e, "content store unavailable, using default catalogs");
            defaults.clone()
        }
    };

    let app_state = AppState::new(
        clock,
        rng,
        event_repository,
        document_store,
        defaults,
        catalogs,
        config.game.clone(),
    );

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = roulette_api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
