//! Roulette — HTTP command surface.
//!
//! Exposes the game commands and catalog administration over axum, runs
//! the per-game countdown tickers, and reads its configuration from the
//! environment.

use axum::Router;

pub mod config;
pub mod countdown;
pub mod error;
pub mod routes;
pub mod state;

/// Builds the full router: health check, games and catalogs.
pub fn build_router(state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/games", routes::games::router())
        .nest("/api/v1/catalogs", routes::catalogs::router())
        .with_state(state)
}
