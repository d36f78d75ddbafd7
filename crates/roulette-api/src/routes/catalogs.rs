//! Routes for catalog administration.
//!
//! Access control for editing is handled in front of this service.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use roulette_catalog::application::command_handlers;
use roulette_catalog::application::query_handlers::{self, CatalogView};
use roulette_catalog::domain::catalog::CatalogName;
use roulette_catalog::domain::commands;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for PUT /{name}.
#[derive(Debug, Serialize)]
pub struct CatalogSavedResponse {
    /// Document key.
    pub name: String,
    /// Hash of the stored body.
    pub version_hash: String,
}

/// GET /{name}
#[instrument(skip_all, fields(catalog = %name))]
async fn get_catalog(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CatalogView>, ApiError> {
    let name: CatalogName = name.parse()?;
    let catalogs = state.catalogs()?;
    Ok(Json(query_handlers::get_catalog(name, &catalogs)))
}

/// PUT /{name}
#[instrument(skip_all, fields(catalog = %name))]
async fn save_catalog(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<CatalogSavedResponse>, ApiError> {
    let command = commands::SaveCatalog {
        correlation_id: Uuid::new_v4(),
        name: name.parse()?,
        body,
    };

    info!(correlation_id = %command.correlation_id, "handling save_catalog command");

    let current = state.catalogs()?;
    let saved = command_handlers::handle_save_catalog(
        &command,
        &current,
        state.clock.as_ref(),
        &*state.document_store,
    )
    .await?;
    state.replace_catalogs(saved.catalogs)?;

    Ok(Json(CatalogSavedResponse {
        name: saved.name.as_str().to_owned(),
        version_hash: saved.version_hash,
    }))
}

/// POST /reload
#[instrument(skip_all)]
async fn reload_catalogs(
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalogView>>, ApiError> {
    let command = commands::ReloadCatalogs {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling reload_catalogs command");

    let catalogs = command_handlers::handle_reload_catalogs(
        &command,
        &state.defaults,
        state.clock.as_ref(),
        &*state.document_store,
    )
    .await?;
    let views = CatalogName::ALL
        .into_iter()
        .map(|name| query_handlers::get_catalog(name, &catalogs))
        .collect();
    state.replace_catalogs(catalogs)?;

    Ok(Json(views))
}

/// Returns the router for catalog administration.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reload", post(reload_catalogs))
        .route("/{name}", get(get_catalog).put(save_catalog))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use roulette_catalog::domain::catalog::{Catalogs, Tier};
    use roulette_catalog::domain::version::version_hash;
    use roulette_core::clock::Clock;
    use roulette_core::repository::DocumentStore;
    use roulette_core::rng::DeterministicRng;
    use roulette_game::config::GameConfig;
    use roulette_store::memory::{InMemoryDocumentStore, InMemoryEventRepository};
    use roulette_test_support::{FailingDocumentStore, MockRng, fixed_clock};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app_state_with(document_store: Arc<dyn DocumentStore>) -> AppState {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(fixed_clock());
        let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
        AppState::new(
            clock,
            rng,
            Arc::new(InMemoryEventRepository::default()),
            document_store,
            Catalogs::default(),
            Catalogs::default(),
            GameConfig::default(),
        )
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_get_catalog_returns_document_and_hash() {
        // Arrange
        let app = router().with_state(app_state_with(Arc::new(InMemoryDocumentStore::default())));

        // Act
        let (status, json) = send(app, "GET", "/actions", None).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "actions");
        assert_eq!(json["body"]["fusion"][0], "The Slow Dance");
        assert_eq!(json["version_hash"], version_hash(&json["body"]));
    }

    #[tokio::test]
    async fn test_get_unknown_catalog_returns_400() {
        let app = router().with_state(app_state_with(Arc::new(InMemoryDocumentStore::default())));

        let (status, json) = send(app, "GET", "/spells", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_save_catalog_replaces_live_snapshot() {
        // Arrange
        let state = app_state_with(Arc::new(InMemoryDocumentStore::default()));
        let app = router().with_state(state.clone());

        // Act
        let (status, json) = send(
            app,
            "PUT",
            "/actions",
            Some(json!({ "gentle": ["waves at"], "fusion": ["The Waltz"] })),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "actions");
        let live = state.catalogs().unwrap();
        assert_eq!(live.actions.phrases(Tier::Gentle), ["waves at".to_owned()]);
        let stored = state
            .document_store
            .load_document("actions")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(json["version_hash"], stored.version_hash);
    }

    #[tokio::test]
    async fn test_save_invalid_catalog_returns_400_and_keeps_snapshot() {
        // Arrange
        let state = app_state_with(Arc::new(InMemoryDocumentStore::default()));
        let app = router().with_state(state.clone());

        // Act
        let (status, _) = send(app, "PUT", "/bodyParts", Some(json!(["not", "a", "map"]))).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(*state.catalogs().unwrap(), Catalogs::default());
    }

    #[tokio::test]
    async fn test_save_catalog_returns_500_when_store_fails_and_keeps_snapshot() {
        // Arrange
        let state = app_state_with(Arc::new(FailingDocumentStore));
        let app = router().with_state(state.clone());

        // Act
        let (status, json) = send(app, "PUT", "/actions", Some(json!({ "gentle": ["pats"] }))).await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "persistence_failure");
        assert_eq!(*state.catalogs().unwrap(), Catalogs::default());
    }

    #[tokio::test]
    async fn test_reload_returns_all_three_catalogs() {
        // Arrange
        let app = router().with_state(app_state_with(Arc::new(InMemoryDocumentStore::default())));

        // Act
        let (status, json) = send(app, "POST", "/reload", None).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|view| view["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["actions", "bodyParts", "jokerChallenges"]);
    }
}
