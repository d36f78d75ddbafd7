//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use roulette_catalog::domain::catalog::Catalogs;
use roulette_core::clock::Clock;
use roulette_core::rng::DeterministicRng;
use roulette_game::config::GameConfig;
use roulette_store::memory::{InMemoryDocumentStore, InMemoryEventRepository};
use roulette_test_support::{CyclingRng, fixed_clock};
use tower::ServiceExt;

use roulette_api::state::AppState;

/// Application state over in-memory stores, a fixed clock and the given RNG.
pub fn test_state_with_rng(rng: impl DeterministicRng + Send + 'static) -> AppState {
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(fixed_clock());
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(rng));
    AppState::new(
        clock,
        rng,
        Arc::new(InMemoryEventRepository::default()),
        Arc::new(InMemoryDocumentStore::default()),
        Catalogs::default(),
        Catalogs::default(),
        GameConfig::default(),
    )
}

/// Build the full app router. Standard rounds only, so spins are
/// predictable. Uses the same route structure as `main.rs`.
pub fn build_test_app() -> Router {
    roulette_api::build_router(test_state_with_rng(CyclingRng::standard_only()))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, None).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "PUT", uri, Some(body)).await
}

/// Send a DELETE request and return the response.
pub async fn delete(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "DELETE", uri, None).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None).await
}

/// Creates a game and registers `players` as `(name, tag, accepts_same_gender)`.
pub async fn create_game_with(app: &Router, players: &[(&str, &str, bool)]) -> String {
    let (status, json) = post_empty(app, "/api/v1/games").await;
    assert_eq!(status, StatusCode::CREATED);
    let game_id = json["game_id"].as_str().unwrap().to_owned();
    for (name, tag, accepts) in players {
        let (status, _) = post_json(
            app,
            &format!("/api/v1/games/{game_id}/participants"),
            &serde_json::json!({
                "name": name,
                "gender_tag": tag,
                "accepts_same_gender": accepts
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    game_id
}
