//! Routes for game sessions.
//!
//! Every state-changing command cancels the game's running countdown; only
//! `start-countdown` starts one.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use roulette_catalog::domain::catalog::GenderTag;
use roulette_game::application::command_handlers::{self, GameCommandResult};
use roulette_game::application::query_handlers::{self, GameView};
use roulette_game::domain::commands;
use roulette_game::domain::countdown::Countdown;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Default roster size for auto-populate.
const DEFAULT_AUTO_POPULATE_COUNT: usize = 10;

/// Request body for POST /{game_id}/participants.
#[derive(Debug, Deserialize)]
pub struct AddParticipantRequest {
    /// Display name.
    pub name: String,
    /// Gender tag, `A` or `B`.
    pub gender_tag: GenderTag,
    /// Whether they play with others of the same tag.
    #[serde(default)]
    pub accepts_same_gender: bool,
}

/// Request body for POST /{game_id}/auto-populate.
#[derive(Debug, Default, Deserialize)]
pub struct AutoPopulateRequest {
    /// Number of participants; 10 when omitted.
    pub count: Option<usize>,
}

/// Request body for POST /{game_id}/select-level.
#[derive(Debug, Deserialize)]
pub struct SelectLevelRequest {
    /// Zero-based level index.
    pub level_index: usize,
}

/// A game view plus its countdown, if one was started.
#[derive(Debug, Serialize)]
pub struct GameResponse {
    /// The replayed session.
    #[serde(flatten)]
    pub game: GameView,
    /// Running or expired countdown of the current outcome.
    pub countdown: Option<Countdown>,
}

fn respond(state: &AppState, game: GameView) -> Result<Json<GameResponse>, ApiError> {
    let countdown = state.countdowns.current(game.game_id)?;
    Ok(Json(GameResponse { game, countdown }))
}

/// Answers a state-changing command: its countdown no longer applies.
fn after_command(
    state: &AppState,
    result: GameCommandResult,
) -> Result<Json<GameResponse>, ApiError> {
    state.countdowns.cancel(result.aggregate_id)?;
    respond(state, result.view)
}

/// POST /
#[instrument(skip_all)]
async fn create_game(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<GameResponse>), ApiError> {
    let command = commands::CreateGame {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling create_game command");

    let result = command_handlers::handle_create_game(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok((StatusCode::CREATED, respond(&state, result.view)?))
}

/// GET /{game_id}
#[instrument(skip_all, fields(game_id = %game_id))]
async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameResponse>, ApiError> {
    let view = query_handlers::get_game_by_id(game_id, &*state.event_repository).await?;
    respond(&state, view)
}

/// POST /{game_id}/participants
#[instrument(skip_all, fields(game_id = %game_id))]
async fn add_participant(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<AddParticipantRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let command = commands::AddParticipant {
        correlation_id: Uuid::new_v4(),
        game_id,
        name: request.name,
        gender_tag: request.gender_tag,
        accepts_same_gender: request.accepts_same_gender,
    };

    info!(correlation_id = %command.correlation_id, "handling add_participant command");

    let result = command_handlers::handle_add_participant(
        &command,
        &state.game_config,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    after_command(&state, result)
}

/// DELETE /{game_id}/participants/{index}
#[instrument(skip_all, fields(game_id = %game_id, index = index))]
async fn remove_participant(
    State(state): State<AppState>,
    Path((game_id, index)): Path<(Uuid, usize)>,
) -> Result<Json<GameResponse>, ApiError> {
    let command = commands::RemoveParticipant {
        correlation_id: Uuid::new_v4(),
        game_id,
        index,
    };

    info!(correlation_id = %command.correlation_id, "handling remove_participant command");

    let result = command_handlers::handle_remove_participant(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    after_command(&state, result)
}

/// POST /{game_id}/auto-populate
#[instrument(skip_all, fields(game_id = %game_id))]
async fn auto_populate(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<AutoPopulateRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let command = commands::AutoPopulate {
        correlation_id: Uuid::new_v4(),
        game_id,
        count: request.count.unwrap_or(DEFAULT_AUTO_POPULATE_COUNT),
    };

    info!(
        correlation_id = %command.correlation_id,
        count = command.count,
        "handling auto_populate command"
    );

    let result = command_handlers::handle_auto_populate(
        &command,
        &state.game_config,
        state.clock.as_ref(),
        &state.rng,
        &*state.event_repository,
    )
    .await?;

    after_command(&state, result)
}

/// POST /{game_id}/select-level
#[instrument(
    skip_all,
    fields(game_id = %game_id, level_index = request.level_index)
)]
async fn select_level(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<SelectLevelRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let command = commands::SelectLevel {
        correlation_id: Uuid::new_v4(),
        game_id,
        level_index: request.level_index,
    };

    info!(correlation_id = %command.correlation_id, "handling select_level command");

    let catalogs = state.catalogs()?;
    let result = command_handlers::handle_select_level(
        &command,
        &catalogs,
        &state.game_config,
        state.clock.as_ref(),
        &state.rng,
        &*state.event_repository,
    )
    .await?;

    after_command(&state, result)
}

/// POST /{game_id}/spin
#[instrument(skip_all, fields(game_id = %game_id))]
async fn spin(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameResponse>, ApiError> {
    let command = commands::Spin {
        correlation_id: Uuid::new_v4(),
        game_id,
    };

    info!(correlation_id = %command.correlation_id, "handling spin command");

    let catalogs = state.catalogs()?;
    let result = command_handlers::handle_spin(
        &command,
        &catalogs,
        &state.game_config,
        state.clock.as_ref(),
        &state.rng,
        &*state.event_repository,
    )
    .await?;

    after_command(&state, result)
}

/// POST /{game_id}/change-joker
#[instrument(skip_all, fields(game_id = %game_id))]
async fn change_joker(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameResponse>, ApiError> {
    let command = commands::ChangeJoker {
        correlation_id: Uuid::new_v4(),
        game_id,
    };

    info!(correlation_id = %command.correlation_id, "handling change_joker command");

    let catalogs = state.catalogs()?;
    let result = command_handlers::handle_change_joker(
        &command,
        &catalogs,
        &state.game_config,
        state.clock.as_ref(),
        &state.rng,
        &*state.event_repository,
    )
    .await?;

    after_command(&state, result)
}

/// POST /{game_id}/start-countdown
#[instrument(skip_all, fields(game_id = %game_id))]
async fn start_countdown(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<Countdown>, ApiError> {
    let command = commands::StartCountdown {
        correlation_id: Uuid::new_v4(),
        game_id,
    };

    info!(correlation_id = %command.correlation_id, "handling start_countdown command");

    let countdown =
        command_handlers::handle_start_countdown(&command, &*state.event_repository).await?;
    state.countdowns.start(game_id, countdown)?;

    Ok(Json(countdown))
}

/// Returns the router for game sessions.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_game))
        .route("/{game_id}", get(get_game))
        .route("/{game_id}/participants", post(add_participant))
        .route("/{game_id}/participants/{index}", delete(remove_participant))
        .route("/{game_id}/auto-populate", post(auto_populate))
        .route("/{game_id}/select-level", post(select_level))
        .route("/{game_id}/spin", post(spin))
        .route("/{game_id}/change-joker", post(change_joker))
        .route("/{game_id}/start-countdown", post(start_countdown))
}
