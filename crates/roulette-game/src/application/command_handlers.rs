//! Command handlers for the game context.
//!
//! Each handler loads the session's event stream, replays it, runs one
//! domain method, appends the produced events with the replayed version as
//! the expected version, and answers with the updated view.

use std::sync::Mutex;

use roulette_catalog::domain::catalog::Catalogs;
use roulette_core::aggregate::AggregateRoot;
use roulette_core::clock::Clock;
use roulette_core::error::DomainError;
use roulette_core::event::{DomainEvent, EventMetadata};
use roulette_core::repository::{EventRepository, StoredEvent};
use roulette_core::rng::DeterministicRng;
use tracing::info;
use uuid::Uuid;

use crate::application::query_handlers::{self, GameView};
use crate::config::GameConfig;
use crate::domain::aggregates::GameSession;
use crate::domain::commands::{
    AddParticipant, AutoPopulate, ChangeJoker, CreateGame, RemoveParticipant, SelectLevel, Spin,
    StartCountdown,
};
use crate::domain::countdown::Countdown;
use crate::domain::events::{
    GameEvent, GameEventKind, LEVEL_ADVANCED_EVENT_TYPE, LEVEL_SELECTED_EVENT_TYPE,
};

/// Result of a game command.
#[derive(Debug)]
pub struct GameCommandResult {
    /// The game session affected by the command.
    pub aggregate_id: Uuid,
    /// The stored events produced and persisted.
    pub stored_events: Vec<StoredEvent>,
    /// The session after the events were applied.
    pub view: GameView,
}

fn to_stored_event(event: &GameEvent) -> StoredEvent {
    let meta = event.metadata();
    StoredEvent {
        event_id: meta.event_id,
        aggregate_id: meta.aggregate_id,
        event_type: event.event_type().to_owned(),
        payload: event.to_payload(),
        sequence_number: meta.sequence_number,
        correlation_id: meta.correlation_id,
        causation_id: meta.causation_id,
        occurred_at: meta.occurred_at,
    }
}

/// Reconstitutes a `GameSession` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub(crate) fn reconstitute(
    game_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<GameSession, DomainError> {
    let mut session = GameSession::new(game_id);
    for stored in existing_events {
        let kind: GameEventKind = serde_json::from_value(stored.payload.clone()).map_err(|e| {
            DomainError::Infrastructure(format!("event deserialization failed: {e}"))
        })?;
        let event = GameEvent {
            metadata: EventMetadata {
                event_id: stored.event_id,
                event_type: stored.event_type.clone(),
                aggregate_id: stored.aggregate_id,
                sequence_number: stored.sequence_number,
                correlation_id: stored.correlation_id,
                causation_id: stored.causation_id,
                occurred_at: stored.occurred_at,
            },
            kind,
        };
        session.apply(&event);
    }
    Ok(session)
}

/// Loads and replays a session that must already exist.
async fn load(game_id: Uuid, repo: &dyn EventRepository) -> Result<GameSession, DomainError> {
    let existing_events = repo.load_events(game_id).await?;
    if existing_events.is_empty() {
        return Err(DomainError::AggregateNotFound(game_id));
    }
    reconstitute(game_id, &existing_events)
}

/// Persists the session's uncommitted events, then applies them.
async fn persist(
    mut session: GameSession,
    repo: &dyn EventRepository,
) -> Result<GameCommandResult, DomainError> {
    let stored_events: Vec<StoredEvent> = session
        .uncommitted_events()
        .iter()
        .map(to_stored_event)
        .collect();

    repo.append_events(session.id, session.version(), &stored_events)
        .await?;
    session.commit();

    Ok(GameCommandResult {
        aggregate_id: session.id,
        stored_events,
        view: query_handlers::to_view(&session),
    })
}

/// Runs `f` with the shared RNG locked.
fn with_rng<T>(
    rng: &Mutex<dyn DeterministicRng + Send>,
    f: impl FnOnce(&mut dyn DeterministicRng) -> Result<T, DomainError>,
) -> Result<T, DomainError> {
    // Lock RNG only for the synchronous domain method, never across an await.
    let mut rng_guard = rng
        .lock()
        .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
    f(&mut *rng_guard)
}

fn log_level_change(correlation_id: Uuid, stored_events: &[StoredEvent], view: &GameView) {
    let changed = stored_events.iter().any(|e| {
        matches!(
            e.event_type.as_str(),
            LEVEL_ADVANCED_EVENT_TYPE | LEVEL_SELECTED_EVENT_TYPE
        )
    });
    if !changed {
        return;
    }
    info!(
        correlation_id = %correlation_id,
        game_id = %view.game_id,
        level = view.level.id,
        "level changed"
    );
    if let Some(groups) = &view.groups {
        info!(
            correlation_id = %correlation_id,
            game_id = %view.game_id,
            groups = groups.groups.len(),
            soloists = groups.soloists.len(),
            "groups formed"
        );
    }
}

/// Handles the `CreateGame` command: starts a new session with a fresh ID.
///
/// # Errors
///
/// Returns `DomainError` if appending fails.
pub async fn handle_create_game(
    command: &CreateGame,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<GameCommandResult, DomainError> {
    let mut session = GameSession::new(Uuid::new_v4());
    session.create(command.correlation_id, clock)?;
    let result = persist(session, repo).await?;

    info!(
        correlation_id = %command.correlation_id,
        game_id = %result.aggregate_id,
        "game created"
    );
    Ok(result)
}

/// Handles the `AddParticipant` command.
///
/// # Errors
///
/// Returns `DomainError` if the game does not exist, the participant is
/// rejected, or appending fails.
pub async fn handle_add_participant(
    command: &AddParticipant,
    config: &GameConfig,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<GameCommandResult, DomainError> {
    let mut session = load(command.game_id, repo).await?;
    session.add_participant(
        &command.name,
        command.gender_tag,
        command.accepts_same_gender,
        config,
        command.correlation_id,
        clock,
    )?;
    persist(session, repo).await
}

/// Handles the `RemoveParticipant` command.
///
/// # Errors
///
/// Returns `DomainError` if the game does not exist, the index is out of
/// range, or appending fails.
pub async fn handle_remove_participant(
    command: &RemoveParticipant,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<GameCommandResult, DomainError> {
    let mut session = load(command.game_id, repo).await?;
    session.remove_participant(command.index, command.correlation_id, clock)?;
    persist(session, repo).await
}

/// Handles the `AutoPopulate` command.
///
/// # Errors
///
/// Returns `DomainError` if the game does not exist, the count is out of
/// range, or appending fails.
pub async fn handle_auto_populate(
    command: &AutoPopulate,
    config: &GameConfig,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    repo: &dyn EventRepository,
) -> Result<GameCommandResult, DomainError> {
    let mut session = load(command.game_id, repo).await?;
    with_rng(rng, |rng| {
        session.auto_populate(command.count, config, command.correlation_id, clock, rng)
    })?;
    persist(session, repo).await
}

/// Handles the `SelectLevel` command.
///
/// # Errors
///
/// Returns `DomainError` if the game does not exist, the level is unknown,
/// groups cannot be formed, or appending fails.
pub async fn handle_select_level(
    command: &SelectLevel,
    catalogs: &Catalogs,
    config: &GameConfig,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    repo: &dyn EventRepository,
) -> Result<GameCommandResult, DomainError> {
    let mut session = load(command.game_id, repo).await?;
    with_rng(rng, |rng| {
        session.select_level(
            command.level_index,
            catalogs,
            config,
            command.correlation_id,
            clock,
            rng,
        )
    })?;
    let result = persist(session, repo).await?;
    log_level_change(command.correlation_id, &result.stored_events, &result.view);
    Ok(result)
}

/// Handles the `Spin` command: plays one round and, when a participant
/// completes the level, advances it.
///
/// # Errors
///
/// Returns `DomainError` if the game does not exist, the round cannot be
/// generated, or appending fails.
pub async fn handle_spin(
    command: &Spin,
    catalogs: &Catalogs,
    config: &GameConfig,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    repo: &dyn EventRepository,
) -> Result<GameCommandResult, DomainError> {
    let mut session = load(command.game_id, repo).await?;
    with_rng(rng, |rng| {
        session.spin(catalogs, config, command.correlation_id, clock, rng)
    })?;
    let result = persist(session, repo).await?;
    log_level_change(command.correlation_id, &result.stored_events, &result.view);
    Ok(result)
}

/// Handles the `ChangeJoker` command.
///
/// # Errors
///
/// Returns `DomainError` if the game does not exist, the current round is
/// not a joker, or appending fails.
pub async fn handle_change_joker(
    command: &ChangeJoker,
    catalogs: &Catalogs,
    config: &GameConfig,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    repo: &dyn EventRepository,
) -> Result<GameCommandResult, DomainError> {
    let mut session = load(command.game_id, repo).await?;
    with_rng(rng, |rng| {
        session.change_joker(catalogs, config, command.correlation_id, clock, rng)
    })?;
    persist(session, repo).await
}

/// Handles the `StartCountdown` command. Produces no events: the countdown
/// lives with whoever drives the ticks.
///
/// # Errors
///
/// Returns `DomainError` if the game does not exist or the current outcome
/// has no countdown.
pub async fn handle_start_countdown(
    command: &StartCountdown,
    repo: &dyn EventRepository,
) -> Result<Countdown, DomainError> {
    let session = load(command.game_id, repo).await?;
    let countdown = session.countdown()?;
    info!(
        correlation_id = %command.correlation_id,
        game_id = %command.game_id,
        seconds = countdown.total_seconds,
        "countdown started"
    );
    Ok(countdown)
}
