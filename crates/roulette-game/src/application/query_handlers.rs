//! Query handlers for the game context.
//!
//! Sessions are replayed from their event stream on every query; the view
//! is a read-only snapshot shaped for the presentation layer.

use roulette_catalog::domain::markdown::render_html;
use roulette_core::aggregate::AggregateRoot;
use roulette_core::error::DomainError;
use roulette_core::repository::EventRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::aggregates::GameSession;
use crate::domain::counters::ParticipationCounters;
use crate::domain::events::LevelNotice;
use crate::domain::groups::GroupAssignment;
use crate::domain::levels::{LEVELS, Level};
use crate::domain::participant::Participant;
use crate::domain::round::RoundOutcome;

/// Read-only view of a game session.
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    /// The game identifier.
    pub game_id: Uuid,
    /// Current version (event count).
    pub version: i64,
    /// Registered participants, in registration order.
    pub roster: Vec<Participant>,
    /// The active level.
    pub level: Level,
    /// Standard rounds played per participant and level.
    pub counters: ParticipationCounters,
    /// Outcome of the last spin.
    pub outcome: RoundOutcome,
    /// Joker text rendered to HTML, when the outcome is a joker.
    pub challenge_html: Option<String>,
    /// Groups, while the final level is active.
    pub groups: Option<GroupAssignment>,
    /// Announcement of the last level transition.
    pub notice: Option<LevelNotice>,
}

/// Builds the view of a replayed or freshly committed session.
pub(crate) fn to_view(session: &GameSession) -> GameView {
    let challenge_html = match session.outcome() {
        RoundOutcome::Joker { challenge_text, .. } => Some(render_html(challenge_text)),
        _ => None,
    };
    GameView {
        game_id: session.id,
        version: session.version(),
        roster: session.roster().to_vec(),
        level: LEVELS[session.level_index().min(LEVELS.len() - 1)],
        counters: session.counters().clone(),
        outcome: session.outcome().clone(),
        challenge_html,
        groups: session.groups().cloned(),
        notice: session.notice().cloned(),
    }
}

/// Retrieves a game session by its ID.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_game_by_id(
    game_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<GameView, DomainError> {
    let stored_events = repo.load_events(game_id).await?;
    if stored_events.is_empty() {
        return Err(DomainError::AggregateNotFound(game_id));
    }
    let session = command_handlers::reconstitute(game_id, &stored_events)?;
    Ok(to_view(&session))
}
