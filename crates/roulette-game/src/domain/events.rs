//! Domain events for the game context.

use roulette_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::groups::GroupAssignment;
use super::narration::NarrationLine;
use super::participant::Participant;
use super::round::RoundOutcome;

/// Event type name for `GameCreated`.
pub const GAME_CREATED_EVENT_TYPE: &str = "game.created";
/// Event type name for `ParticipantRegistered`.
pub const PARTICIPANT_REGISTERED_EVENT_TYPE: &str = "game.participant_registered";
/// Event type name for `ParticipantRemoved`.
pub const PARTICIPANT_REMOVED_EVENT_TYPE: &str = "game.participant_removed";
/// Event type name for `RosterPopulated`.
pub const ROSTER_POPULATED_EVENT_TYPE: &str = "game.roster_populated";
/// Event type name for `RoundSpun`.
pub const ROUND_SPUN_EVENT_TYPE: &str = "game.round_spun";
/// Event type name for `LevelAdvanced`.
pub const LEVEL_ADVANCED_EVENT_TYPE: &str = "game.level_advanced";
/// Event type name for `LevelSelected`.
pub const LEVEL_SELECTED_EVENT_TYPE: &str = "game.level_selected";
/// Event type name for `JokerChanged`.
pub const JOKER_CHANGED_EVENT_TYPE: &str = "game.joker_changed";
/// Event type name for `CountdownRerolled`.
pub const COUNTDOWN_REROLLED_EVENT_TYPE: &str = "game.countdown_rerolled";

/// Emitted when a game session is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameCreated {
    /// The game identifier.
    pub game_id: Uuid,
}

/// Emitted when a participant joins. Resets progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantRegistered {
    /// The new participant.
    pub participant: Participant,
}

/// Emitted when a participant leaves. Resets progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantRemoved {
    /// Roster position that was removed.
    pub index: usize,
    /// Name of the removed participant.
    pub name: String,
}

/// Emitted when the roster is replaced wholesale. Resets progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterPopulated {
    /// The new roster.
    pub participants: Vec<Participant>,
}

/// Emitted for every spin below the final level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSpun {
    /// Level the round was played at.
    pub level_index: usize,
    /// What was drawn.
    pub outcome: RoundOutcome,
}

/// Announcement shown when a level with a side effect is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelNotice {
    /// Short title.
    pub title: String,
    /// One-sentence message.
    pub message: String,
    /// Undressing narration, empty for the group transition.
    #[serde(default)]
    pub narration: Vec<NarrationLine>,
}

/// Emitted when a participant's counter reaches the threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelAdvanced {
    /// Level just completed.
    pub from: usize,
    /// Level now active.
    pub to: usize,
    /// Announcement, for transitions with a side effect.
    pub notice: Option<LevelNotice>,
    /// Groups, when entering the final level.
    pub groups: Option<GroupAssignment>,
    /// Group challenge countdown, when entering the final level.
    pub countdown_seconds: Option<u32>,
}

/// Emitted when a level is chosen directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSelected {
    /// Level now active.
    pub level_index: usize,
    /// Groups, when the final level is selected.
    pub groups: Option<GroupAssignment>,
    /// Group challenge countdown, when the final level is selected.
    pub countdown_seconds: Option<u32>,
}

/// Emitted when the current joker is swapped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JokerChanged {
    /// The replacement joker.
    pub outcome: RoundOutcome,
}

/// Emitted when a spin at the final level rolls a new group countdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownRerolled {
    /// New countdown length.
    pub seconds: u32,
}

/// Event payload variants for the game context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEventKind {
    /// A game session was created.
    GameCreated(GameCreated),
    /// A participant joined.
    ParticipantRegistered(ParticipantRegistered),
    /// A participant left.
    ParticipantRemoved(ParticipantRemoved),
    /// The roster was replaced.
    RosterPopulated(RosterPopulated),
    /// A round was played.
    RoundSpun(RoundSpun),
    /// The game moved to the next level.
    LevelAdvanced(LevelAdvanced),
    /// A level was chosen directly.
    LevelSelected(LevelSelected),
    /// The joker was swapped.
    JokerChanged(JokerChanged),
    /// The final-level countdown was re-rolled.
    CountdownRerolled(CountdownRerolled),
}

impl GameEventKind {
    /// Event type name of this payload.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::GameCreated(_) => GAME_CREATED_EVENT_TYPE,
            Self::ParticipantRegistered(_) => PARTICIPANT_REGISTERED_EVENT_TYPE,
            Self::ParticipantRemoved(_) => PARTICIPANT_REMOVED_EVENT_TYPE,
            Self::RosterPopulated(_) => ROSTER_POPULATED_EVENT_TYPE,
            Self::RoundSpun(_) => ROUND_SPUN_EVENT_TYPE,
            Self::LevelAdvanced(_) => LEVEL_ADVANCED_EVENT_TYPE,
            Self::LevelSelected(_) => LEVEL_SELECTED_EVENT_TYPE,
            Self::JokerChanged(_) => JOKER_CHANGED_EVENT_TYPE,
            Self::CountdownRerolled(_) => COUNTDOWN_REROLLED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the game context.
#[derive(Debug, Clone)]
pub struct GameEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: GameEventKind,
}

impl DomainEvent for GameEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("GameEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
