//! Commands for the game context.

use roulette_catalog::domain::catalog::GenderTag;
use roulette_core::command::Command;
use uuid::Uuid;

/// Start a new game session with an empty roster.
#[derive(Debug, Clone)]
pub struct CreateGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for CreateGame {
    fn command_type(&self) -> &'static str {
        "game.create"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Register a participant.
#[derive(Debug, Clone)]
pub struct AddParticipant {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game session.
    pub game_id: Uuid,
    /// Display name; trimmed before validation.
    pub name: String,
    /// Gender tag.
    pub gender_tag: GenderTag,
    /// Whether they play with others of the same tag.
    pub accepts_same_gender: bool,
}

impl Command for AddParticipant {
    fn command_type(&self) -> &'static str {
        "game.add_participant"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Deregister the participant at a roster position.
#[derive(Debug, Clone)]
pub struct RemoveParticipant {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game session.
    pub game_id: Uuid,
    /// Zero-based roster position.
    pub index: usize,
}

impl Command for RemoveParticipant {
    fn command_type(&self) -> &'static str {
        "game.remove_participant"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Replace the roster with generated participants.
#[derive(Debug, Clone)]
pub struct AutoPopulate {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game session.
    pub game_id: Uuid,
    /// Number of participants to generate.
    pub count: usize,
}

impl Command for AutoPopulate {
    fn command_type(&self) -> &'static str {
        "game.auto_populate"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Jump to a level directly.
#[derive(Debug, Clone)]
pub struct SelectLevel {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game session.
    pub game_id: Uuid,
    /// Zero-based level index.
    pub level_index: usize,
}

impl Command for SelectLevel {
    fn command_type(&self) -> &'static str {
        "game.select_level"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Play one round.
#[derive(Debug, Clone)]
pub struct Spin {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game session.
    pub game_id: Uuid,
}

impl Command for Spin {
    fn command_type(&self) -> &'static str {
        "game.spin"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Swap the current joker challenge for another one.
#[derive(Debug, Clone)]
pub struct ChangeJoker {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game session.
    pub game_id: Uuid,
}

impl Command for ChangeJoker {
    fn command_type(&self) -> &'static str {
        "game.change_joker"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Start the countdown of the current outcome.
#[derive(Debug, Clone)]
pub struct StartCountdown {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game session.
    pub game_id: Uuid,
}

impl Command for StartCountdown {
    fn command_type(&self) -> &'static str {
        "game.start_countdown"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
