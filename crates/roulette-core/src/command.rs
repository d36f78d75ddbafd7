//! Command abstractions.

use uuid::Uuid;

/// A request to change a game session or catalog.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted name such as `game.spin`, used for logging.
    fn command_type(&self) -> &'static str;

    /// Correlation ID linking the command to the events it produces.
    fn correlation_id(&self) -> Uuid;
}
