//! Domain error types.
//!
//! Every failure is recoverable at the command boundary: the command that
//! raised it is aborted and no events are persisted.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No events exist for the requested aggregate.
    #[error("aggregate not found: {0}")]
    AggregateNotFound(Uuid),

    /// Optimistic concurrency conflict.
    #[error("concurrency conflict on aggregate {aggregate_id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        /// The aggregate that had the conflict.
        aggregate_id: Uuid,
        /// The expected version.
        expected: i64,
        /// The actual version found.
        actual: i64,
    },

    /// Input rejected by a domain rule (duplicate name, bad index, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// The roster is too small for the requested operation.
    #[error("insufficient participants: {required} required, {available} available")]
    InsufficientParticipants {
        /// Minimum number of participants the operation needs.
        required: usize,
        /// Number of participants currently registered.
        available: usize,
    },

    /// The sampling retry budget ran out without a valid draw.
    #[error("no valid combination: {0}")]
    NoValidCombination(String),

    /// Undressing narration could not find a compatible actor.
    #[error("no compatible participant can undress {target}")]
    NoCompatibleActor {
        /// Name of the participant left without an actor.
        target: String,
    },

    /// A catalog list needed by the current level is empty.
    #[error("catalog is empty: {0}")]
    EmptyCatalog(String),

    /// The event repository or content store failed.
    #[error("persistence failure: {0}")]
    PersistenceFailure(String),

    /// Stored data could not be decoded, or a shared resource is unusable.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_participants_message_names_both_counts() {
        let err = DomainError::InsufficientParticipants {
            required: 2,
            available: 1,
        };

        assert_eq!(
            err.to_string(),
            "insufficient participants: 2 required, 1 available"
        );
    }

    #[test]
    fn test_no_compatible_actor_message_names_target() {
        let err = DomainError::NoCompatibleActor {
            target: "Alice".to_owned(),
        };

        assert_eq!(err.to_string(), "no compatible participant can undress Alice");
    }
}
