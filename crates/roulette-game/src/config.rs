//! Game tunables.

use serde::Deserialize;

/// Tunable parameters of the game engine.
///
/// Every field has a default, so a partial document (or none at all)
/// deserializes into a playable configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Attempt bound for rejection sampling, standard-round redraws and
    /// joker re-draws.
    pub max_attempts: u32,
    /// Counter value at which a participant completes a level.
    pub advancement_threshold: u32,
    /// Chance that a spin at levels 1 to 5 yields a joker.
    pub joker_probability: f64,
    /// Countdowns are multiples of this many seconds.
    pub countdown_step_seconds: u32,
    /// Number of countdown steps; the longest countdown is
    /// `countdown_step_seconds * countdown_steps`.
    pub countdown_steps: u32,
    /// Largest roster.
    pub max_participants: usize,
    /// Smallest roster that can spin.
    pub min_participants: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            advancement_threshold: 5,
            joker_probability: 0.25,
            countdown_step_seconds: 5,
            countdown_steps: 12,
            max_participants: 10,
            min_participants: 2,
        }
    }
}
