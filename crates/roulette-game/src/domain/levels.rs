//! The six fixed levels and what happens when one is completed.

use roulette_catalog::domain::catalog::Tier;
use serde::Serialize;

use super::narration::TargetState;

/// Number of levels.
pub const LEVEL_COUNT: usize = 6;

/// Index of the group-challenge level, the last one.
pub const FINAL_LEVEL_INDEX: usize = LEVEL_COUNT - 1;

/// One row of the level table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Level {
    /// Zero-based position.
    pub index: usize,
    /// Catalog key, `level1`..`level6`.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Tier the action is drawn from.
    pub action_tier: Tier,
    /// Tier the zone is drawn from.
    pub zone_tier: Tier,
}

/// The level table, in play order.
pub const LEVELS: [Level; LEVEL_COUNT] = [
    Level {
        index: 0,
        id: "level1",
        name: "Level 1 (Gentle)",
        action_tier: Tier::Gentle,
        zone_tier: Tier::Gentle,
    },
    Level {
        index: 1,
        id: "level2",
        name: "Level 2 (Medium)",
        action_tier: Tier::Medium,
        zone_tier: Tier::Gentle,
    },
    Level {
        index: 2,
        id: "level3",
        name: "Level 3 (Intermediate)",
        action_tier: Tier::Medium,
        zone_tier: Tier::Medium,
    },
    Level {
        index: 3,
        id: "level4",
        name: "Level 4 (Intense)",
        action_tier: Tier::Intense,
        zone_tier: Tier::Medium,
    },
    Level {
        index: 4,
        id: "level5",
        name: "Level 5 (Ultimate)",
        action_tier: Tier::Intense,
        zone_tier: Tier::Intense,
    },
    Level {
        index: 5,
        id: "level6",
        name: "Level 6 (Ultimate Fusion)",
        action_tier: Tier::Fusion,
        zone_tier: Tier::Intense,
    },
];

/// The level at `index`, if it exists.
#[must_use]
pub fn level(index: usize) -> Option<&'static Level> {
    LEVELS.get(index)
}

/// Side effect of completing a level, applied before the next one starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    /// Move on silently.
    None,
    /// Everyone is undressed to the given state by a compatible partner.
    Narration(TargetState),
    /// The roster is split into groups for the final level.
    Groups,
}

/// What completing the level at `from` triggers.
#[must_use]
pub const fn transition_effect(from: usize) -> TransitionEffect {
    match from {
        1 => TransitionEffect::Narration(TargetState::Underwear),
        3 => TransitionEffect::Narration(TargetState::Full),
        4 => TransitionEffect::Groups,
        _ => TransitionEffect::None,
    }
}

/// Title and message announcing the completion of level `from`, for the
/// transitions that have a side effect.
#[must_use]
pub const fn transition_announcement(from: usize) -> Option<(&'static str, &'static str)> {
    match from {
        1 => Some((
            "Level 2 complete: down to underwear!",
            "Before Level 3 starts, everyone is undressed down to their underwear.",
        )),
        3 => Some((
            "Level 4 complete: fully undressed!",
            "Before Level 5 starts, everyone is undressed completely.",
        )),
        4 => Some((
            "Level 5 complete: ultimate fusion!",
            "The group splits into pairs and trios for the final challenges.",
        )),
        _ => None,
    }
}
