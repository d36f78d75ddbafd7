//! Per-participant, per-level participation counters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::levels::LEVEL_COUNT;
use super::participant::Participant;

/// How many standard rounds each participant has played at each level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipationCounters(BTreeMap<String, [u32; LEVEL_COUNT]>);

impl ParticipationCounters {
    /// Zeroed counters for every participant of `roster`.
    #[must_use]
    pub fn for_roster(roster: &[Participant]) -> Self {
        Self(
            roster
                .iter()
                .map(|p| (p.name.clone(), [0; LEVEL_COUNT]))
                .collect(),
        )
    }

    /// Count of `name` at `level_index`; 0 for unknown names or levels.
    #[must_use]
    pub fn count(&self, name: &str, level_index: usize) -> u32 {
        self.0
            .get(name)
            .and_then(|levels| levels.get(level_index))
            .copied()
            .unwrap_or(0)
    }

    /// Adds one round for `name` at `level_index`.
    pub fn increment(&mut self, name: &str, level_index: usize) {
        let levels = self.0.entry(name.to_owned()).or_insert([0; LEVEL_COUNT]);
        if let Some(count) = levels.get_mut(level_index) {
            *count += 1;
        }
    }

    /// Zeroes every participant's count at `level_index`.
    pub fn reset_level(&mut self, level_index: usize) {
        for levels in self.0.values_mut() {
            if let Some(count) = levels.get_mut(level_index) {
                *count = 0;
            }
        }
    }

    /// Zeroes every count.
    pub fn reset_all(&mut self) {
        for levels in self.0.values_mut() {
            *levels = [0; LEVEL_COUNT];
        }
    }

    /// Whether any participant reached `threshold` at `level_index`.
    #[must_use]
    pub fn any_reached(&self, level_index: usize, threshold: u32) -> bool {
        self.0
            .values()
            .any(|levels| levels.get(level_index).is_some_and(|&c| c >= threshold))
    }
}

#[cfg(test)]
mod tests {
    use roulette_catalog::domain::catalog::GenderTag;

    use super::*;

    fn roster() -> Vec<Participant> {
        vec![
            Participant::new("Alice", GenderTag::B, true),
            Participant::new("Bob", GenderTag::A, true),
        ]
    }

    #[test]
    fn test_for_roster_covers_every_participant_at_zero() {
        let counters = ParticipationCounters::for_roster(&roster());

        for level in 0..LEVEL_COUNT {
            assert_eq!(counters.count("Alice", level), 0);
            assert_eq!(counters.count("Bob", level), 0);
        }
    }

    #[test]
    fn test_reset_level_leaves_other_levels_alone() {
        let mut counters = ParticipationCounters::for_roster(&roster());
        counters.increment("Alice", 0);
        counters.increment("Alice", 1);

        counters.reset_level(0);

        assert_eq!(counters.count("Alice", 0), 0);
        assert_eq!(counters.count("Alice", 1), 1);
    }

    #[test]
    fn test_any_reached_checks_only_the_given_level() {
        let mut counters = ParticipationCounters::for_roster(&roster());
        for _ in 0..5 {
            counters.increment("Bob", 2);
        }

        assert!(counters.any_reached(2, 5));
        assert!(!counters.any_reached(1, 5));
        assert!(!counters.any_reached(2, 6));
    }

    #[test]
    fn test_reset_all_zeroes_everything() {
        let mut counters = ParticipationCounters::for_roster(&roster());
        counters.increment("Alice", 3);
        counters.increment("Bob", 0);

        counters.reset_all();

        assert_eq!(counters, ParticipationCounters::for_roster(&roster()));
    }
}
