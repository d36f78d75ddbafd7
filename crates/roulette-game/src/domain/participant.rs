//! Participants and the compatibility rule.

use roulette_catalog::domain::catalog::GenderTag;
use roulette_core::error::DomainError;
use roulette_core::rng::{DeterministicRng, shuffle};
use serde::{Deserialize, Serialize};

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Display name, unique within the roster (case-insensitive).
    pub name: String,
    /// Gender tag, used for compatibility and zone selection.
    pub gender_tag: GenderTag,
    /// Whether this participant plays with others of the same tag.
    pub accepts_same_gender: bool,
}

impl Participant {
    /// Creates a participant.
    #[must_use]
    pub fn new(name: impl Into<String>, gender_tag: GenderTag, accepts_same_gender: bool) -> Self {
        Self {
            name: name.into(),
            gender_tag,
            accepts_same_gender,
        }
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Two participants can play together when they are different people and
/// either their tags differ or both accept the same tag.
#[must_use]
pub fn is_compatible(a: &Participant, b: &Participant) -> bool {
    if a.name == b.name {
        return false;
    }
    a.gender_tag != b.gender_tag || (a.accepts_same_gender && b.accepts_same_gender)
}

const GENDER_A_NAMES: [&str; 10] = [
    "Alex", "Ben", "Charles", "Damien", "Ethan", "Felix", "Gabriel", "Hugo", "Ivan", "Julian",
];

const GENDER_B_NAMES: [&str; 10] = [
    "Alice", "Beatrice", "Camille", "Daphne", "Emily", "Fanny", "Grace", "Helen", "Ines", "Jane",
];

/// Generates a roster of `count` participants for quick starts.
///
/// Tags alternate starting with A, names come from two shuffled pools, and
/// same-tag acceptance follows the pattern yes, yes, no, no, ...
///
/// # Errors
///
/// Returns `DomainError::Validation` if `count` is outside `min..=max`.
pub fn generate_roster(
    count: usize,
    min: usize,
    max: usize,
    rng: &mut dyn DeterministicRng,
) -> Result<Vec<Participant>, DomainError> {
    if !(min..=max).contains(&count) {
        return Err(DomainError::Validation(format!(
            "auto-populate count must be between {min} and {max}, got {count}"
        )));
    }

    let mut names_a = GENDER_A_NAMES;
    let mut names_b = GENDER_B_NAMES;
    shuffle(rng, &mut names_a);
    shuffle(rng, &mut names_b);

    Ok((0..count)
        .map(|i| {
            let (pool, tag) = if i % 2 == 0 {
                (&names_a, GenderTag::A)
            } else {
                (&names_b, GenderTag::B)
            };
            Participant::new(pool[(i / 2) % pool.len()], tag, i % 4 < 2)
        })
        .collect())
}
