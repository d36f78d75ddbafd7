//! Undressing narration played on the level 2 and level 4 transitions.

use std::fmt;

use roulette_core::error::DomainError;
use roulette_core::rng::{DeterministicRng, shuffle};
use serde::{Deserialize, Serialize};

use super::participant::{Participant, is_compatible};

/// Verb used in every narration line.
pub const UNDRESS_VERB: &str = "undresses";

/// How far a target ends up undressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetState {
    /// Down to underwear.
    Underwear,
    /// Completely.
    Full,
}

impl TargetState {
    /// Phrase closing a narration line.
    #[must_use]
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::Underwear => "down to their underwear",
            Self::Full => "completely",
        }
    }
}

/// One actor undressing one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationLine {
    /// Who undresses.
    pub actor: String,
    /// Narration verb.
    pub verb: String,
    /// Who is undressed.
    pub target: String,
    /// How far.
    pub target_state: TargetState,
}

impl fmt::Display for NarrationLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}.",
            self.actor,
            self.verb,
            self.target,
            self.target_state.phrase()
        )
    }
}

/// Assigns a compatible actor to every participant, in roster order.
///
/// Candidates are shuffled per target; an actor different from the previous
/// line's actor is preferred when one is available.
///
/// # Errors
///
/// Returns `DomainError::NoCompatibleActor` naming the first target nobody
/// can undress.
pub fn generate_narration(
    roster: &[Participant],
    verb: &str,
    target_state: TargetState,
    rng: &mut dyn DeterministicRng,
) -> Result<Vec<NarrationLine>, DomainError> {
    let mut lines: Vec<NarrationLine> = Vec::with_capacity(roster.len());

    for target in roster {
        let mut candidates: Vec<&Participant> = roster
            .iter()
            .filter(|p| p.name != target.name && is_compatible(p, target))
            .collect();
        shuffle(rng, &mut candidates);

        let previous = lines.last().map(|line| line.actor.as_str());
        let actor = candidates
            .iter()
            .find(|c| Some(c.name.as_str()) != previous)
            .or_else(|| candidates.first())
            .ok_or_else(|| DomainError::NoCompatibleActor {
                target: target.name.clone(),
            })?;

        lines.push(NarrationLine {
            actor: actor.name.clone(),
            verb: verb.to_owned(),
            target: target.name.clone(),
            target_state,
        });
    }

    Ok(lines)
}
