//! Round generation: one standard or joker outcome per spin.

use roulette_catalog::domain::catalog::{Catalogs, JokerTemplate, PlayersNeeded};
use roulette_catalog::domain::markdown::escape;
use roulette_core::error::DomainError;
use roulette_core::rng::{DeterministicRng, pick};
use serde::{Deserialize, Serialize};

use super::levels::{FINAL_LEVEL_INDEX, Level};
use super::participant::Participant;
use super::sampler::{sample_compatible_pair, sample_compatible_triple, sample_one};
use crate::config::GameConfig;

/// Result of the last spin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundOutcome {
    /// `participant1` performs `action` on `zone` of `participant2`.
    Standard {
        /// Who acts.
        participant1: String,
        /// Action phrase.
        action: String,
        /// Body zone of `participant2`.
        zone: String,
        /// Who receives.
        participant2: String,
        /// Round length.
        countdown_seconds: u32,
    },
    /// A scripted challenge replacing the standard draw.
    Joker {
        /// Template identifier.
        challenge_id: String,
        /// Markdown template text with names substituted (escaped).
        challenge_text: String,
        /// Participants named by the challenge, in slot order.
        participants: Vec<String>,
        /// Props the challenge calls for.
        accessories: Vec<String>,
        /// Round length.
        countdown_seconds: u32,
    },
    /// Level 6: the groups play their challenges for this long.
    Fusion {
        /// Challenge length.
        countdown_seconds: u32,
    },
    /// Nothing to show.
    #[default]
    Empty,
}

impl RoundOutcome {
    /// Countdown attached to the outcome, if any.
    #[must_use]
    pub const fn countdown_seconds(&self) -> Option<u32> {
        match self {
            Self::Standard {
                countdown_seconds, ..
            }
            | Self::Joker {
                countdown_seconds, ..
            }
            | Self::Fusion { countdown_seconds } => Some(*countdown_seconds),
            Self::Empty => None,
        }
    }

    /// Whether the outcome is a joker.
    #[must_use]
    pub const fn is_joker(&self) -> bool {
        matches!(self, Self::Joker { .. })
    }
}

/// Uniform countdown from `{step, 2*step, .., steps*step}` seconds.
pub fn roll_countdown(config: &GameConfig, rng: &mut dyn DeterministicRng) -> u32 {
    rng.next_u32_range(1, config.countdown_steps.max(1)) * config.countdown_step_seconds
}

/// Produces the outcome of one spin at a level below the final one.
///
/// # Errors
///
/// See [`generate_standard_round`] and [`generate_joker_round`].
pub fn generate_round(
    level: &Level,
    roster: &[Participant],
    catalogs: &Catalogs,
    config: &GameConfig,
    rng: &mut dyn DeterministicRng,
) -> Result<RoundOutcome, DomainError> {
    if level.index < FINAL_LEVEL_INDEX && rng.next_f64() < config.joker_probability {
        generate_joker_round(level, roster, catalogs, config, rng)
    } else {
        generate_standard_round(level, roster, catalogs, config, rng)
    }
}

/// Draws a compatible pair, an action of the level's action tier and a zone
/// fitting the second participant.
///
/// # Errors
///
/// - `DomainError::EmptyCatalog` if the level's action tier has no phrases.
/// - `DomainError::NoValidCombination` if no compatible pair exists, or no
///   zone could be found within `max_attempts` draws.
pub fn generate_standard_round(
    level: &Level,
    roster: &[Participant],
    catalogs: &Catalogs,
    config: &GameConfig,
    rng: &mut dyn DeterministicRng,
) -> Result<RoundOutcome, DomainError> {
    let actions = catalogs.actions.phrases(level.action_tier);
    if actions.is_empty() {
        return Err(DomainError::EmptyCatalog(format!(
            "no {} actions",
            level.action_tier
        )));
    }
    let zones = catalogs.body_parts.zones(level.zone_tier);

    for _ in 0..config.max_attempts {
        let (first, second) = sample_compatible_pair(roster, config.max_attempts, rng)
            .ok_or_else(|| {
                DomainError::NoValidCombination("no compatible pair in the roster".to_owned())
            })?;
        let Some(action) = pick(rng, actions) else {
            continue;
        };
        let pool = zones.map(|z| z.pool_for(second.gender_tag)).unwrap_or_default();
        let Some(zone) = pick(rng, &pool) else {
            continue;
        };
        return Ok(RoundOutcome::Standard {
            participant1: first.name.clone(),
            action: action.clone(),
            zone: (*zone).to_owned(),
            participant2: second.name.clone(),
            countdown_seconds: roll_countdown(config, rng),
        });
    }

    Err(DomainError::NoValidCombination(format!(
        "no {} zone available after {} attempts",
        level.zone_tier, config.max_attempts
    )))
}

/// Draws a joker template of the level and fills its player slots.
///
/// # Errors
///
/// - `DomainError::EmptyCatalog` if the level has no joker templates.
/// - `DomainError::InsufficientParticipants` if the roster is smaller than
///   the template needs.
/// - `DomainError::NoValidCombination` if the slots cannot be filled with
///   mutually compatible participants.
pub fn generate_joker_round(
    level: &Level,
    roster: &[Participant],
    catalogs: &Catalogs,
    config: &GameConfig,
    rng: &mut dyn DeterministicRng,
) -> Result<RoundOutcome, DomainError> {
    let template = pick(rng, catalogs.joker_challenges.templates(level.id)).ok_or_else(|| {
        DomainError::EmptyCatalog(format!("no joker challenges for {}", level.id))
    })?;
    let participants = fill_slots(template, roster, config, rng)?;

    Ok(RoundOutcome::Joker {
        challenge_id: template.id.clone(),
        challenge_text: substitute(&template.template, &participants),
        participants: participants.iter().map(|p| p.name.clone()).collect(),
        accessories: template.accessories.clone(),
        countdown_seconds: roll_countdown(config, rng),
    })
}

fn fill_slots<'a>(
    template: &JokerTemplate,
    roster: &'a [Participant],
    config: &GameConfig,
    rng: &mut dyn DeterministicRng,
) -> Result<Vec<&'a Participant>, DomainError> {
    let required = template.players_needed.count().unwrap_or(0);
    if roster.len() < required {
        return Err(DomainError::InsufficientParticipants {
            required,
            available: roster.len(),
        });
    }

    let sampled = match template.players_needed {
        PlayersNeeded::One => sample_one(roster, None, rng).map(|p| vec![p]),
        PlayersNeeded::Two => {
            sample_compatible_pair(roster, config.max_attempts, rng).map(|(a, b)| vec![a, b])
        }
        PlayersNeeded::Three => sample_compatible_triple(roster, config.max_attempts, rng)
            .map(|(a, b, c)| vec![a, b, c]),
        PlayersNeeded::All => Some(roster.iter().collect()),
    };
    sampled.ok_or_else(|| {
        DomainError::NoValidCombination(format!(
            "no compatible participants for joker {}",
            template.id
        ))
    })
}

fn substitute(template: &str, participants: &[&Participant]) -> String {
    participants
        .iter()
        .take(3)
        .enumerate()
        .fold(template.to_owned(), |text, (i, p)| {
            text.replace(&format!("{{player{}}}", i + 1), &escape(&p.name))
        })
}
