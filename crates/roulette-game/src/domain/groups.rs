//! Group formation for the final level.
//!
//! A greedy pass over the shuffled roster: it takes the first cross-tag
//! compatible pair it finds (falling back to any compatible pair) until the
//! pool is empty, has one member left, or has exactly three left. Three
//! mutually compatible leftovers form a trio. It is not a maximum matching
//! and can leave soloists a smarter pairing would have placed.

use roulette_catalog::domain::catalog::{Catalogs, Tier};
use roulette_core::error::DomainError;
use roulette_core::rng::{DeterministicRng, pick, shuffle};
use serde::{Deserialize, Serialize};

use super::participant::{Participant, is_compatible};

/// Two or three participants sharing one fusion challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Members in formation order.
    pub members: Vec<Participant>,
    /// Fusion action and closing zone.
    pub challenge_text: String,
}

/// Result of group formation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAssignment {
    /// Groups in formation order.
    pub groups: Vec<Group>,
    /// Participants left without a group.
    pub soloists: Vec<Participant>,
}

/// Splits the roster into pairs, at most one trio, and soloists.
///
/// # Errors
///
/// - `DomainError::InsufficientParticipants` if the roster has fewer than 2
///   members.
/// - `DomainError::EmptyCatalog` if a group was formed but the fusion
///   actions or intense zones are empty.
pub fn form_groups(
    roster: &[Participant],
    catalogs: &Catalogs,
    rng: &mut dyn DeterministicRng,
) -> Result<GroupAssignment, DomainError> {
    if roster.len() < 2 {
        return Err(DomainError::InsufficientParticipants {
            required: 2,
            available: roster.len(),
        });
    }

    let mut pool: Vec<&Participant> = roster.iter().collect();
    shuffle(rng, &mut pool);

    let mut formed: Vec<Vec<&Participant>> = Vec::new();
    while pool.len() >= 2 && pool.len() != 3 {
        let Some((i, j)) = find_pair(&pool) else {
            break;
        };
        // j > i, so removing j first keeps i valid.
        let second = pool.remove(j);
        let first = pool.remove(i);
        formed.push(vec![first, second]);
    }

    let trio = matches!(
        pool.as_slice(),
        [a, b, c] if is_compatible(a, b) && is_compatible(a, c) && is_compatible(b, c)
    );
    if trio {
        formed.push(std::mem::take(&mut pool));
    }

    let groups = formed
        .into_iter()
        .map(|members| {
            Ok(Group {
                members: members.into_iter().cloned().collect(),
                challenge_text: compose_challenge(catalogs, rng)?,
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    Ok(GroupAssignment {
        groups,
        soloists: pool.into_iter().cloned().collect(),
    })
}

/// First cross-tag compatible pair in pool order, else the first compatible
/// pair of any kind.
fn find_pair(pool: &[&Participant]) -> Option<(usize, usize)> {
    let pairs = || {
        (0..pool.len())
            .flat_map(move |i| (i + 1..pool.len()).map(move |j| (i, j)))
            .filter(|&(i, j)| is_compatible(pool[i], pool[j]))
    };
    pairs()
        .find(|&(i, j)| pool[i].gender_tag != pool[j].gender_tag)
        .or_else(|| pairs().next())
}

fn compose_challenge(
    catalogs: &Catalogs,
    rng: &mut dyn DeterministicRng,
) -> Result<String, DomainError> {
    let action = pick(rng, catalogs.actions.phrases(Tier::Fusion))
        .ok_or_else(|| DomainError::EmptyCatalog("no fusion actions".to_owned()))?;
    let zones = catalogs
        .body_parts
        .zones(Tier::Intense)
        .map(|set| set.all())
        .unwrap_or_default();
    let zone = pick(rng, &zones)
        .ok_or_else(|| DomainError::EmptyCatalog("no intense zones".to_owned()))?;
    Ok(format!("{action}. The challenge ends with a kiss on {zone}."))
}
