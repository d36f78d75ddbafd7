//! Compatibility-constrained rejection sampling over the roster.
//!
//! Each sampler draws indices independently and uniformly, then rejects the
//! draw unless every pair in it is compatible. After `max_attempts` rejected
//! draws the sampler gives up and returns `None`, which callers treat as a
//! definitive "no valid combination" rather than a transient failure. A
//! roster smaller than the requested count returns `None` without drawing.

use roulette_core::rng::{DeterministicRng, pick, pick_index};

use super::participant::{Participant, is_compatible};

/// One participant, optionally excluding a name.
pub fn sample_one<'a>(
    roster: &'a [Participant],
    exclude: Option<&str>,
    rng: &mut dyn DeterministicRng,
) -> Option<&'a Participant> {
    match exclude {
        None => pick(rng, roster),
        Some(name) => {
            let candidates: Vec<&Participant> =
                roster.iter().filter(|p| !p.has_name(name)).collect();
            pick(rng, &candidates).copied()
        }
    }
}

fn draw<'a>(roster: &'a [Participant], rng: &mut dyn DeterministicRng) -> Option<&'a Participant> {
    pick_index(rng, roster.len()).and_then(|i| roster.get(i))
}

/// Two mutually compatible participants.
pub fn sample_compatible_pair<'a>(
    roster: &'a [Participant],
    max_attempts: u32,
    rng: &mut dyn DeterministicRng,
) -> Option<(&'a Participant, &'a Participant)> {
    if roster.len() < 2 {
        return None;
    }
    for _ in 0..max_attempts {
        let (a, b) = (draw(roster, rng)?, draw(roster, rng)?);
        if is_compatible(a, b) {
            return Some((a, b));
        }
    }
    None
}

/// Three pairwise compatible participants.
pub fn sample_compatible_triple<'a>(
    roster: &'a [Participant],
    max_attempts: u32,
    rng: &mut dyn DeterministicRng,
) -> Option<(&'a Participant, &'a Participant, &'a Participant)> {
    if roster.len() < 3 {
        return None;
    }
    for _ in 0..max_attempts {
        let (a, b, c) = (draw(roster, rng)?, draw(roster, rng)?, draw(roster, rng)?);
        if is_compatible(a, b) && is_compatible(a, c) && is_compatible(b, c) {
            return Some((a, b, c));
        }
    }
    None
}
