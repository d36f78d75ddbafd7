//! Game domain: participants, sampling, rounds, levels and the session
//! aggregate.

pub mod aggregates;
pub mod commands;
pub mod countdown;
pub mod counters;
pub mod events;
pub mod groups;
pub mod levels;
pub mod narration;
pub mod participant;
pub mod round;
pub mod sampler;
