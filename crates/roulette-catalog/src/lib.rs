//! Roulette — content catalogs.
//!
//! Owns the three editable documents the game draws its text from (actions
//! by tier, body zones by tier and gender tag, joker templates by level),
//! their built-in defaults, and the handlers that load them from and save
//! them to a [`roulette_core::repository::DocumentStore`].

pub mod application;
pub mod domain;
