//! Roulette — game engine.
//!
//! A game session is an event-sourced aggregate holding the roster, the
//! current level, per-level participation counters and the last round
//! outcome. Every random decision goes through an injected
//! [`roulette_core::rng::DeterministicRng`].

pub mod application;
pub mod config;
pub mod domain;
