//! Roulette Core — shared domain abstractions.
//!
//! Traits and value types every other crate in the workspace builds on:
//! event-sourced aggregates, repositories, the injected clock and random
//! source, and the domain error taxonomy. No infrastructure code lives here.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod repository;
pub mod rng;
