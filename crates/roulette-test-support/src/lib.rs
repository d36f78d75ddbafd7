//! Shared test doubles for the Roulette party game engine.

mod clock;
mod repository;
mod rng;

pub use clock::{FixedClock, fixed_clock};
pub use repository::{
    EmptyEventRepository, FailingDocumentStore, FailingEventRepository, RecordingEventRepository,
};
pub use rng::{CyclingRng, MockRng, SequenceRng};
