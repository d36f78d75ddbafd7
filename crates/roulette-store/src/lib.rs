//! Storage adapters for the Roulette party game engine.
//!
//! `PostgreSQL` implementations of the event repository and the catalog
//! document store, plus in-memory versions used when no database is
//! configured and in tests.

pub mod memory;
pub mod pg_document_store;
pub mod pg_event_repository;
pub mod schema;
