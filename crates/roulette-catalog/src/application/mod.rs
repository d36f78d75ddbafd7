//! Catalog load and save handlers.

pub mod command_handlers;
pub mod query_handlers;
