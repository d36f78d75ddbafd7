//! Catalog domain types and pure helpers.

pub mod catalog;
pub mod commands;
pub mod defaults;
pub mod markdown;
pub mod version;
