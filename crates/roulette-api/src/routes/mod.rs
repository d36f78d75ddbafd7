//! Route modules: health check, games and catalogs.

pub mod catalogs;
pub mod games;
pub mod health;
