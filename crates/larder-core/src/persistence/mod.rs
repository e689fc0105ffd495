//! Persistence layer for stored items
//!
//! Provides SQLite-backed storage; the sole source of truth for item rows.

mod repository;
mod schema;

pub use repository::Repository;
pub use schema::Schema;
