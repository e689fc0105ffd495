//! Larder Core - food storage tracking
//!
//! This crate provides the shared functionality for the larder tracker:
//!
//! - **Item**: the stored food entry, its request payload, and the derived
//!   days-left-until-expiry computation
//! - **Table**: pure presentation of an item list (date formatting,
//!   storage-type capitalization, expiring-soon count)
//! - **Form**: the add/edit form controller state machine
//! - **Persistence**: SQLite-backed storage for items
//!
//! The item store is the sole source of truth: `days_left` is never
//! persisted, and client-side state is rebuilt from the store after every
//! mutation.

pub mod error;
pub mod form;
pub mod item;
pub mod persistence;
pub mod table;

pub use error::{LarderError, PersistenceError, Result};
pub use form::{FormFields, FormState};
pub use item::{days_left, Item, ItemDraft};
pub use persistence::{Repository, Schema};
pub use table::{count_expiring, TableRow, EXPIRY_WINDOW_DAYS};
