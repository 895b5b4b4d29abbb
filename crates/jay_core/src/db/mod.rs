//! SQLite storage bootstrap.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the catalogue.
//! - Create the `containers` and `items` tables on first use.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write catalogue data before the schema exists.

use thiserror::Error;

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("store schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    #[error("store schema version {0} is not a valid version stamp")]
    InvalidSchemaVersion(i64),
}
