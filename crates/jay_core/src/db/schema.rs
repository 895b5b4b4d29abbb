//! Catalogue schema creation and version guard.
//!
//! There is exactly one schema version. Stores stamped with a newer version
//! were written by a newer binary and are refused rather than reinterpreted.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Version stamped into `PRAGMA user_version` once the schema exists.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates catalogue tables when missing and stamps the schema version.
pub fn apply_schema(conn: &mut Connection) -> DbResult<()> {
    let current = schema_version(conn)?;

    if current > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: SCHEMA_VERSION,
        });
    }

    if current == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    Ok(())
}

/// Reads the version stamp of an open store.
///
/// `user_version` is a signed 32-bit field; negative stamps were never
/// written by this crate and are rejected.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let raw = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, i64>(0))?;
    u32::try_from(raw).map_err(|_| DbError::InvalidSchemaVersion(raw))
}
