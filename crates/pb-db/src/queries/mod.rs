//! Database query modules.

pub mod climbers;
pub mod climbs;
pub mod peaks;

use rusqlite::ffi;

/// True when `err` is SQLite rejecting a row whose parent was deleted (or
/// never existed).
pub(crate) fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}
