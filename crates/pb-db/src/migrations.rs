//! Embedded SQL migrations and runner.
//!
//! Migrations are stored as `&str` constants and executed in order.  A
//! `schema_migrations` table tracks which versions have been applied.

use pb_core::{Error, Result};
use rusqlite::Connection;

/// V1: initial schema -- peaks, climbers, their association, and climbs.
const V1_INITIAL: &str = r#"
CREATE TABLE peaks (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL,
    color TEXT NOT NULL
);

CREATE TABLE climbers (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    breed       TEXT NOT NULL,
    description TEXT NOT NULL,
    age         INTEGER NOT NULL
);

-- Many-to-many: which peaks a climber has.
CREATE TABLE climber_peaks (
    climber_id INTEGER NOT NULL REFERENCES climbers(id) ON DELETE CASCADE,
    peak_id    INTEGER NOT NULL REFERENCES peaks(id) ON DELETE CASCADE,
    PRIMARY KEY (climber_id, peak_id)
);

CREATE TABLE climbs (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    date       TEXT NOT NULL,
    time       TEXT NOT NULL DEFAULT 'M' CHECK (time IN ('M', 'E', 'N')),
    climber_id INTEGER NOT NULL REFERENCES climbers(id) ON DELETE CASCADE
);

CREATE INDEX idx_climbs_climber_id ON climbs(climber_id);
"#;

/// V2: index for the default newest-first climb ordering and peak lookups.
const V2_ORDERING_INDEXES: &str = r#"
CREATE INDEX idx_climbs_date ON climbs(date DESC);
CREATE INDEX idx_climber_peaks_peak ON climber_peaks(peak_id);
"#;

/// Ordered list of (version, sql) pairs.
const MIGRATIONS: &[(i64, &str)] = &[(1, V1_INITIAL), (2, V2_ORDERING_INDEXES)];

/// Run all pending migrations on `conn`.
///
/// Creates the `schema_migrations` tracking table if it does not exist,
/// then applies each outstanding migration inside a transaction. Returns
/// the number of migrations applied.
pub fn run_migrations(conn: &Connection) -> Result<usize> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .map_err(|e| Error::database(format!("Failed to create schema_migrations: {e}")))?;

    let mut applied = 0;
    for &(version, sql) in MIGRATIONS {
        let already: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM schema_migrations WHERE version = ?1",
                [version],
                |row| row.get(0),
            )
            .map_err(|e| Error::database(e.to_string()))?;

        if already {
            continue;
        }

        let tx = conn
            .unchecked_transaction()
            .map_err(|e| Error::database(e.to_string()))?;

        tx.execute_batch(sql)
            .map_err(|e| Error::database(format!("Migration V{version} failed: {e}")))?;

        tx.execute(
            "INSERT INTO schema_migrations (version) VALUES (?1)",
            [version],
        )
        .map_err(|e| Error::database(e.to_string()))?;

        tx.commit().map_err(|e| Error::database(e.to_string()))?;

        tracing::debug!(version, "Applied migration");
        applied += 1;
    }

    Ok(applied)
}

/// Highest migration version recorded in `schema_migrations`.
pub fn current_version(conn: &Connection) -> Result<i64> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )
    .map_err(|e| Error::database(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_migrations(&conn).unwrap(), MIGRATIONS.len());
        // second call is a no-op
        assert_eq!(run_migrations(&conn).unwrap(), 0);
        assert_eq!(current_version(&conn).unwrap(), 2);
    }

    #[test]
    fn test_all_tables_created() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_migrations(&conn).unwrap();

        let tables = [
            "peaks",
            "climbers",
            "climber_peaks",
            "climbs",
            "schema_migrations",
        ];
        for t in &tables {
            let exists: bool = conn
                .query_row(
                    "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name=?1",
                    [t],
                    |row| row.get(0),
                )
                .unwrap();
            assert!(exists, "table {t} should exist");
        }
    }

    #[test]
    fn test_time_check_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_migrations(&conn).unwrap();
        conn.execute(
            "INSERT INTO climbers (name, breed, description, age) VALUES ('A', 'B', 'C', 1)",
            [],
        )
        .unwrap();

        let bad = conn.execute(
            "INSERT INTO climbs (date, time, climber_id) VALUES ('2024-01-01', 'X', 1)",
            [],
        );
        assert!(bad.is_err());

        conn.execute(
            "INSERT INTO climbs (date, climber_id) VALUES ('2024-01-01', 1)",
            [],
        )
        .unwrap();
        let time: String = conn
            .query_row("SELECT time FROM climbs", [], |row| row.get(0))
            .unwrap();
        assert_eq!(time, "M");
    }

    #[test]
    fn test_climb_requires_climber() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_migrations(&conn).unwrap();

        let orphan = conn.execute(
            "INSERT INTO climbs (date, climber_id) VALUES ('2024-01-01', 99)",
            [],
        );
        assert!(orphan.is_err());
    }
}
