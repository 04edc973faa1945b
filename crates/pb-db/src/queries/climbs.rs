//! Climb operations.
//!
//! Every list is newest first: `date` descending, then insertion order
//! descending for climbs on the same day.

use chrono::NaiveDate;
use pb_core::{fields, ClimbId, ClimbTime, ClimberId, Error, Result};
use rusqlite::Connection;

use crate::models::{format_date, Climb};
use crate::queries::{climbers, is_foreign_key_violation};

const COLS: &str = "id, date, time, climber_id";
const ORDER: &str = "ORDER BY date DESC, id DESC";

/// Record a climb for `climber_id`.
///
/// When `time` is `None` the column default applies, which is Morning.
pub fn create_climb(
    conn: &Connection,
    climber_id: ClimberId,
    date: NaiveDate,
    time: Option<ClimbTime>,
) -> Result<Climb> {
    fields::validate_climb_date(date)?;
    if climbers::get_climber(conn, climber_id)?.is_none() {
        return Err(Error::not_found("climber", climber_id));
    }

    let date_str = format_date(date);
    let inserted = match time {
        Some(t) => conn.execute(
            "INSERT INTO climbs (date, time, climber_id) VALUES (?1, ?2, ?3)",
            rusqlite::params![date_str, t.code(), climber_id.get()],
        ),
        None => conn.execute(
            "INSERT INTO climbs (date, climber_id) VALUES (?1, ?2)",
            rusqlite::params![date_str, climber_id.get()],
        ),
    };
    inserted.map_err(|e| {
        // The climber can be deleted between the check above and the insert.
        if is_foreign_key_violation(&e) {
            Error::not_found("climber", climber_id)
        } else {
            Error::database(e.to_string())
        }
    })?;

    let id = ClimbId::from(conn.last_insert_rowid());
    get_climb(conn, id)?.ok_or_else(|| Error::Internal(format!("climb {id} vanished after insert")))
}

/// Get a climb by ID.
pub fn get_climb(conn: &Connection, id: ClimbId) -> Result<Option<Climb>> {
    let q = format!("SELECT {COLS} FROM climbs WHERE id = ?1");
    let result = conn.query_row(&q, [id.get()], Climb::from_row);
    match result {
        Ok(c) => Ok(Some(c)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List every climb, newest first.
pub fn list_climbs(conn: &Connection) -> Result<Vec<Climb>> {
    let q = format!("SELECT {COLS} FROM climbs {ORDER}");
    let mut stmt = conn.prepare(&q).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([], Climb::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// List the climbs of one climber, newest first.
pub fn list_climbs_for_climber(conn: &Connection, climber_id: ClimberId) -> Result<Vec<Climb>> {
    let q = format!("SELECT {COLS} FROM climbs WHERE climber_id = ?1 {ORDER}");
    let mut stmt = conn.prepare(&q).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([climber_id.get()], Climb::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Change the date and time of a climb. Returns false if it does not exist.
pub fn update_climb(conn: &Connection, id: ClimbId, date: NaiveDate, time: ClimbTime) -> Result<bool> {
    fields::validate_climb_date(date)?;
    let n = conn
        .execute(
            "UPDATE climbs SET date = ?1, time = ?2 WHERE id = ?3",
            rusqlite::params![format_date(date), time.code(), id.get()],
        )
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

/// Delete a climb.
pub fn delete_climb(conn: &Connection, id: ClimbId) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM climbs WHERE id = ?1", [id.get()])
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}
