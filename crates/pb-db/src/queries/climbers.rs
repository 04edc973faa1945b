//! Climber CRUD operations and the climber/peak association.

use pb_core::{fields, ClimberId, Error, PeakId, Result};
use rusqlite::Connection;

use crate::models::{Climber, Peak};
use crate::queries::{is_foreign_key_violation, peaks};

const COLS: &str = "id, name, breed, description, age";
const PEAK_COLS: &str = "p.id, p.name, p.color";

/// Create a new climber.
pub fn create_climber(
    conn: &Connection,
    name: &str,
    breed: &str,
    description: &str,
    age: i32,
) -> Result<Climber> {
    fields::validate_climber(name, breed, description)?;

    conn.execute(
        "INSERT INTO climbers (name, breed, description, age) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![name, breed, description, age],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(Climber {
        id: ClimberId::from(conn.last_insert_rowid()),
        name: name.to_string(),
        breed: breed.to_string(),
        description: description.to_string(),
        age,
    })
}

/// Get a climber by ID.
pub fn get_climber(conn: &Connection, id: ClimberId) -> Result<Option<Climber>> {
    let q = format!("SELECT {COLS} FROM climbers WHERE id = ?1");
    let result = conn.query_row(&q, [id.get()], Climber::from_row);
    match result {
        Ok(c) => Ok(Some(c)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List all climbers ordered by name.
pub fn list_climbers(conn: &Connection) -> Result<Vec<Climber>> {
    let q = format!("SELECT {COLS} FROM climbers ORDER BY name, id");
    let mut stmt = conn.prepare(&q).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([], Climber::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Update every field of a climber. Returns false if the climber does not exist.
pub fn update_climber(
    conn: &Connection,
    id: ClimberId,
    name: &str,
    breed: &str,
    description: &str,
    age: i32,
) -> Result<bool> {
    fields::validate_climber(name, breed, description)?;

    let n = conn
        .execute(
            "UPDATE climbers SET name = ?1, breed = ?2, description = ?3, age = ?4 WHERE id = ?5",
            rusqlite::params![name, breed, description, age, id.get()],
        )
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

/// Delete a climber (cascades to its climbs and peak associations).
pub fn delete_climber(conn: &Connection, id: ClimberId) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM climbers WHERE id = ?1", [id.get()])
        .map_err(|e| Error::database(e.to_string()))?;
    if n > 0 {
        tracing::debug!(climber_id = %id, "Deleted climber and its climbs");
    }
    Ok(n > 0)
}

/// Associate a peak with a climber. No-op if already associated.
pub fn add_peak(conn: &Connection, climber_id: ClimberId, peak_id: PeakId) -> Result<()> {
    if get_climber(conn, climber_id)?.is_none() {
        return Err(Error::not_found("climber", climber_id));
    }
    if peaks::get_peak(conn, peak_id)?.is_none() {
        return Err(Error::not_found("peak", peak_id));
    }

    match conn.execute(
        "INSERT OR IGNORE INTO climber_peaks (climber_id, peak_id) VALUES (?1, ?2)",
        rusqlite::params![climber_id.get(), peak_id.get()],
    ) {
        Ok(_) => Ok(()),
        // One side was deleted between the checks above and the insert.
        Err(e) if is_foreign_key_violation(&e) => {
            if get_climber(conn, climber_id)?.is_none() {
                Err(Error::not_found("climber", climber_id))
            } else {
                Err(Error::not_found("peak", peak_id))
            }
        }
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Remove a peak from a climber. Returns true if an association was removed.
pub fn remove_peak(conn: &Connection, climber_id: ClimberId, peak_id: PeakId) -> Result<bool> {
    let n = conn
        .execute(
            "DELETE FROM climber_peaks WHERE climber_id = ?1 AND peak_id = ?2",
            rusqlite::params![climber_id.get(), peak_id.get()],
        )
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

/// Peaks associated with a climber, ordered by name.
pub fn list_peaks(conn: &Connection, climber_id: ClimberId) -> Result<Vec<Peak>> {
    let q = format!(
        "SELECT {PEAK_COLS} FROM peaks p
         JOIN climber_peaks cp ON cp.peak_id = p.id
         WHERE cp.climber_id = ?1
         ORDER BY p.name, p.id"
    );
    query_peaks(conn, &q, climber_id)
}

/// Peaks the climber does not have yet, ordered by name.
pub fn list_available_peaks(conn: &Connection, climber_id: ClimberId) -> Result<Vec<Peak>> {
    let q = format!(
        "SELECT {PEAK_COLS} FROM peaks p
         WHERE p.id NOT IN (SELECT peak_id FROM climber_peaks WHERE climber_id = ?1)
         ORDER BY p.name, p.id"
    );
    query_peaks(conn, &q, climber_id)
}

fn query_peaks(conn: &Connection, q: &str, climber_id: ClimberId) -> Result<Vec<Peak>> {
    let mut stmt = conn.prepare(q).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([climber_id.get()], Peak::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}
