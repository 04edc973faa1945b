//! Peak CRUD operations.

use pb_core::{fields, Error, PeakId, Result};
use rusqlite::Connection;

use crate::models::Peak;

const COLS: &str = "id, name, color";

/// Create a new peak.
pub fn create_peak(conn: &Connection, name: &str, color: &str) -> Result<Peak> {
    fields::validate_peak(name, color)?;

    conn.execute(
        "INSERT INTO peaks (name, color) VALUES (?1, ?2)",
        rusqlite::params![name, color],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(Peak {
        id: PeakId::from(conn.last_insert_rowid()),
        name: name.to_string(),
        color: color.to_string(),
    })
}

/// Get a peak by ID.
pub fn get_peak(conn: &Connection, id: PeakId) -> Result<Option<Peak>> {
    let q = format!("SELECT {COLS} FROM peaks WHERE id = ?1");
    let result = conn.query_row(&q, [id.get()], Peak::from_row);
    match result {
        Ok(p) => Ok(Some(p)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List all peaks ordered by name.
pub fn list_peaks(conn: &Connection) -> Result<Vec<Peak>> {
    let q = format!("SELECT {COLS} FROM peaks ORDER BY name, id");
    let mut stmt = conn.prepare(&q).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([], Peak::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Update a peak's name and color. Returns false if the peak does not exist.
pub fn update_peak(conn: &Connection, id: PeakId, name: &str, color: &str) -> Result<bool> {
    fields::validate_peak(name, color)?;

    let n = conn
        .execute(
            "UPDATE peaks SET name = ?1, color = ?2 WHERE id = ?3",
            rusqlite::params![name, color, id.get()],
        )
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

/// Delete a peak. Climbers keep existing; only their association is dropped.
pub fn delete_peak(conn: &Connection, id: PeakId) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM peaks WHERE id = ?1", [id.get()])
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::init_memory_pool;

    #[test]
    fn crud() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        let peak = create_peak(&conn, "Aconcagua", "brown").unwrap();
        assert_eq!(peak.name, "Aconcagua");
        assert_eq!(peak.absolute_url(), format!("/peaks/{}/", peak.id));

        let found = get_peak(&conn, peak.id).unwrap().unwrap();
        assert_eq!(found, peak);

        assert!(update_peak(&conn, peak.id, "Cerro Aconcagua", "red").unwrap());
        let updated = get_peak(&conn, peak.id).unwrap().unwrap();
        assert_eq!(updated.name, "Cerro Aconcagua");
        assert_eq!(updated.color, "red");

        assert!(delete_peak(&conn, peak.id).unwrap());
        assert!(get_peak(&conn, peak.id).unwrap().is_none());
        assert!(!delete_peak(&conn, peak.id).unwrap());
    }

    #[test]
    fn ids_are_assigned_sequentially() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let a = create_peak(&conn, "A", "x").unwrap();
        let b = create_peak(&conn, "B", "y").unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn list_is_sorted_by_name() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        create_peak(&conn, "Lhotse", "white").unwrap();
        create_peak(&conn, "Everest", "white").unwrap();
        create_peak(&conn, "K2", "grey").unwrap();

        let names: Vec<_> = list_peaks(&conn)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Everest", "K2", "Lhotse"]);
    }

    #[test]
    fn rejects_invalid_fields() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        let err = create_peak(&conn, &"n".repeat(51), "blue").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(list_peaks(&conn).unwrap().is_empty());

        let peak = create_peak(&conn, "Ok", "blue").unwrap();
        let err = update_peak(&conn, peak.id, "Ok", "").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn update_missing_returns_false() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        assert!(!update_peak(&conn, PeakId::from(404), "X", "y").unwrap());
    }
}
