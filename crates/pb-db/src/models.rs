//! Rust structs mapping to database tables.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row`, `Display` for its human label, and (where a detail
//! route exists) `absolute_url`.

use std::fmt;

use chrono::NaiveDate;
use pb_core::urls::{self, Route};
use pb_core::{ClimbId, ClimbTime, ClimberId, PeakId};
use rusqlite::types::Type;

/// Storage format of climb dates. Sorts chronologically for years 1..=9999,
/// which `pb_core::fields::validate_climb_date` enforces.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// helpers
// ---------------------------------------------------------------------------

fn parse_date(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let s: String = row.get(idx)?;
    NaiveDate::parse_from_str(&s, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_time(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<ClimbTime> {
    let s: String = row.get(idx)?;
    s.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Render a date the way it is stored.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Peak
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peak {
    pub id: PeakId,
    pub name: String,
    pub color: String,
}

impl Peak {
    /// Build from a row selected as: id, name, color
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: PeakId::from(row.get::<_, i64>(0)?),
            name: row.get(1)?,
            color: row.get(2)?,
        })
    }

    pub fn absolute_url(&self) -> String {
        urls::reverse(Route::PeakDetail, self.id)
    }
}

impl fmt::Display for Peak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ---------------------------------------------------------------------------
// Climber
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Climber {
    pub id: ClimberId,
    pub name: String,
    pub breed: String,
    pub description: String,
    pub age: i32,
}

impl Climber {
    /// Build from a row selected as: id, name, breed, description, age
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: ClimberId::from(row.get::<_, i64>(0)?),
            name: row.get(1)?,
            breed: row.get(2)?,
            description: row.get(3)?,
            age: row.get(4)?,
        })
    }

    pub fn absolute_url(&self) -> String {
        urls::reverse(Route::ClimberDetail, self.id)
    }
}

impl fmt::Display for Climber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ---------------------------------------------------------------------------
// Climb
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Climb {
    pub id: ClimbId,
    pub date: NaiveDate,
    pub time: ClimbTime,
    pub climber_id: ClimberId,
}

impl Climb {
    /// Build from a row selected as: id, date, time, climber_id
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: ClimbId::from(row.get::<_, i64>(0)?),
            date: parse_date(row, 1)?,
            time: parse_time(row, 2)?,
            climber_id: ClimberId::from(row.get::<_, i64>(3)?),
        })
    }
}

/// "<time label> on <date>", e.g. `Morning on 2024-06-01`.
impl fmt::Display for Climb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.time.label(), format_date(self.date))
    }
}
