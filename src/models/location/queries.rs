use rusqlite::{Connection, TransactionBehavior, params};

use super::types::*;
use crate::errors::CheckinError;

const LOCATION_SELECT: &str = "\
SELECT id, name, address, latitude, longitude, radius_m, is_active, created_at \
FROM meeting_location";

fn map_location_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MeetingLocation> {
    Ok(MeetingLocation {
        id: row.get("id")?,
        name: row.get("name")?,
        address: row.get("address")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        radius_m: row.get("radius_m")?,
        is_active: row.get("is_active")?,
        created_at: row.get("created_at")?,
    })
}

/// Deactivate every venue and insert the new one as active, in one
/// write-locked transaction. Returns the stored row.
pub fn set_active(conn: &mut Connection, new: &NewLocation) -> Result<MeetingLocation, CheckinError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    tx.execute(
        "UPDATE meeting_location SET is_active = 0 WHERE is_active = 1",
        [],
    )?;
    tx.execute(
        "INSERT INTO meeting_location (name, address, latitude, longitude, radius_m) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![new.name, new.address, new.latitude, new.longitude, new.radius_m],
    )?;
    let id = tx.last_insert_rowid();

    let location = find_by_id(&tx, id)?.ok_or(CheckinError::Storage(
        rusqlite::Error::QueryReturnedNoRows,
    ))?;
    tx.commit()?;
    Ok(location)
}

/// The currently active venue, if any.
pub fn find_active(conn: &Connection) -> rusqlite::Result<Option<MeetingLocation>> {
    let sql = format!("{LOCATION_SELECT} WHERE is_active = 1 ORDER BY id DESC LIMIT 1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map([], map_location_row)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<MeetingLocation>> {
    let sql = format!("{LOCATION_SELECT} WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], map_location_row)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Full venue history, newest first.
pub fn find_all(conn: &Connection) -> rusqlite::Result<Vec<MeetingLocation>> {
    let sql = format!("{LOCATION_SELECT} ORDER BY id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_location_row)?;
    rows.collect()
}
