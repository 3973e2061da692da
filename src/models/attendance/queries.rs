use rusqlite::{Connection, params};

use super::types::*;

const ATTENDANCE_SELECT: &str = "\
SELECT id, firstname, lastname, surname, email, phone, timestamp, \
       latitude, longitude, zone, group_name, church, category, \
       meeting_session_id, is_archived \
FROM attendance";

fn map_attendance_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AttendanceRecord> {
    Ok(AttendanceRecord {
        id: row.get("id")?,
        firstname: row.get("firstname")?,
        lastname: row.get("lastname")?,
        surname: row.get("surname")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        timestamp: row.get("timestamp")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        zone: row.get("zone")?,
        group_name: row.get("group_name")?,
        church: row.get("church")?,
        category: row.get("category")?,
        meeting_session_id: row.get("meeting_session_id")?,
        is_archived: row.get("is_archived")?,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<AttendanceRecord>> {
    let sql = format!("{ATTENDANCE_SELECT} WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], map_attendance_row)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// All records bound to a session, in check-in order.
pub fn find_by_session(
    conn: &Connection,
    session_id: i64,
) -> rusqlite::Result<Vec<AttendanceRecord>> {
    let sql = format!("{ATTENDANCE_SELECT} WHERE meeting_session_id = ?1 ORDER BY id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![session_id], map_attendance_row)?;
    rows.collect()
}

pub fn email_exists(conn: &Connection, email: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM attendance WHERE email = ?1)",
        params![email],
        |row| row.get(0),
    )
}

pub fn phone_exists(conn: &Connection, phone: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM attendance WHERE phone = ?1)",
        params![phone],
        |row| row.get(0),
    )
}
