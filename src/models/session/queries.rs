use rusqlite::{Connection, params};

use super::types::*;
use crate::models::attendance::{self, AttendanceRecord};

const SESSION_SELECT: &str = "\
SELECT id, meeting_name, location_id, start_time, end_time, is_active, attendee_count \
FROM meeting_session";

fn map_session_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MeetingSession> {
    Ok(MeetingSession {
        id: row.get("id")?,
        meeting_name: row.get("meeting_name")?,
        location_id: row.get("location_id")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        is_active: row.get("is_active")?,
        attendee_count: row.get("attendee_count")?,
    })
}

/// The currently active session, if any.
pub fn find_active(conn: &Connection) -> rusqlite::Result<Option<MeetingSession>> {
    let sql = format!("{SESSION_SELECT} WHERE is_active = 1 ORDER BY id DESC LIMIT 1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map([], map_session_row)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<MeetingSession>> {
    let sql = format!("{SESSION_SELECT} WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], map_session_row)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// The most recently ended session, for the dashboard summary.
pub fn find_last_ended(conn: &Connection) -> rusqlite::Result<Option<MeetingSession>> {
    let sql = format!(
        "{SESSION_SELECT} WHERE is_active = 0 AND end_time IS NOT NULL \
         ORDER BY end_time DESC, id DESC LIMIT 1"
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map([], map_session_row)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// All ended sessions, newest first.
pub fn find_archived(conn: &Connection) -> rusqlite::Result<Vec<MeetingSession>> {
    let sql = format!("{SESSION_SELECT} WHERE is_active = 0 ORDER BY end_time DESC, id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_session_row)?;
    rows.collect()
}

/// Every archived session with its bound attendance records, read inside one
/// transaction so an export never sees a torn archival.
pub fn find_archived_with_records(
    conn: &mut Connection,
) -> rusqlite::Result<Vec<(MeetingSession, Vec<AttendanceRecord>)>> {
    let tx = conn.transaction()?;
    let sessions = find_archived(&tx)?;
    let mut out = Vec::with_capacity(sessions.len());
    for session in sessions {
        let records = attendance::find_by_session(&tx, session.id)?;
        out.push((session, records));
    }
    tx.commit()?;
    Ok(out)
}

/// One archived session with its records; `None` if the id is unknown or the
/// session is still active.
pub fn find_archived_session_with_records(
    conn: &mut Connection,
    id: i64,
) -> rusqlite::Result<Option<(MeetingSession, Vec<AttendanceRecord>)>> {
    let tx = conn.transaction()?;
    let Some(session) = find_by_id(&tx, id)? else {
        return Ok(None);
    };
    if session.is_active {
        return Ok(None);
    }
    let records = attendance::find_by_session(&tx, session.id)?;
    tx.commit()?;
    Ok(Some((session, records)))
}

/// Number of records bound to a session (live or archived).
pub fn record_count(conn: &Connection, session_id: i64) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM attendance WHERE meeting_session_id = ?1",
        params![session_id],
        |row| row.get(0),
    )
}
