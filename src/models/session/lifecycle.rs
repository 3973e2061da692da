//! Session state machine: a session is Active from `start` until `end`, and
//! Ended is terminal. At most one session is active at any instant; every
//! transition here runs as one write-locked transaction.

use rusqlite::{Connection, TransactionBehavior, params};

use super::queries;
use super::types::*;
use crate::errors::CheckinError;
use crate::models::location;

/// Open a new session against an existing venue.
///
/// Any session still marked active is force-closed first, in the same
/// transaction. Live attendance records are not touched; they re-bind to the
/// new session as it archives.
pub fn start(
    conn: &mut Connection,
    meeting_name: &str,
    location_id: i64,
) -> Result<MeetingSession, CheckinError> {
    let meeting_name = meeting_name.trim();
    if meeting_name.is_empty() {
        return Err(CheckinError::Validation(
            "Meeting name is required".to_string(),
        ));
    }
    if meeting_name.len() > 160 {
        return Err(CheckinError::Validation(
            "Meeting name must be at most 160 characters".to_string(),
        ));
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    if location::find_by_id(&tx, location_id)?.is_none() {
        return Err(CheckinError::NoLocation);
    }

    tx.execute(
        "UPDATE meeting_session \
         SET is_active = 0, \
             end_time = COALESCE(end_time, strftime('%Y-%m-%dT%H:%M:%S', 'now')) \
         WHERE is_active = 1",
        [],
    )?;
    tx.execute(
        "INSERT INTO meeting_session (meeting_name, location_id) VALUES (?1, ?2)",
        params![meeting_name, location_id],
    )?;
    let id = tx.last_insert_rowid();

    let session = queries::find_by_id(&tx, id)?.ok_or(CheckinError::Storage(
        rusqlite::Error::QueryReturnedNoRows,
    ))?;
    tx.commit()?;
    Ok(session)
}

/// Close the active session and archive every live attendance record into it.
///
/// One transaction stamps the session id onto all live records, flips them to
/// archived, and writes the session's `end_time` and `attendee_count`
/// snapshot. A second call finds no active session and fails without touching
/// anything, so archival is idempotent.
pub fn end(conn: &mut Connection) -> Result<ArchivalSummary, CheckinError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let Some(active) = queries::find_active(&tx)? else {
        return Err(CheckinError::NoActiveSession);
    };

    let archived = tx.execute(
        "UPDATE attendance SET is_archived = 1, meeting_session_id = ?1 WHERE is_archived = 0",
        params![active.id],
    )?;
    tx.execute(
        "UPDATE meeting_session \
         SET is_active = 0, \
             end_time = strftime('%Y-%m-%dT%H:%M:%S', 'now'), \
             attendee_count = ?1 \
         WHERE id = ?2",
        params![archived as i64, active.id],
    )?;

    tx.commit()?;
    Ok(ArchivalSummary {
        session_id: active.id,
        meeting_name: active.meeting_name,
        archived_count: archived as i64,
    })
}

/// Delete every attendance record and every session, in one transaction.
pub fn purge_all(conn: &mut Connection) -> Result<PurgeSummary, CheckinError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let records_deleted = tx.execute("DELETE FROM attendance", [])?;
    let sessions_deleted = tx.execute("DELETE FROM meeting_session", [])?;

    tx.commit()?;
    Ok(PurgeSummary {
        sessions_deleted,
        records_deleted,
    })
}

/// Delete one session and every record bound to it. `None` when the id is
/// unknown.
pub fn delete(conn: &mut Connection, id: i64) -> Result<Option<DeletedSession>, CheckinError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let Some(session) = queries::find_by_id(&tx, id)? else {
        return Ok(None);
    };

    let records_deleted = tx.execute(
        "DELETE FROM attendance WHERE meeting_session_id = ?1",
        params![id],
    )?;
    tx.execute("DELETE FROM meeting_session WHERE id = ?1", params![id])?;

    tx.commit()?;
    Ok(Some(DeletedSession {
        meeting_name: session.meeting_name,
        records_deleted,
    }))
}
