//! The admission pipeline: one write-locked transaction takes a validated
//! candidate from geofence check to stored row, or rolls back entirely.

use rusqlite::{Connection, TransactionBehavior, params};

use super::queries;
use super::types::*;
use crate::errors::{CheckinError, DuplicateField};
use crate::geo::{self, Decision};
use crate::models::{location, session};

/// Admit one submission.
///
/// The active session and venue are re-read inside the transaction, so a
/// concurrent `end` cannot slip between the check and the insert. On any
/// error no row is written.
pub fn submit(conn: &mut Connection, candidate: &Candidate) -> Result<AdmittedAttendance, CheckinError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let Some(active) = session::find_active(&tx)? else {
        return Err(CheckinError::NoActiveSession);
    };
    let Some(venue) = location::find_active(&tx)? else {
        return Err(CheckinError::NoLocation);
    };

    let decision = geo::evaluate(
        venue.latitude,
        venue.longitude,
        venue.radius_m,
        candidate.latitude_raw.as_deref(),
        candidate.longitude_raw.as_deref(),
    );
    let (coords, distance_m) = match decision {
        Decision::Rejected { distance_m } => {
            return Err(CheckinError::OutOfRange {
                distance_m,
                radius_m: venue.radius_m,
            });
        }
        Decision::Allowed {
            latitude,
            longitude,
            distance_m,
        } => (Some((latitude, longitude)), Some(distance_m)),
        Decision::Unverified => (None, None),
    };

    if queries::email_exists(&tx, &candidate.email)? {
        return Err(CheckinError::Duplicate(DuplicateField::Email));
    }
    if queries::phone_exists(&tx, &candidate.phone)? {
        return Err(CheckinError::Duplicate(DuplicateField::Phone));
    }

    tx.execute(
        "INSERT INTO attendance \
         (firstname, lastname, surname, email, phone, latitude, longitude, \
          zone, group_name, church, category, meeting_session_id) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            candidate.firstname,
            candidate.lastname,
            candidate.surname,
            candidate.email,
            candidate.phone,
            coords.map(|(lat, _)| lat),
            coords.map(|(_, lon)| lon),
            candidate.zone,
            candidate.group_name,
            candidate.church,
            candidate.category,
            active.id,
        ],
    )
    .map_err(classify_insert_error)?;
    let id = tx.last_insert_rowid();

    let record = queries::find_by_id(&tx, id)?.ok_or(CheckinError::Storage(
        rusqlite::Error::QueryReturnedNoRows,
    ))?;
    tx.commit()?;

    Ok(AdmittedAttendance {
        record,
        distance_m,
        location_verified: coords.is_some(),
    })
}

/// The UNIQUE constraints backstop the pre-checks. A violation that still
/// escapes them is classified by extended result code, never by message text.
fn classify_insert_error(e: rusqlite::Error) -> CheckinError {
    if let rusqlite::Error::SqliteFailure(err, _) = &e {
        if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
            return CheckinError::Duplicate(DuplicateField::Unspecified);
        }
    }
    CheckinError::Storage(e)
}
