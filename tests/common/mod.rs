//! Helpers shared by the model-layer test binaries.
//!
//! `setup_test_db()` creates an isolated on-disk SQLite database with the
//! full schema applied. The seed helpers cover the venue-plus-meeting
//! arrangement most scenarios start from.

use rusqlite::Connection;
use tempfile::TempDir;

use onsite::db::MIGRATIONS;
use onsite::models::attendance::Candidate;
use onsite::models::location::{self, MeetingLocation, NewLocation};
use onsite::models::session::{self, MeetingSession};

/// Fresh database in its own temp directory. Keep the `TempDir` in scope
/// for as long as the `Connection` is in use.
pub fn setup_test_db() -> (TempDir, Connection) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let conn = rusqlite::Connection::open(&db_path).expect("Failed to open test DB");

    conn.execute_batch("PRAGMA foreign_keys=ON; PRAGMA journal_mode=WAL;")
        .expect("Failed to set pragmas");

    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");

    (dir, conn)
}

/// Activate a venue at (40.0, -74.0) with a 30 m radius.
#[allow(dead_code)]
pub fn seed_venue(conn: &mut Connection) -> MeetingLocation {
    let new =
        NewLocation::parse("Main Hall", "12 High St", "40.0", "-74.0", "30").expect("venue input");
    location::set_active(conn, &new).expect("Failed to save venue")
}

/// Seed a venue and start a meeting against it.
#[allow(dead_code)]
pub fn open_meeting(
    conn: &mut Connection,
    meeting_name: &str,
) -> (MeetingLocation, MeetingSession) {
    let venue = seed_venue(conn);
    let session =
        session::start(conn, meeting_name, venue.id).expect("Failed to start meeting");
    (venue, session)
}

/// A valid candidate standing exactly at the seeded venue point. `tag` keys
/// the email; the phone must also be unique within a test database.
#[allow(dead_code)]
pub fn candidate(tag: &str, phone: &str) -> Candidate {
    Candidate {
        firstname: format!("First{tag}"),
        lastname: format!("Last{tag}"),
        surname: format!("Sur{tag}"),
        email: format!("{tag}@example.com"),
        phone: phone.to_string(),
        zone: "ZONE 1".to_string(),
        group_name: "AUXANO".to_string(),
        church: "Grace Chapel".to_string(),
        category: "Member".to_string(),
        latitude_raw: Some("40.0".to_string()),
        longitude_raw: Some("-74.0".to_string()),
    }
}
