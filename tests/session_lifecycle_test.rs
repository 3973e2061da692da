use onsite::errors::CheckinError;
use onsite::models::attendance;
use onsite::models::session;

mod common;
use common::{candidate, open_meeting, seed_venue, setup_test_db};

#[test]
fn test_start_requires_existing_venue() {
    let (_dir, mut conn) = setup_test_db();

    match session::start(&mut conn, "Midweek Service", 999) {
        Err(CheckinError::NoLocation) => {}
        other => panic!("expected NoLocation, got {other:?}"),
    }
}

#[test]
fn test_start_rejects_blank_name() {
    let (_dir, mut conn) = setup_test_db();
    let venue = seed_venue(&mut conn);

    assert!(matches!(
        session::start(&mut conn, "   ", venue.id),
        Err(CheckinError::Validation(_))
    ));
}

#[test]
fn test_start_creates_active_session() {
    let (_dir, mut conn) = setup_test_db();
    let (venue, sess) = open_meeting(&mut conn, "Midweek Service");

    assert!(sess.id > 0);
    assert!(sess.is_active);
    assert_eq!(sess.meeting_name, "Midweek Service");
    assert_eq!(sess.location_id, Some(venue.id));
    assert_eq!(sess.attendee_count, 0);
    assert!(sess.end_time.is_none());

    let active = session::find_active(&conn).expect("query").expect("active");
    assert_eq!(active.id, sess.id);
}

#[test]
fn test_start_force_closes_stray_active_session() {
    let (_dir, mut conn) = setup_test_db();
    let (venue, first) = open_meeting(&mut conn, "Sunday Service");

    let second = session::start(&mut conn, "Overflow", venue.id).expect("start");

    let first = session::find_by_id(&conn, first.id)
        .expect("query")
        .expect("row");
    assert!(!first.is_active);
    assert!(first.end_time.is_some(), "force-close backfills end_time");
    assert_eq!(first.attendee_count, 0, "force-close takes no snapshot");

    let active = session::find_active(&conn).expect("query").expect("active");
    assert_eq!(active.id, second.id);
}

#[test]
fn test_end_archives_live_records_and_snapshots_count() {
    let (_dir, mut conn) = setup_test_db();
    let (_venue, sess) = open_meeting(&mut conn, "Sunday Service");

    attendance::submit(&mut conn, &candidate("amara", "+15550000001")).expect("check-in");
    attendance::submit(&mut conn, &candidate("bode", "+15550000002")).expect("check-in");
    attendance::submit(&mut conn, &candidate("chika", "+15550000003")).expect("check-in");

    let summary = session::end(&mut conn).expect("end");
    assert_eq!(summary.session_id, sess.id);
    assert_eq!(summary.meeting_name, "Sunday Service");
    assert_eq!(summary.archived_count, 3);

    let closed = session::find_by_id(&conn, sess.id)
        .expect("query")
        .expect("row");
    assert!(!closed.is_active);
    assert!(closed.end_time.is_some());
    assert_eq!(closed.attendee_count, 3);

    let records = attendance::find_by_session(&conn, sess.id).expect("query");
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.is_archived));
}

#[test]
fn test_end_without_active_session() {
    let (_dir, mut conn) = setup_test_db();

    match session::end(&mut conn) {
        Err(CheckinError::NoActiveSession) => {}
        other => panic!("expected NoActiveSession, got {other:?}"),
    }
}

#[test]
fn test_end_twice_fails_without_touching_the_archive() {
    let (_dir, mut conn) = setup_test_db();
    let (_venue, sess) = open_meeting(&mut conn, "Sunday Service");
    attendance::submit(&mut conn, &candidate("dave", "+15550000004")).expect("check-in");

    session::end(&mut conn).expect("first end");
    match session::end(&mut conn) {
        Err(CheckinError::NoActiveSession) => {}
        other => panic!("expected NoActiveSession, got {other:?}"),
    }

    let closed = session::find_by_id(&conn, sess.id)
        .expect("query")
        .expect("row");
    assert_eq!(closed.attendee_count, 1);
    assert_eq!(session::record_count(&conn, sess.id).expect("count"), 1);
}

#[test]
fn test_live_records_archive_into_the_session_that_ends() {
    let (_dir, mut conn) = setup_test_db();
    let (venue, first) = open_meeting(&mut conn, "First");
    attendance::submit(&mut conn, &candidate("efe", "+15550000005")).expect("check-in");

    // The record stays live across the force-close and re-binds at archival.
    let second = session::start(&mut conn, "Second", venue.id).expect("start");
    let summary = session::end(&mut conn).expect("end");

    assert_eq!(summary.session_id, second.id);
    assert_eq!(summary.archived_count, 1);
    assert_eq!(session::record_count(&conn, first.id).expect("count"), 0);
    assert_eq!(session::record_count(&conn, second.id).expect("count"), 1);
}

#[test]
fn test_last_ended_returns_most_recent() {
    let (_dir, mut conn) = setup_test_db();

    open_meeting(&mut conn, "First");
    session::end(&mut conn).expect("end");
    open_meeting(&mut conn, "Second");
    session::end(&mut conn).expect("end");

    let last = session::find_last_ended(&conn)
        .expect("query")
        .expect("ended session");
    assert_eq!(last.meeting_name, "Second");
}

#[test]
fn test_delete_removes_session_and_records() {
    let (_dir, mut conn) = setup_test_db();
    let (_venue, sess) = open_meeting(&mut conn, "Disbanded");
    attendance::submit(&mut conn, &candidate("femi", "+15550000006")).expect("check-in");
    attendance::submit(&mut conn, &candidate("gozie", "+15550000007")).expect("check-in");
    session::end(&mut conn).expect("end");

    let deleted = session::delete(&mut conn, sess.id)
        .expect("delete")
        .expect("known id");
    assert_eq!(deleted.meeting_name, "Disbanded");
    assert_eq!(deleted.records_deleted, 2);

    assert!(session::find_by_id(&conn, sess.id).expect("query").is_none());
    assert_eq!(session::record_count(&conn, sess.id).expect("count"), 0);
}

#[test]
fn test_delete_unknown_session_returns_none() {
    let (_dir, mut conn) = setup_test_db();
    assert!(session::delete(&mut conn, 424242).expect("delete").is_none());
}

#[test]
fn test_purge_removes_all_sessions_and_records() {
    let (_dir, mut conn) = setup_test_db();

    open_meeting(&mut conn, "First");
    attendance::submit(&mut conn, &candidate("hale", "+15550000008")).expect("check-in");
    attendance::submit(&mut conn, &candidate("ife", "+15550000009")).expect("check-in");
    session::end(&mut conn).expect("end");

    open_meeting(&mut conn, "Second");
    attendance::submit(&mut conn, &candidate("jide", "+15550000010")).expect("check-in");

    let purged = session::purge_all(&mut conn).expect("purge");
    assert_eq!(purged.sessions_deleted, 2);
    assert_eq!(purged.records_deleted, 3);

    assert!(session::find_active(&conn).expect("query").is_none());
    assert!(session::find_archived(&conn).expect("query").is_empty());
}
