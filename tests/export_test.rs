use onsite::models::{attendance, session};

mod common;
use common::{candidate, open_meeting, setup_test_db};

#[test]
fn test_archived_sessions_carry_their_records() {
    let (_dir, mut conn) = setup_test_db();

    open_meeting(&mut conn, "First");
    attendance::submit(&mut conn, &candidate("abiola", "+15550003001")).expect("check-in");
    attendance::submit(&mut conn, &candidate("bayo", "+15550003002")).expect("check-in");
    session::end(&mut conn).expect("end");

    open_meeting(&mut conn, "Second");
    attendance::submit(&mut conn, &candidate("cosmas", "+15550003003")).expect("check-in");
    session::end(&mut conn).expect("end");

    let exports = session::find_archived_with_records(&mut conn).expect("read");
    assert_eq!(exports.len(), 2);

    // Newest first
    assert_eq!(exports[0].0.meeting_name, "Second");
    assert_eq!(exports[0].1.len(), 1);
    assert_eq!(exports[1].0.meeting_name, "First");
    assert_eq!(exports[1].1.len(), 2);
    assert_eq!(exports[1].1[0].email, "abiola@example.com");
}

#[test]
fn test_single_session_export_requires_an_ended_session() {
    let (_dir, mut conn) = setup_test_db();
    let (_venue, sess) = open_meeting(&mut conn, "Sunday Service");
    attendance::submit(&mut conn, &candidate("dupe", "+15550003004")).expect("check-in");

    // Still active: nothing to export yet
    assert!(
        session::find_archived_session_with_records(&mut conn, sess.id)
            .expect("read")
            .is_none()
    );

    session::end(&mut conn).expect("end");

    let (archived, records) = session::find_archived_session_with_records(&mut conn, sess.id)
        .expect("read")
        .expect("archived session");
    assert_eq!(archived.id, sess.id);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].email, "dupe@example.com");
}

#[test]
fn test_single_session_export_unknown_id() {
    let (_dir, mut conn) = setup_test_db();
    assert!(
        session::find_archived_session_with_records(&mut conn, 9999)
            .expect("read")
            .is_none()
    );
}

#[test]
fn test_records_export_in_check_in_order() {
    let (_dir, mut conn) = setup_test_db();
    let (_venue, sess) = open_meeting(&mut conn, "Sunday Service");

    attendance::submit(&mut conn, &candidate("first", "+15550003005")).expect("check-in");
    attendance::submit(&mut conn, &candidate("second", "+15550003006")).expect("check-in");
    attendance::submit(&mut conn, &candidate("third", "+15550003007")).expect("check-in");
    session::end(&mut conn).expect("end");

    let records = attendance::find_by_session(&conn, sess.id).expect("query");
    let emails: Vec<&str> = records.iter().map(|r| r.email.as_str()).collect();
    assert_eq!(
        emails,
        [
            "first@example.com",
            "second@example.com",
            "third@example.com"
        ]
    );
}
