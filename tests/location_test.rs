use onsite::models::location::{self, DEFAULT_RADIUS_M, NewLocation};

mod common;
use common::setup_test_db;

#[test]
fn test_save_activates_new_venue() {
    let (_dir, mut conn) = setup_test_db();

    let new = NewLocation::parse("Hall A", "12 High St", "40.0", "-74.0", "30").expect("parse");
    let saved = location::set_active(&mut conn, &new).expect("save");

    assert!(saved.id > 0);
    assert!(saved.is_active);
    assert_eq!(saved.name, "Hall A");
    assert_eq!(saved.address, "12 High St");
    assert_eq!(saved.latitude, 40.0);
    assert_eq!(saved.longitude, -74.0);
    assert_eq!(saved.radius_m, 30.0);

    let active = location::find_active(&conn)
        .expect("query")
        .expect("active venue");
    assert_eq!(active.id, saved.id);
}

#[test]
fn test_save_deactivates_previous_venue() {
    let (_dir, mut conn) = setup_test_db();

    let first = NewLocation::parse("Hall A", "", "40.0", "-74.0", "30").expect("parse");
    let first = location::set_active(&mut conn, &first).expect("save");

    let second = NewLocation::parse("Hall B", "", "6.5244", "3.3792", "50").expect("parse");
    let second = location::set_active(&mut conn, &second).expect("save");

    let active = location::find_active(&conn)
        .expect("query")
        .expect("active venue");
    assert_eq!(active.id, second.id);

    let old = location::find_by_id(&conn, first.id)
        .expect("query")
        .expect("row");
    assert!(!old.is_active);
}

#[test]
fn test_blank_radius_stores_default() {
    let (_dir, mut conn) = setup_test_db();

    let new = NewLocation::parse("Hall A", "", "40.0", "-74.0", "").expect("parse");
    let saved = location::set_active(&mut conn, &new).expect("save");
    assert_eq!(saved.radius_m, DEFAULT_RADIUS_M);
}

#[test]
fn test_find_active_on_fresh_db() {
    let (_dir, conn) = setup_test_db();
    assert!(location::find_active(&conn).expect("query").is_none());
}

#[test]
fn test_find_all_lists_newest_first() {
    let (_dir, mut conn) = setup_test_db();

    let first = NewLocation::parse("Hall A", "", "40.0", "-74.0", "30").expect("parse");
    location::set_active(&mut conn, &first).expect("save");
    let second = NewLocation::parse("Hall B", "", "6.5244", "3.3792", "50").expect("parse");
    let second = location::set_active(&mut conn, &second).expect("save");

    let all = location::find_all(&conn).expect("query");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, second.id);
    assert!(all[0].is_active);
    assert!(!all[1].is_active);
}
