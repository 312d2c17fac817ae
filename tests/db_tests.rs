use chrono::{NaiveDate, Utc};
use reunions::db::reunion_repo::Scope;
use reunions::db::*;
use reunions::model::*;
use reunions::seed;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn insert_many(conn: &rusqlite::Connection, n: usize, discarded: bool) -> Vec<Reunion> {
    (0..n)
        .map(|i| {
            let mut r = Reunion::create();
            r.name = Some(format!("Reunion {i}"));
            if discarded {
                r.discard(Utc::now());
            }
            reunion_repo::insert(conn, &r).unwrap();
            r
        })
        .collect()
}

// ==========================================================================
// REUNION REPO TESTS
// ==========================================================================

#[test]
fn reunion_insert_and_find() {
    let conn = schema::test_connection();

    let mut reunion = Reunion::create();
    reunion.name = Some("Class of 2009".into());
    reunion.start_date = Some(date(2019, 11, 28));
    reunion.end_date = Some(date(2019, 11, 30));
    reunion_repo::insert(&conn, &reunion).unwrap();

    let found = reunion_repo::find_by_id(&conn, reunion.id).unwrap().unwrap();
    assert_eq!(found.id, reunion.id);
    assert_eq!(found.name, Some("Class of 2009".into()));
    assert_eq!(found.start_date, Some(date(2019, 11, 28)));
    assert_eq!(found.end_date, Some(date(2019, 11, 30)));
    assert_eq!(found.state, ReunionState::Draft);
    assert_eq!(found.discarded_at, None);
}

#[test]
fn find_missing_reunion_returns_none() {
    let conn = schema::test_connection();
    assert!(reunion_repo::find_by_id(&conn, Id::generate()).unwrap().is_none());
}

#[test]
fn find_by_id_sees_discarded_rows() {
    let conn = schema::test_connection();
    let discarded = insert_many(&conn, 1, true);

    let found = reunion_repo::find_by_id(&conn, discarded[0].id).unwrap().unwrap();
    assert!(found.is_discarded());
}

#[test]
fn reunion_update_persists_fields_and_stamps_updated_at() {
    let conn = schema::test_connection();
    let mut reunion = Reunion::create();
    reunion_repo::insert(&conn, &reunion).unwrap();
    let created_at = reunion.created_at;

    reunion.location = Some("Lisbon".into());
    reunion.state = ReunionState::Published;
    reunion_repo::update(&conn, &mut reunion).unwrap();

    let found = reunion_repo::find_by_id(&conn, reunion.id).unwrap().unwrap();
    assert_eq!(found.location, Some("Lisbon".into()));
    assert_eq!(found.state, ReunionState::Published);
    assert!(found.updated_at >= created_at);
    assert_eq!(found.updated_at, reunion.updated_at);
}

#[test]
fn update_of_unknown_reunion_is_not_found() {
    let conn = schema::test_connection();
    let mut ghost = Reunion::create();
    let result = reunion_repo::update(&conn, &mut ghost);
    assert!(matches!(result, Err(reunions::error::ReunionError::NotFound { .. })));
}

#[test]
fn scopes_split_kept_and_discarded() {
    let conn = schema::test_connection();
    insert_many(&conn, 4, false);
    insert_many(&conn, 3, true);

    assert_eq!(reunion_repo::count(&conn, Scope::Kept).unwrap(), 4);
    assert_eq!(reunion_repo::count(&conn, Scope::Discarded).unwrap(), 3);
    assert_eq!(reunion_repo::count(&conn, Scope::All).unwrap(), 7);

    let kept = reunion_repo::find_page(&conn, Scope::Kept, 20).unwrap();
    assert_eq!(kept.len(), 4);
    assert!(kept.iter().all(|r| r.is_kept()));
}

#[test]
fn find_page_respects_limit_and_insertion_order() {
    let conn = schema::test_connection();
    let inserted = insert_many(&conn, 5, false);

    let page = reunion_repo::find_page(&conn, Scope::All, 3).unwrap();
    let ids: Vec<_> = page.iter().map(|r| r.id).collect();
    let expected: Vec<_> = inserted.iter().take(3).map(|r| r.id).collect();
    assert_eq!(ids, expected);
}

#[test]
fn unknown_state_in_storage_is_invalid_data() {
    let conn = schema::test_connection();
    let reunion = Reunion::create();
    reunion_repo::insert(&conn, &reunion).unwrap();
    // Bypass the CHECK constraint to simulate a corrupted row.
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;").unwrap();
    conn.execute(
        "UPDATE reunions SET state = 'archived' WHERE id = ?1",
        [reunion.id.value.to_string()],
    )
    .unwrap();

    let result = reunion_repo::find_by_id(&conn, reunion.id);
    assert!(matches!(result, Err(reunions::error::ReunionError::InvalidData(_))));
}

#[test]
fn open_creates_parent_directory_and_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("reunions.db");

    let conn = schema::open(&path).unwrap();
    reunion_repo::insert(&conn, &Reunion::create()).unwrap();
    drop(conn);

    let reopened = schema::open(&path).unwrap();
    assert_eq!(reunion_repo::count(&reopened, Scope::All).unwrap(), 1);
}

// ==========================================================================
// SEED TESTS
// ==========================================================================

#[test]
fn seed_inserts_valid_sample_reunions() {
    let conn = schema::test_connection();
    let today = date(2019, 12, 4);

    let stats = seed::seed_reunions(&conn, 10, today).unwrap();
    assert_eq!(stats.created, 10);
    assert_eq!(stats.published, 5);
    assert_eq!(stats.drafts, 5);
    assert_eq!(reunion_repo::count_published(&conn).unwrap(), 5);

    let all = reunion_repo::find_page(&conn, Scope::All, 20).unwrap();
    assert_eq!(all[0].name, Some("Reunion 0".into()));
    for r in &all {
        let start = r.start_date.unwrap();
        assert!(start > today && start <= date(2019, 12, 24));
        let duration = r.duration().unwrap();
        assert!((2..=21).contains(&duration));
        assert!(r.validate().is_ok());
    }
}
