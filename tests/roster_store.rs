use chrono::NaiveDate;
use roster::core::db;
use roster::core::error::RosterError;
use roster::core::store::Store;
use roster::plugins::adolescent;
use roster::plugins::guardian::{add_guardian, get_guardian, list_guardians, remove_guardian};
use tempfile::{TempDir, tempdir};

fn fresh_store() -> (TempDir, Store) {
    let tmp = tempdir().unwrap();
    let store = Store::new(tmp.path().join("adolescentes.db"));
    db::initialize_roster_db(&store).unwrap();
    (tmp, store)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_initialize_is_idempotent() {
    let (_tmp, store) = fresh_store();
    db::initialize_roster_db(&store).unwrap();
    assert_eq!(adolescent::count(&store).unwrap(), 0);
    assert!(list_guardians(&store).unwrap().is_empty());
}

#[test]
fn test_initialize_creates_missing_parent_directory() {
    let tmp = tempdir().unwrap();
    let store = Store::new(tmp.path().join("nested/data/roster.db"));
    db::initialize_roster_db(&store).unwrap();
    assert!(store.db_path().exists());
}

#[test]
fn test_added_record_is_listed_with_guardian_name() {
    let (_tmp, store) = fresh_store();
    let marta = add_guardian(&store, "Marta").unwrap();

    let mut ana = adolescent::create("Ana", 15, day(2009, 5, 1), "F", marta.id, "Norte");
    let id = adolescent::add(&store, &mut ana).unwrap();
    assert_eq!(ana.id, Some(id));

    let entries = adolescent::list_with_guardians(&store).unwrap();
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.id, id);
    assert_eq!(entry.name, "Ana");
    assert_eq!(entry.age, 15);
    assert_eq!(entry.birth_date, day(2009, 5, 1));
    assert_eq!(entry.gender, "F");
    assert_eq!(entry.guardian_name, "Marta");
    assert_eq!(entry.team, "Norte");
}

#[test]
fn test_listing_is_ordered_by_name() {
    let (_tmp, store) = fresh_store();
    let pg = add_guardian(&store, "Carlos").unwrap();
    for name in ["Pedro", "Ana", "Lucas"] {
        let mut record = adolescent::create(name, 14, day(2010, 1, 1), "M", pg.id, "Sul");
        adolescent::add(&store, &mut record).unwrap();
    }
    let names: Vec<_> = adolescent::list_with_guardians(&store)
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["Ana", "Lucas", "Pedro"]);
}

#[test]
fn test_get_by_id_returns_none_for_unknown_id() {
    let (_tmp, store) = fresh_store();
    assert_eq!(adolescent::get_by_id(&store, 999).unwrap(), None);
}

#[test]
fn test_update_overwrites_fields_and_keeps_id() {
    let (_tmp, store) = fresh_store();
    let first = add_guardian(&store, "Marta").unwrap();
    let second = add_guardian(&store, "Jonas").unwrap();
    let mut record = adolescent::create("Ana", 15, day(2009, 5, 1), "F", first.id, "Norte");
    let id = adolescent::add(&store, &mut record).unwrap();

    let mut fetched = adolescent::get_by_id(&store, id).unwrap().unwrap();
    fetched.name = "Ana Clara".to_string();
    fetched.age = 16;
    fetched.birth_date = day(2008, 12, 31);
    fetched.gender = "Feminino".to_string();
    fetched.guardian_id = second.id;
    fetched.team = "Leste".to_string();
    adolescent::update(&store, &fetched).unwrap();

    let reloaded = adolescent::get_by_id(&store, id).unwrap().unwrap();
    assert_eq!(reloaded, fetched);
    assert_eq!(reloaded.id, Some(id));
    assert_eq!(adolescent::count(&store).unwrap(), 1);
}

#[test]
fn test_update_of_vanished_record_is_not_found() {
    let (_tmp, store) = fresh_store();
    let pg = add_guardian(&store, "Marta").unwrap();
    let mut record = adolescent::create("Ana", 15, day(2009, 5, 1), "F", pg.id, "Norte");
    adolescent::add(&store, &mut record).unwrap();
    adolescent::delete(&store, &record).unwrap();

    let err = adolescent::update(&store, &record).unwrap_err();
    assert!(matches!(err, RosterError::NotFound(_)), "{err}");
}

#[test]
fn test_delete_removes_record_and_decrements_count() {
    let (_tmp, store) = fresh_store();
    let pg = add_guardian(&store, "Marta").unwrap();
    let mut ana = adolescent::create("Ana", 15, day(2009, 5, 1), "F", pg.id, "Norte");
    let mut bia = adolescent::create("Bia", 13, day(2011, 2, 2), "F", pg.id, "Norte");
    let ana_id = adolescent::add(&store, &mut ana).unwrap();
    adolescent::add(&store, &mut bia).unwrap();
    assert_eq!(adolescent::count(&store).unwrap(), 2);

    adolescent::delete(&store, &ana).unwrap();

    assert_eq!(adolescent::get_by_id(&store, ana_id).unwrap(), None);
    assert_eq!(adolescent::count(&store).unwrap(), 1);
}

#[test]
fn test_unknown_guardian_is_rejected_by_storage() {
    let (_tmp, store) = fresh_store();
    let mut orphan = adolescent::create("Ana", 15, day(2009, 5, 1), "F", 42, "Norte");
    let err = adolescent::add(&store, &mut orphan).unwrap_err();
    assert!(matches!(err, RosterError::RusqliteError(_)), "{err}");
    assert_eq!(orphan.id, None);
    assert_eq!(adolescent::count(&store).unwrap(), 0);
}

#[test]
fn test_guardian_name_must_not_be_blank() {
    let (_tmp, store) = fresh_store();
    let err = add_guardian(&store, "   ").unwrap_err();
    assert!(matches!(err, RosterError::ValidationError(_)));
    assert!(list_guardians(&store).unwrap().is_empty());
}

#[test]
fn test_guardian_name_is_stored_as_submitted() {
    let (_tmp, store) = fresh_store();
    let padded = add_guardian(&store, " Marta ").unwrap();
    assert_eq!(padded.name, " Marta ");
    let stored = get_guardian(&store, padded.id).unwrap().unwrap();
    assert_eq!(stored.name, " Marta ");
}

#[test]
fn test_guardian_lookup_and_listing() {
    let (_tmp, store) = fresh_store();
    let marta = add_guardian(&store, "Marta").unwrap();
    let jonas = add_guardian(&store, "Jonas").unwrap();
    assert_eq!(marta.name, "Marta");
    assert_eq!(get_guardian(&store, jonas.id).unwrap(), Some(jonas.clone()));
    assert_eq!(get_guardian(&store, 999).unwrap(), None);
    assert_eq!(list_guardians(&store).unwrap(), vec![marta, jonas]);
}

#[test]
fn test_guardian_with_dependents_cannot_be_removed() {
    let (_tmp, store) = fresh_store();
    let pg = add_guardian(&store, "Marta").unwrap();
    let mut record = adolescent::create("Ana", 15, day(2009, 5, 1), "F", pg.id, "Norte");
    adolescent::add(&store, &mut record).unwrap();

    let err = remove_guardian(&store, pg.id).unwrap_err();
    assert!(err.to_string().contains("1 adolescent"), "{err}");
    assert!(get_guardian(&store, pg.id).unwrap().is_some());

    adolescent::delete(&store, &record).unwrap();
    remove_guardian(&store, pg.id).unwrap();
    assert_eq!(get_guardian(&store, pg.id).unwrap(), None);
}

#[test]
fn test_removing_unknown_guardian_is_not_found() {
    let (_tmp, store) = fresh_store();
    let err = remove_guardian(&store, 7).unwrap_err();
    assert!(matches!(err, RosterError::NotFound(_)));
}
