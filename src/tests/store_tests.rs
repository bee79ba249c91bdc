use crate::domain::record::ListingRecord;
use crate::store::{JsonFileStore, SnapshotStore};
use crate::tests::utils::{record, temp_path, temp_sqlite};

const T1: &str = "2026-01-01 09:00:00";
const T2: &str = "2026-01-02 09:00:00";

fn scoped(id: &str, complex: &str, ts: &str) -> ListingRecord {
    let mut r = record(id, ts);
    r.complex_name = complex.to_string();
    r
}

fn round_trip(store: &dyn SnapshotStore) {
    let batch = vec![
        scoped("A", "단지가", T1),
        scoped("B", "단지가", T1),
        scoped("C", "단지나", T1),
    ];
    store.append(&batch).expect("append failed");

    let scope_a = store.load("단지가").expect("load failed");
    assert_eq!(scope_a.len(), 2);
    assert!(scope_a.iter().all(|r| r.complex_name == "단지가"));

    // Field fidelity through the backend.
    let first = &scope_a[0];
    assert_eq!(first.listing_id, "A");
    assert_eq!(first.price_amount, 1_000_000_000);
    assert_eq!(first.area_supply, Some(112.0));
    assert_eq!(first.snapshot_time, T1);

    let all = store.load_all().expect("load_all failed");
    assert_eq!(all.len(), 3);

    store.clear("단지가").expect("clear failed");
    assert!(store.load("단지가").unwrap().is_empty());
    assert_eq!(store.load("단지나").unwrap().len(), 1);
}

#[test]
fn sqlite_round_trip() {
    let store = temp_sqlite();
    round_trip(&store);
}

#[test]
fn json_round_trip() {
    let store = JsonFileStore::new(temp_path("land_watch_json", "json"));
    round_trip(&store);
}

#[test]
fn json_missing_file_loads_empty() {
    let store = JsonFileStore::new(temp_path("land_watch_missing", "json"));
    assert!(store.load_all().unwrap().is_empty());
    assert!(store.load("아무단지").unwrap().is_empty());
}

#[test]
fn duplicate_appends_are_tolerated() {
    // Appends are not idempotent; duplicate rows land in storage and the
    // read side dedups before set operations.
    let store = temp_sqlite();
    let batch = vec![record("A", T1)];
    store.append(&batch).unwrap();
    store.append(&batch).unwrap();

    assert_eq!(store.load("래미안테스트").unwrap().len(), 2);
}

#[test]
fn append_preserves_insertion_order() {
    let store = temp_sqlite();
    store
        .append(&[record("B", T1), record("A", T1), record("C", T2)])
        .unwrap();

    let loaded = store.load("래미안테스트").unwrap();
    let ids: Vec<&str> = loaded.iter().map(|r| r.listing_id.as_str()).collect();
    assert_eq!(ids, vec!["B", "A", "C"]);
}

#[test]
fn area_supply_none_survives_round_trip() {
    let store = temp_sqlite();
    let mut r = record("A", T1);
    r.area_supply = None;
    store.append(&[r]).unwrap();

    let loaded = store.load("래미안테스트").unwrap();
    assert_eq!(loaded[0].area_supply, None);
}
