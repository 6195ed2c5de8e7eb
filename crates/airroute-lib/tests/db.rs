mod common;

use std::thread;

use airroute_lib::{
    load_network, mutate_network, save_network, Error, Leg, LegDraft, Position, RouteNetwork,
};
use chrono::Utc;
use rusqlite::Connection;
use tempfile::tempdir;

use common::sample_tree;

#[test]
fn missing_store_loads_empty() {
    let dir = tempdir().expect("tempdir");
    let network = load_network(&dir.path().join("network.db")).expect("missing file is empty");
    assert_eq!(network.leg_count(), 0);
    assert!(network.airports().is_empty());
}

#[test]
fn saved_network_reloads_identically() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("network.db");
    let fixture = sample_tree();

    save_network(&path, &fixture.network).expect("save succeeds");
    let reloaded = load_network(&path).expect("load succeeds");

    let airports: Vec<_> = fixture.network.airports().iter().cloned().collect();
    let reloaded_airports: Vec<_> = reloaded.airports().iter().cloned().collect();
    assert_eq!(airports, reloaded_airports);

    let legs: Vec<_> = fixture.network.legs().cloned().collect();
    let reloaded_legs: Vec<_> = reloaded.legs().cloned().collect();
    assert_eq!(legs, reloaded_legs);
    assert_eq!(reloaded.root_airport(), Some(fixture.id("A")));
}

#[test]
fn identifiers_continue_after_reload() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("network.db");
    let fixture = sample_tree();
    save_network(&path, &fixture.network).expect("save succeeds");

    let mut reloaded = load_network(&path).expect("load succeeds");
    let airport = reloaded.insert_airport("E", "Echo").expect("insert");
    assert_eq!(airport.id, 5);
    let err = reloaded
        .insert_leg(LegDraft::root(
            fixture.id("A"),
            airport.id,
            Position::Left,
            3,
        ))
        .expect_err("A already has a left leg");
    assert!(matches!(err, Error::DuplicatePosition { .. }));
}

#[test]
fn deletions_are_persisted() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("network.db");
    let mut fixture = sample_tree();
    save_network(&path, &fixture.network).expect("save succeeds");

    let bd = fixture
        .network
        .leg_at(fixture.id("B"), Position::Left)
        .expect("B->D present")
        .id;
    fixture.network.delete_leg(bd).expect("leaf deletes");
    save_network(&path, &fixture.network).expect("save succeeds");

    let reloaded = load_network(&path).expect("load succeeds");
    assert_eq!(reloaded.leg_count(), 2);
    assert!(reloaded.leg(bd).is_none());
}

#[test]
fn orphaned_routes_survive_a_round_trip() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("network.db");
    let fixture = sample_tree();
    save_network(&path, &fixture.network).expect("save succeeds");

    // Remove a parent behind the store's back, as an older release could.
    let connection = Connection::open(&path).expect("open");
    let ab = fixture
        .network
        .leg_at(fixture.id("A"), Position::Left)
        .expect("A->B present")
        .id;
    connection
        .execute("DELETE FROM Routes WHERE routeId = ?1", [ab])
        .expect("delete parent");
    drop(connection);

    let mut reloaded = load_network(&path).expect("orphans are accepted");
    assert_eq!(reloaded.orphans().len(), 1);
    let pruned = reloaded.prune_orphans();
    assert_eq!(pruned.len(), 1);
    assert!(reloaded.orphans().is_empty());
}

#[test]
fn corrupt_rows_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("network.db");
    let fixture = sample_tree();
    save_network(&path, &fixture.network).expect("save succeeds");

    let connection = Connection::open(&path).expect("open");
    connection
        .execute("UPDATE Airports SET createdAt = 'not a time' WHERE code = 'A'", [])
        .expect("update");
    drop(connection);

    let err = load_network(&path).expect_err("bad timestamp");
    assert!(matches!(err, Error::CorruptStore { .. }));
}

#[test]
fn restore_rejects_parents_created_later() {
    let network = sample_tree().network;
    let airports: Vec<_> = network.airports().iter().cloned().collect();
    let legs = vec![Leg {
        id: 1,
        origin: airports[0].id,
        destination: airports[1].id,
        position: Position::Left,
        duration: 10,
        parent: Some(2),
        created_at: Utc::now(),
    }];
    let err = RouteNetwork::restore(airports, legs).expect_err("parent after child");
    assert!(matches!(err, Error::CorruptStore { .. }));
}

#[test]
fn concurrent_mutations_all_land() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("routes.db");

    thread::scope(|scope| {
        for index in 0..12 {
            let path = &path;
            scope.spawn(move || {
                let code = format!("P{index}");
                mutate_network(path, |network| network.insert_airport(&code, &code))
                    .expect("insert commits");
            });
        }
    });

    let reloaded = load_network(&path).expect("load");
    assert_eq!(reloaded.airports().len(), 12);
}

#[test]
fn failed_mutation_writes_nothing() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("routes.db");
    save_network(&path, &sample_tree().network).expect("save");

    let err = mutate_network(&path, |network| {
        network.insert_airport("E", "Echo")?;
        network.insert_airport("A", "Again")
    })
    .expect_err("duplicate code");
    assert!(matches!(err, Error::DuplicateCode { .. }));

    let reloaded = load_network(&path).expect("load");
    assert_eq!(reloaded.airports().len(), 4);
    assert!(reloaded.airport_by_code("E").is_none());
}
