mod common;

use std::collections::{HashMap, VecDeque};

use airroute_lib::{
    find_path, find_path_with, plan_path, AirportId, Error, PathAlgorithm, PathRequest, Position,
    RouteNetwork,
};

use common::{sample_tree, Fixture};

#[test]
fn bfs_path_through_sample_tree() {
    let fixture = sample_tree();
    let plan = find_path(&fixture.network, fixture.id("A"), fixture.id("D")).expect("path exists");

    assert_eq!(plan.algorithm, PathAlgorithm::Bfs);
    assert_eq!(
        plan.airports,
        vec![fixture.id("A"), fixture.id("B"), fixture.id("D")]
    );
    assert_eq!(plan.total_duration, 15);
    assert_eq!(plan.hop_count(), 2);
    assert_eq!(plan.legs[1].position, Position::Left);
    assert_eq!(plan.legs[1].duration, 5);
}

#[test]
fn plan_path_resolves_codes() {
    let fixture = sample_tree();
    let plan = plan_path(&fixture.network, &PathRequest::bfs(" A ", "C")).expect("path exists");
    assert_eq!(plan.total_duration, 20);

    let err = plan_path(&fixture.network, &PathRequest::bfs("A", "ZZZ")).expect_err("unknown");
    assert!(matches!(err, Error::UnknownAirport { ref reference } if reference == "ZZZ"));
}

#[test]
fn unreachable_airports_report_names() {
    let fixture = sample_tree();
    let err = find_path(&fixture.network, fixture.id("D"), fixture.id("A")).expect_err("no path");
    assert_eq!(err.to_string(), "no path found between D and A");
}

#[test]
fn same_endpoints_are_rejected() {
    let fixture = sample_tree();
    let err = find_path(&fixture.network, fixture.id("B"), fixture.id("B")).expect_err("same");
    assert!(matches!(err, Error::SameEndpoints { ref airport } if airport == "B"));
}

/// Two branches reach `T`: a single slow leg and a three-leg quick detour.
fn diamond() -> Fixture {
    let mut fixture = Fixture::with_airports(&["S", "T", "M", "N", "X"]);
    let st = fixture.root("S", "T", Position::Left, 90);
    let sm = fixture.root("S", "M", Position::Right, 5);
    let mn = fixture.child(&sm, "M", "N", Position::Left, 5);
    fixture.child(&mn, "N", "T", Position::Left, 5);
    fixture.child(&st, "T", "X", Position::Left, 1);
    fixture
}

#[test]
fn bfs_keeps_fewest_legs_even_when_slower() {
    let fixture = diamond();
    let bfs = find_path_with(
        &fixture.network,
        fixture.id("S"),
        fixture.id("X"),
        PathAlgorithm::Bfs,
    )
    .expect("path exists");
    assert_eq!(bfs.hop_count(), 2);
    assert_eq!(bfs.total_duration, 91);
}

#[test]
fn dijkstra_minimises_duration() {
    let fixture = diamond();
    let dijkstra = find_path_with(
        &fixture.network,
        fixture.id("S"),
        fixture.id("X"),
        PathAlgorithm::Dijkstra,
    )
    .expect("path exists");
    assert_eq!(dijkstra.algorithm, PathAlgorithm::Dijkstra);
    assert_eq!(dijkstra.hop_count(), 4);
    assert_eq!(dijkstra.total_duration, 16);
    assert_eq!(
        dijkstra.airports,
        ["S", "M", "N", "T", "X"].map(|code| fixture.id(code)).to_vec()
    );
}

/// Reference hop distances by an independent breadth-first sweep.
fn hop_distances(network: &RouteNetwork, start: AirportId) -> HashMap<AirportId, usize> {
    let mut distances = HashMap::from([(start, 0)]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let depth = distances[&current];
        for leg in network.outgoing(current) {
            distances.entry(leg.destination).or_insert_with(|| {
                queue.push_back(leg.destination);
                depth + 1
            });
        }
    }
    distances
}

#[test]
fn bfs_never_uses_more_legs_than_needed() {
    let fixture = diamond();
    let network = &fixture.network;
    for origin in network.airports().iter() {
        let distances = hop_distances(network, origin.id);
        for target in network.airports().iter() {
            if target.id == origin.id {
                continue;
            }
            match find_path(network, origin.id, target.id) {
                Ok(plan) => assert_eq!(Some(&plan.hop_count()), distances.get(&target.id)),
                Err(Error::PathNotFound { .. }) => assert!(!distances.contains_key(&target.id)),
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }
}
