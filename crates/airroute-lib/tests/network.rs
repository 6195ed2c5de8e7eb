mod common;

use std::collections::HashSet;

use airroute_lib::{Error, LegDraft, Position, RouteNetwork};

use common::{sample_tree, Fixture};

#[test]
fn child_must_start_where_parent_ends() {
    let mut fixture = Fixture::with_airports(&["A", "B", "C", "D"]);
    let ab = fixture.root("A", "B", Position::Left, 10);

    let draft = LegDraft::child(ab.id, fixture.id("A"), fixture.id("C"), Position::Right, 20);
    let err = fixture.network.insert_leg(draft).expect_err("continuity violated");

    assert!(matches!(
        err,
        Error::ParentContinuityViolation { ref origin, ref expected } if origin == "A" && expected == "B"
    ));
    assert_eq!(fixture.network.leg_count(), 1);
}

#[test]
fn second_root_leg_from_same_airport_is_allowed() {
    let mut fixture = Fixture::with_airports(&["A", "B", "C", "D", "X", "Y"]);
    let ab = fixture.root("A", "B", Position::Left, 10);
    fixture.child(&ab, "B", "D", Position::Left, 5);
    fixture.root("A", "C", Position::Right, 20);

    let draft = LegDraft::root(fixture.id("X"), fixture.id("Y"), Position::Left, 7);
    let err = fixture.network.insert_leg(draft).expect_err("foreign root rejected");
    assert!(matches!(err, Error::RootMismatch { ref root } if root == "A"));
    assert_eq!(err.to_string(), "root routes must start from 'A'; select a parent route");
    assert_eq!(fixture.network.root_legs().len(), 2);
}

#[test]
fn deleting_a_leg_with_children_fails() {
    let mut fixture = sample_tree();
    let ab = fixture
        .network
        .leg_at(fixture.id("A"), Position::Left)
        .expect("A->B present")
        .id;

    let err = fixture.network.delete_leg(ab).expect_err("A->B has a child");
    assert!(matches!(err, Error::HasChildren { count: 1 }));
    assert!(fixture.network.leg(ab).is_some());
}

#[test]
fn deleting_a_referenced_airport_fails() {
    let mut fixture = sample_tree();
    let b = fixture.id("B");

    let err = fixture.network.delete_airport(b).expect_err("B is in use");
    assert!(matches!(err, Error::AirportInUse { ref code, routes: 2 } if code == "B"));
    assert!(fixture.network.airport(b).is_some());
}

#[test]
fn unused_airport_can_be_deleted() {
    let mut fixture = Fixture::with_airports(&["A", "B", "Z"]);
    fixture.root("A", "B", Position::Left, 10);

    let removed = fixture
        .network
        .delete_airport(fixture.id("Z"))
        .expect("Z is unused");
    assert_eq!(removed.code, "Z");
    assert!(fixture.network.airport_by_code("Z").is_none());
}

#[test]
fn duplicate_position_reports_origin_and_side() {
    let mut fixture = sample_tree();
    let draft = LegDraft::root(fixture.id("A"), fixture.id("D"), Position::Left, 3);

    let err = fixture.network.insert_leg(draft).expect_err("A already has a left leg");
    assert_eq!(
        err.to_string(),
        "a route from 'A' with position 'left' already exists"
    );
}

#[test]
fn leaves_delete_and_flag_sole_root_removal() {
    let mut fixture = Fixture::with_airports(&["A", "B", "C"]);
    let ab = fixture.root("A", "B", Position::Left, 10);
    let ac = fixture.root("A", "C", Position::Right, 20);

    let first = fixture.network.delete_leg(ab.id).expect("leaf deletes");
    assert!(!first.root_removed);

    let second = fixture.network.delete_leg(ac.id).expect("leaf deletes");
    assert!(second.root_removed);
    assert_eq!(second.leg.id, ac.id);
    assert!(fixture.network.root_airport().is_none());

    // With no root left, any airport may start the tree again.
    fixture.root("B", "C", Position::Left, 4);
    assert_eq!(fixture.network.root_airport(), Some(fixture.id("B")));
}

#[test]
fn rejected_mutations_leave_no_trace() {
    let mut fixture = sample_tree();
    let before: Vec<_> = fixture.network.legs().cloned().collect();

    let a = fixture.id("A");
    let attempts = [
        LegDraft::root(a, a, Position::Left, 1),
        LegDraft::root(a, fixture.id("D"), Position::Right, 1),
        LegDraft::root(fixture.id("C"), fixture.id("D"), Position::Left, 1),
        LegDraft::root(a, fixture.id("D"), Position::Left, 0),
        LegDraft::child(999, fixture.id("D"), fixture.id("C"), Position::Left, 1),
    ];
    for draft in attempts {
        assert!(fixture.network.insert_leg(draft).is_err(), "{draft:?}");
    }

    let after: Vec<_> = fixture.network.legs().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn committed_legs_keep_tree_invariants() {
    let mut fixture = Fixture::with_airports(&["A", "B", "C", "D", "E", "F"]);
    let ab = fixture.root("A", "B", Position::Left, 10);
    let ac = fixture.root("A", "C", Position::Right, 20);
    let bd = fixture.child(&ab, "B", "D", Position::Left, 5);
    fixture.child(&ab, "B", "E", Position::Right, 6);
    fixture.child(&ac, "C", "F", Position::Left, 7);
    fixture.child(&bd, "D", "F", Position::Right, 8);

    let network: &RouteNetwork = &fixture.network;

    let mut slots = HashSet::new();
    for leg in network.legs() {
        assert!(slots.insert((leg.origin, leg.position)), "slot reused");
    }

    let roots: HashSet<_> = network.root_legs().iter().map(|leg| leg.origin).collect();
    assert_eq!(roots.len(), 1);

    for leg in network.legs() {
        if let Some(parent) = leg.parent {
            let parent = network.leg(parent).expect("parent exists");
            assert_eq!(leg.origin, parent.destination);
        }
    }
}

#[test]
fn leg_back_to_the_root_is_rejected() {
    let mut fixture = sample_tree();
    let bd = fixture
        .network
        .leg_at(fixture.id("B"), Position::Left)
        .expect("B->D present")
        .clone();

    let draft = LegDraft::child(bd.id, fixture.id("D"), fixture.id("A"), Position::Left, 1);
    let err = fixture.network.insert_leg(draft).expect_err("cycle rejected");
    assert!(matches!(err, Error::CycleViolation { .. }));
}

#[test]
fn two_branches_may_reach_the_same_airport() {
    let mut fixture = Fixture::with_airports(&["A", "B", "C", "D"]);
    let ab = fixture.root("A", "B", Position::Left, 10);
    fixture.root("A", "C", Position::Right, 20);
    let bd = fixture.child(&ab, "B", "D", Position::Left, 5);

    let dc = fixture.child(&bd, "D", "C", Position::Left, 2);
    assert_eq!(dc.destination, fixture.id("C"));
    assert_eq!(fixture.network.usage_count(fixture.id("C")), 2);
}

#[test]
fn loop_through_a_sibling_branch_is_rejected() {
    let mut fixture = Fixture::with_airports(&["A", "B", "C", "D", "X"]);
    let ab = fixture.root("A", "B", Position::Left, 10);
    let ac = fixture.root("A", "C", Position::Right, 20);
    let bd = fixture.child(&ab, "B", "D", Position::Left, 5);
    fixture.child(&bd, "D", "C", Position::Left, 1);
    let cx = fixture.child(&ac, "C", "X", Position::Left, 1);

    // B -> D -> C -> X already exists; X -> B would close the loop.
    let draft = LegDraft::child(cx.id, fixture.id("X"), fixture.id("B"), Position::Left, 1);
    let err = fixture.network.insert_leg(draft).expect_err("cycle rejected");
    assert!(matches!(err, Error::CycleViolation { ref destination } if destination == "B"));
    assert_eq!(fixture.network.leg_count(), 5);
    assert!(fixture
        .network
        .leg_at(fixture.id("X"), Position::Left)
        .is_none());
}

#[test]
fn stats_report_longest_route() {
    let fixture = sample_tree();
    let stats = fixture.network.stats();
    assert_eq!(stats.total_airports, 4);
    assert_eq!(stats.total_routes, 3);
    let longest = stats.longest_route.expect("routes exist");
    assert_eq!(longest.destination, fixture.id("C"));
    assert_eq!(longest.duration, 20);
}
