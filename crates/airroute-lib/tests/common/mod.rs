//! Shared fixtures for the integration tests.

use std::collections::HashMap;

use airroute_lib::{AirportId, Leg, LegDraft, Position, RouteNetwork};

/// Network plus a code-to-id lookup for its airports.
pub struct Fixture {
    pub network: RouteNetwork,
    ids: HashMap<&'static str, AirportId>,
}

#[allow(dead_code)]
impl Fixture {
    /// Register one airport per code, named after the code.
    pub fn with_airports(codes: &[&'static str]) -> Self {
        let mut network = RouteNetwork::new();
        let ids = codes
            .iter()
            .map(|&code| {
                let airport = network.insert_airport(code, code).expect("airport inserts");
                (code, airport.id)
            })
            .collect();
        Self { network, ids }
    }

    pub fn id(&self, code: &str) -> AirportId {
        self.ids[code]
    }

    pub fn root(&mut self, from: &str, to: &str, position: Position, duration: u32) -> Leg {
        let draft = LegDraft::root(self.id(from), self.id(to), position, duration);
        self.network.insert_leg(draft).expect("root leg inserts")
    }

    pub fn child(
        &mut self,
        parent: &Leg,
        from: &str,
        to: &str,
        position: Position,
        duration: u32,
    ) -> Leg {
        let draft = LegDraft::child(parent.id, self.id(from), self.id(to), position, duration);
        self.network.insert_leg(draft).expect("child leg inserts")
    }
}

/// A→B (10, left, root), A→C (20, right, root), B→D (5, left, parent A→B).
#[allow(dead_code)]
pub fn sample_tree() -> Fixture {
    let mut fixture = Fixture::with_airports(&["A", "B", "C", "D"]);
    let ab = fixture.root("A", "B", Position::Left, 10);
    fixture.root("A", "C", Position::Right, 20);
    fixture.child(&ab, "B", "D", Position::Left, 5);
    fixture
}

/// A left-leaning chain of `depth` legs starting at `N0`.
#[allow(dead_code)]
pub fn left_chain(depth: usize, duration: u32) -> (RouteNetwork, Vec<AirportId>) {
    let mut network = RouteNetwork::new();
    let ids: Vec<AirportId> = (0..=depth)
        .map(|index| {
            let code = format!("N{index}");
            network.insert_airport(&code, &code).expect("airport inserts").id
        })
        .collect();

    let mut parent = None;
    for pair in ids.windows(2) {
        let draft = LegDraft {
            origin: pair[0],
            destination: pair[1],
            position: Position::Left,
            duration,
            parent,
        };
        parent = Some(network.insert_leg(draft).expect("chain leg inserts").id);
    }
    (network, ids)
}
