use std::collections::HashMap;
use std::sync::Arc;

use crate::airport::AirportId;
use crate::leg::{LegId, Position};
use crate::network::RouteNetwork;

/// Directed edge derived from a single leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub leg: LegId,
    pub target: AirportId,
    pub duration: u32,
    pub position: Position,
}

/// Plain `origin -> destination` view of the legs used by path search.
///
/// Parents and the root group play no part here: every committed leg,
/// orphaned or not, becomes an edge.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Arc<HashMap<AirportId, Vec<Edge>>>,
}

impl Graph {
    /// Outgoing edges of `airport` in leg creation order.
    pub fn neighbours(&self, airport: AirportId) -> &[Edge] {
        self.adjacency
            .get(&airport)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}

/// Build the search graph for a network snapshot.
pub fn build_graph(network: &RouteNetwork) -> Graph {
    let mut adjacency: HashMap<AirportId, Vec<Edge>> = HashMap::new();
    for airport in network.airports().iter() {
        adjacency.entry(airport.id).or_default();
    }
    // `legs()` iterates in creation order, so each list stays ordered.
    for leg in network.legs() {
        adjacency.entry(leg.origin).or_default().push(Edge {
            leg: leg.id,
            target: leg.destination,
            duration: leg.duration,
            position: leg.position,
        });
    }
    Graph {
        adjacency: Arc::new(adjacency),
    }
}
