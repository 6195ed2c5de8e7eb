//! Path search strategies.
//!
//! Each algorithm sits behind the [`PathPlanner`] trait so `plan_path` can
//! pick one per request without knowing how it searches.

use crate::airport::AirportId;
use crate::graph::Graph;
use crate::path::{find_path_bfs, find_path_dijkstra, PathTrace};

use super::PathAlgorithm;

/// Trait for path search strategies.
pub trait PathPlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> PathAlgorithm;

    /// Search `graph` for a path from `start` to `goal`.
    ///
    /// Returns `None` when `goal` is unreachable.
    fn find_path(&self, graph: &Graph, start: AirportId, goal: AirportId) -> Option<PathTrace>;
}

/// Breadth-first planner.
///
/// Returns the path with the fewest legs; leg durations only add up along
/// the way and never steer the search.
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsPlanner;

impl PathPlanner for BfsPlanner {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::Bfs
    }

    fn find_path(&self, graph: &Graph, start: AirportId, goal: AirportId) -> Option<PathTrace> {
        find_path_bfs(graph, start, goal)
    }
}

/// Dijkstra planner minimising total duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPlanner;

impl PathPlanner for DijkstraPlanner {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::Dijkstra
    }

    fn find_path(&self, graph: &Graph, start: AirportId, goal: AirportId) -> Option<PathTrace> {
        find_path_dijkstra(graph, start, goal)
    }
}

/// Select the planner for an algorithm.
pub fn select_planner(algorithm: PathAlgorithm) -> Box<dyn PathPlanner> {
    match algorithm {
        PathAlgorithm::Bfs => Box::new(BfsPlanner),
        PathAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
    }
}
