//! Path planning between two airports.
//!
//! This module provides:
//! - [`PathAlgorithm`] - Supported search algorithms (BFS, Dijkstra)
//! - [`PathRequest`] - Code-based planning request
//! - [`ShortestPath`] - Planned path result
//! - [`find_path`] / [`plan_path`] - Entry points
//!
//! Planning views the legs as a general directed graph (see
//! [`build_graph`](crate::graph::build_graph)); parent links and the root
//! group are ignored.
//!
//! # Algorithms
//!
//! [`PathAlgorithm::Bfs`] is the default and returns the path with the fewest
//! legs, reporting its summed duration. When durations differ that path can
//! be slower than another one. [`PathAlgorithm::Dijkstra`] returns the
//! minimum-duration path instead.
//!
//! # Example
//!
//! ```ignore
//! use airroute_lib::{plan_path, PathRequest, RouteNetwork};
//!
//! let network: RouteNetwork = load_network(&path)?;
//! let plan = plan_path(&network, &PathRequest::bfs("COK", "DXB"))?;
//! println!("{} legs, {} minutes", plan.hop_count(), plan.total_duration);
//! ```

mod planner;

pub use planner::{select_planner, BfsPlanner, DijkstraPlanner, PathPlanner};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::airport::AirportId;
use crate::error::{Error, Result};
use crate::graph::build_graph;
use crate::network::RouteNetwork;
use crate::path::PathLeg;

/// Supported path search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PathAlgorithm {
    /// Breadth-first search (fewest legs).
    #[default]
    Bfs,
    /// Dijkstra's algorithm (lowest total duration).
    Dijkstra,
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            PathAlgorithm::Bfs => "bfs",
            PathAlgorithm::Dijkstra => "dijkstra",
        };
        f.write_str(value)
    }
}

impl FromStr for PathAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(PathAlgorithm::Bfs),
            "dijkstra" => Ok(PathAlgorithm::Dijkstra),
            other => Err(format!("unknown path algorithm '{other}'")),
        }
    }
}

/// High-level path request addressed by airport codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRequest {
    pub from: String,
    pub to: String,
    pub algorithm: PathAlgorithm,
}

impl PathRequest {
    /// Convenience constructor for BFS requests.
    pub fn bfs(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            algorithm: PathAlgorithm::Bfs,
        }
    }

    /// Convenience constructor for Dijkstra requests.
    pub fn dijkstra(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            algorithm: PathAlgorithm::Dijkstra,
            ..Self::bfs(from, to)
        }
    }
}

/// Planned path returned by the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortestPath {
    pub algorithm: PathAlgorithm,
    pub from: AirportId,
    pub to: AirportId,
    pub total_duration: u64,
    /// Airports visited, starting with `from` and ending with `to`.
    pub airports: Vec<AirportId>,
    /// Per-leg details in travel order.
    pub legs: Vec<PathLeg>,
}

impl ShortestPath {
    /// Number of legs in the path.
    pub fn hop_count(&self) -> usize {
        self.legs.len()
    }
}

/// Find a path with the default (BFS) algorithm.
pub fn find_path(network: &RouteNetwork, from: AirportId, to: AirportId) -> Result<ShortestPath> {
    find_path_with(network, from, to, PathAlgorithm::default())
}

/// Find a path between two airport identifiers with a chosen algorithm.
pub fn find_path_with(
    network: &RouteNetwork,
    from: AirportId,
    to: AirportId,
    algorithm: PathAlgorithm,
) -> Result<ShortestPath> {
    let from_airport = network
        .airport(from)
        .ok_or_else(|| Error::unknown_airport_id(from))?;
    let to_airport = network
        .airport(to)
        .ok_or_else(|| Error::unknown_airport_id(to))?;
    if from == to {
        return Err(Error::SameEndpoints {
            airport: from_airport.name.clone(),
        });
    }

    let graph = build_graph(network);
    let planner = select_planner(algorithm);
    let trace = planner
        .find_path(&graph, from, to)
        .ok_or_else(|| Error::PathNotFound {
            from: from_airport.name.clone(),
            to: to_airport.name.clone(),
        })?;

    debug!(
        %algorithm,
        from,
        to,
        hops = trace.legs.len(),
        duration = trace.total_duration,
        "path found"
    );

    Ok(ShortestPath {
        algorithm,
        from,
        to,
        total_duration: trace.total_duration,
        airports: trace.airports(),
        legs: trace.legs,
    })
}

/// Resolve the request's airport codes and find a path between them.
pub fn plan_path(network: &RouteNetwork, request: &PathRequest) -> Result<ShortestPath> {
    let from = network.resolve_code(&request.from)?.id;
    let to = network.resolve_code(&request.to)?.id;
    find_path_with(network, from, to, request.algorithm)
}
