//! Airroute library entry points.
//!
//! This crate models a binary route tree over airports: every airport has at
//! most one outgoing `left` and one outgoing `right` leg, and legs hang off a
//! parent leg or the root airport. It exposes the validated mutations, the
//! nth-node walk, path search and the SQLite-backed store. Higher-level
//! consumers (the CLI) should only depend on the functions exported here
//! instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod airport;
pub mod db;
pub mod error;
pub mod graph;
pub mod leg;
pub mod network;
pub mod output;
pub mod path;
pub mod routing;
pub mod shared;
pub mod store;
pub mod validate;
pub mod walk;

pub use airport::{Airport, AirportId, AirportRegistry};
pub use db::{load_network, mutate_network, save_network};
pub use error::{Error, Result};
pub use graph::{build_graph, Graph};
pub use leg::{Leg, LegDeletion, LegDraft, LegId, Position};
pub use network::{NetworkStats, RouteNetwork};
pub use output::{list_legs, AirportRef, LegSummary, PathSummary, StatsSummary, WalkSummary};
pub use path::PathLeg;
pub use routing::{find_path, find_path_with, plan_path, PathAlgorithm, PathRequest, ShortestPath};
pub use shared::SharedNetwork;
pub use store::{default_store_path, resolve_store_path};
pub use validate::{validate_leg, LegRule};
pub use walk::{find_nth_node, NthNode, WalkStep};
