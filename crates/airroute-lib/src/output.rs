//! Name-resolved, serialisable views of query results and listings.
//!
//! Core operations return identifiers; these summaries resolve them against a
//! network snapshot so callers can render text or JSON without touching the
//! network again.

use std::fmt::Write;

use serde::Serialize;

use crate::airport::{Airport, AirportId};
use crate::leg::{Leg, LegId, Position};
use crate::network::{NetworkStats, RouteNetwork};
use crate::routing::{PathAlgorithm, ShortestPath};
use crate::walk::NthNode;

/// Airport reference with its code and name resolved.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AirportRef {
    pub id: AirportId,
    pub code: String,
    pub name: String,
}

impl AirportRef {
    pub fn resolve(network: &RouteNetwork, id: AirportId) -> Self {
        match network.airport(id) {
            Some(airport) => Self::from(airport),
            None => Self {
                id,
                code: "?".to_string(),
                name: "<unknown>".to_string(),
            },
        }
    }
}

impl From<&Airport> for AirportRef {
    fn from(airport: &Airport) -> Self {
        Self {
            id: airport.id,
            code: airport.code.clone(),
            name: airport.name.clone(),
        }
    }
}

/// One listed leg.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LegSummary {
    pub id: LegId,
    pub from: AirportRef,
    pub to: AirportRef,
    pub position: Position,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<LegId>,
    /// The parent leg no longer exists.
    pub orphaned: bool,
}

impl LegSummary {
    pub fn from_leg(network: &RouteNetwork, leg: &Leg) -> Self {
        Self {
            id: leg.id,
            from: AirportRef::resolve(network, leg.origin),
            to: AirportRef::resolve(network, leg.destination),
            position: leg.position,
            duration: leg.duration,
            parent: leg.parent,
            orphaned: leg.parent.is_some_and(|parent| network.leg(parent).is_none()),
        }
    }

    /// `From -> To (position)`, the label used in listings.
    pub fn label(&self) -> String {
        format!("{} -> {} ({})", self.from.name, self.to.name, self.position)
    }
}

/// Every leg, in creation order.
pub fn list_legs(network: &RouteNetwork) -> Vec<LegSummary> {
    network
        .legs()
        .map(|leg| LegSummary::from_leg(network, leg))
        .collect()
}

/// Airport reached during a walk.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WalkStepSummary {
    pub airport: AirportRef,
    pub duration: u32,
    pub cumulative: u64,
}

/// Structured representation of an nth-node walk.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WalkSummary {
    pub direction: Position,
    pub n: usize,
    pub start: AirportRef,
    pub airport: AirportRef,
    pub total_duration: u64,
    pub steps: Vec<WalkStepSummary>,
}

impl WalkSummary {
    pub fn from_walk(network: &RouteNetwork, walk: &NthNode) -> Self {
        Self {
            direction: walk.direction,
            n: walk.n,
            start: AirportRef::resolve(network, walk.start),
            airport: AirportRef::resolve(network, walk.airport),
            total_duration: walk.total_duration,
            steps: walk
                .steps
                .iter()
                .map(|step| WalkStepSummary {
                    airport: AirportRef::resolve(network, step.airport),
                    duration: step.duration,
                    cumulative: step.cumulative,
                })
                .collect(),
        }
    }

    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Found {}th {} node: {} (Total duration: {} mins)",
            self.n, self.direction, self.airport.name, self.total_duration
        );
        for (index, step) in self.steps.iter().enumerate() {
            let _ = writeln!(
                buffer,
                "{:>3}: {} ({}) +{} = {} mins",
                index, step.airport.name, step.airport.code, step.duration, step.cumulative
            );
        }
        buffer
    }
}

/// Leg within a rendered path.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PathLegSummary {
    pub leg: LegId,
    pub from: String,
    pub to: String,
    pub duration: u32,
    pub position: Position,
}

/// Structured representation of a path search.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PathSummary {
    pub algorithm: PathAlgorithm,
    pub from: AirportRef,
    pub to: AirportRef,
    pub total_duration: u64,
    pub hops: usize,
    /// Airport names in travel order.
    pub path: Vec<String>,
    pub legs: Vec<PathLegSummary>,
}

impl PathSummary {
    pub fn from_path(network: &RouteNetwork, plan: &ShortestPath) -> Self {
        let name = |id| network.airports().name_of(id);
        Self {
            algorithm: plan.algorithm,
            from: AirportRef::resolve(network, plan.from),
            to: AirportRef::resolve(network, plan.to),
            total_duration: plan.total_duration,
            hops: plan.hop_count(),
            path: plan.airports.iter().map(|&id| name(id)).collect(),
            legs: plan
                .legs
                .iter()
                .map(|leg| PathLegSummary {
                    leg: leg.leg,
                    from: name(leg.origin),
                    to: name(leg.destination),
                    duration: leg.duration,
                    position: leg.position,
                })
                .collect(),
        }
    }

    /// Airport names joined with arrows.
    pub fn path_display(&self) -> String {
        self.path.join(" → ")
    }

    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Shortest path found: {} ({} mins, {} hops, algorithm: {})",
            self.path_display(),
            self.total_duration,
            self.hops,
            self.algorithm
        );
        for leg in &self.legs {
            let _ = writeln!(
                buffer,
                " - {} -> {} ({}, {} mins)",
                leg.from, leg.to, leg.position, leg.duration
            );
        }
        buffer
    }
}

/// Network statistics with the longest route resolved.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatsSummary {
    pub total_airports: usize,
    pub total_routes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_airport: Option<AirportRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longest_route: Option<LegSummary>,
}

impl StatsSummary {
    pub fn from_stats(network: &RouteNetwork, stats: &NetworkStats) -> Self {
        Self {
            total_airports: stats.total_airports,
            total_routes: stats.total_routes,
            root_airport: network
                .root_airport()
                .map(|id| AirportRef::resolve(network, id)),
            longest_route: stats
                .longest_route
                .as_ref()
                .map(|leg| LegSummary::from_leg(network, leg)),
        }
    }

    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "Airports: {}", self.total_airports);
        let _ = writeln!(buffer, "Routes: {}", self.total_routes);
        if let Some(root) = &self.root_airport {
            let _ = writeln!(buffer, "Root airport: {} - {}", root.code, root.name);
        }
        match &self.longest_route {
            Some(leg) => {
                let _ = writeln!(
                    buffer,
                    "Longest route: {} [{} mins]",
                    leg.label(),
                    leg.duration
                );
            }
            None => {
                let _ = writeln!(buffer, "Longest route: none");
            }
        }
        buffer
    }
}
