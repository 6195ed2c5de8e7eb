use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::airport::AirportId;
use crate::graph::{Edge, Graph};
use crate::leg::{LegId, Position};

/// A leg taken while following a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathLeg {
    pub leg: LegId,
    pub origin: AirportId,
    pub destination: AirportId,
    pub duration: u32,
    pub position: Position,
}

impl PathLeg {
    fn from_edge(origin: AirportId, edge: &Edge) -> Self {
        Self {
            leg: edge.leg,
            origin,
            destination: edge.target,
            duration: edge.duration,
            position: edge.position,
        }
    }
}

/// Raw search result: the legs taken and their summed duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTrace {
    pub start: AirportId,
    pub total_duration: u64,
    pub legs: Vec<PathLeg>,
}

impl PathTrace {
    /// Start airport followed by the destination of every leg.
    pub fn airports(&self) -> Vec<AirportId> {
        std::iter::once(self.start)
            .chain(self.legs.iter().map(|leg| leg.destination))
            .collect()
    }
}

/// Breadth-first search from `start` to `goal`.
///
/// Airports are expanded in FIFO order, each at most once, and the first
/// time `goal` is dequeued its accumulated path wins. The result therefore
/// has the fewest legs; with unequal durations it is not necessarily the
/// quickest path. See [`find_path_dijkstra`] for that.
pub fn find_path_bfs(graph: &Graph, start: AirportId, goal: AirportId) -> Option<PathTrace> {
    let mut queue = VecDeque::new();
    let mut visited = HashSet::new();
    queue.push_back((start, 0u64, Vec::<PathLeg>::new()));

    while let Some((current, duration, legs)) = queue.pop_front() {
        if current == goal {
            return Some(PathTrace {
                start,
                total_duration: duration,
                legs,
            });
        }
        if !visited.insert(current) {
            continue;
        }

        for edge in graph.neighbours(current) {
            if visited.contains(&edge.target) {
                continue;
            }
            let mut next_legs = legs.clone();
            next_legs.push(PathLeg::from_edge(current, edge));
            queue.push_back((edge.target, duration + u64::from(edge.duration), next_legs));
        }
    }

    None
}

/// Dijkstra's algorithm over leg durations.
///
/// Ties on total duration prefer fewer legs, then the lower airport id.
pub fn find_path_dijkstra(graph: &Graph, start: AirportId, goal: AirportId) -> Option<PathTrace> {
    let mut best: HashMap<AirportId, (u64, usize)> = HashMap::new();
    let mut parents: HashMap<AirportId, PathLeg> = HashMap::new();
    let mut queue = BinaryHeap::new();

    best.insert(start, (0, 0));
    queue.push(QueueEntry {
        cost: 0,
        hops: 0,
        node: start,
    });

    while let Some(entry) = queue.pop() {
        if best
            .get(&entry.node)
            .is_some_and(|&known| known < (entry.cost, entry.hops))
        {
            continue;
        }

        if entry.node == goal {
            return Some(PathTrace {
                start,
                total_duration: entry.cost,
                legs: reconstruct_legs(&parents, start, goal),
            });
        }

        for edge in graph.neighbours(entry.node) {
            let candidate = (entry.cost + u64::from(edge.duration), entry.hops + 1);
            let improves = best
                .get(&edge.target)
                .map_or(true, |&known| candidate < known);
            if improves {
                best.insert(edge.target, candidate);
                parents.insert(edge.target, PathLeg::from_edge(entry.node, edge));
                queue.push(QueueEntry {
                    cost: candidate.0,
                    hops: candidate.1,
                    node: edge.target,
                });
            }
        }
    }

    None
}

fn reconstruct_legs(
    parents: &HashMap<AirportId, PathLeg>,
    start: AirportId,
    goal: AirportId,
) -> Vec<PathLeg> {
    let mut legs = Vec::new();
    let mut current = goal;
    while current != start {
        let Some(leg) = parents.get(&current) else {
            break;
        };
        legs.push(leg.clone());
        current = leg.origin;
    }
    legs.reverse();
    legs
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    cost: u64,
    hops: usize,
    node: AirportId,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.hops.cmp(&self.hops))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
