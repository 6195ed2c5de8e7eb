//! The route topology: airports plus the legs that join them into a single
//! rooted binary tree.
//!
//! All mutations go through [`RouteNetwork`]. Each one validates against the
//! current state first and only then updates the leg map and its indices, so
//! a rejected request never leaves partial state behind.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};

use crate::airport::{Airport, AirportId, AirportRegistry};
use crate::error::{Error, Result};
use crate::leg::{Leg, LegDeletion, LegDraft, LegId, Position};
use crate::validate::validate_leg;

/// Aggregate figures about the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    pub total_airports: usize,
    pub total_routes: usize,
    /// Leg with the largest duration; the earliest one wins ties.
    pub longest_route: Option<Leg>,
}

/// In-memory airports and legs with the indices needed to keep the tree
/// invariants cheap to check.
#[derive(Debug, Clone, Default)]
pub struct RouteNetwork {
    airports: AirportRegistry,
    legs: BTreeMap<LegId, Leg>,
    slots: HashMap<(AirportId, Position), LegId>,
    children: HashMap<LegId, BTreeSet<LegId>>,
    root_legs: BTreeSet<LegId>,
    usage: HashMap<AirportId, usize>,
    next_leg_id: LegId,
}

impl RouteNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a network from persisted rows.
    ///
    /// Tree rules are not re-run: orphaned legs left behind by an earlier root
    /// deletion are legitimate. Rows that break storage-level invariants are
    /// rejected with [`Error::CorruptStore`].
    pub fn restore(airports: Vec<Airport>, legs: Vec<Leg>) -> Result<Self> {
        let mut network = Self::new();
        for airport in airports {
            network.airports.restore(airport)?;
        }

        let mut legs = legs;
        legs.sort_by_key(|leg| leg.id);
        for leg in legs {
            network.restore_leg(leg)?;
        }
        Ok(network)
    }

    fn restore_leg(&mut self, leg: Leg) -> Result<()> {
        let corrupt = |message: String| Err(Error::CorruptStore { message });

        if self.legs.contains_key(&leg.id) {
            return corrupt(format!("duplicate route id {}", leg.id));
        }
        for airport in [leg.origin, leg.destination] {
            if self.airports.get(airport).is_none() {
                return corrupt(format!("route {} references unknown airport {airport}", leg.id));
            }
        }
        if self.slots.contains_key(&(leg.origin, leg.position)) {
            return corrupt(format!(
                "route {} duplicates the {} slot of airport {}",
                leg.id, leg.position, leg.origin
            ));
        }
        if leg.parent.is_some_and(|parent| parent >= leg.id) {
            return corrupt(format!("route {} has a parent created after it", leg.id));
        }
        if leg.duration == 0 {
            return corrupt(format!("route {} has a zero duration", leg.id));
        }

        self.next_leg_id = self.next_leg_id.max(leg.id);
        self.attach(leg);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Register a new airport.
    pub fn insert_airport(&mut self, code: &str, name: &str) -> Result<Airport> {
        let airport = self.airports.insert(code, name)?;
        debug!(id = airport.id, code = %airport.code, "airport added");
        Ok(airport)
    }

    /// Delete an airport that no leg references.
    pub fn delete_airport(&mut self, id: AirportId) -> Result<Airport> {
        let airport = self
            .airports
            .get(id)
            .ok_or_else(|| Error::unknown_airport_id(id))?;
        let routes = self.usage_count(id);
        if routes > 0 {
            return Err(Error::AirportInUse {
                code: airport.code.clone(),
                routes,
            });
        }

        let removed = self
            .airports
            .remove(id)
            .ok_or_else(|| Error::unknown_airport_id(id))?;
        debug!(id, code = %removed.code, "airport deleted");
        Ok(removed)
    }

    /// Validate and commit a new leg.
    pub fn insert_leg(&mut self, draft: LegDraft) -> Result<Leg> {
        validate_leg(self, &draft)?;

        self.next_leg_id += 1;
        let leg = Leg {
            id: self.next_leg_id,
            origin: draft.origin,
            destination: draft.destination,
            position: draft.position,
            duration: draft.duration,
            parent: draft.parent,
            created_at: Utc::now(),
        };
        debug!(
            id = leg.id,
            origin = leg.origin,
            destination = leg.destination,
            position = %leg.position,
            parent = ?leg.parent,
            "route added"
        );
        self.attach(leg.clone());
        Ok(leg)
    }

    /// Delete a childless leg.
    ///
    /// Never cascades. When the removed leg was the sole rootless leg the
    /// outcome is flagged with `root_removed`; callers decide whether to
    /// [`prune_orphans`](Self::prune_orphans).
    pub fn delete_leg(&mut self, id: LegId) -> Result<LegDeletion> {
        let leg = self.legs.get(&id).ok_or(Error::UnknownLeg { id })?;
        let count = self.children.get(&id).map_or(0, BTreeSet::len);
        if count > 0 {
            return Err(Error::HasChildren { count });
        }

        let root_removed = leg.is_root() && self.root_legs.len() == 1;
        let leg = self.detach(id).ok_or(Error::UnknownLeg { id })?;
        if root_removed {
            warn!(id, "deleted the only root route; the network has no root");
        } else {
            debug!(id, "route deleted");
        }
        Ok(LegDeletion { leg, root_removed })
    }

    /// Remove every leg whose parent no longer exists, repeating until the
    /// remaining legs all hang off an existing parent or are rootless.
    ///
    /// Returns the removed legs in removal order.
    pub fn prune_orphans(&mut self) -> Vec<Leg> {
        let mut removed = Vec::new();
        loop {
            let orphans: Vec<LegId> = self
                .legs
                .values()
                .filter(|leg| leg.parent.is_some_and(|parent| !self.legs.contains_key(&parent)))
                .map(|leg| leg.id)
                .collect();
            if orphans.is_empty() {
                break;
            }
            for id in orphans {
                if let Some(leg) = self.detach(id) {
                    removed.push(leg);
                }
            }
        }
        if !removed.is_empty() {
            debug!(count = removed.len(), "pruned orphaned routes");
        }
        removed
    }

    fn attach(&mut self, leg: Leg) {
        self.slots.insert((leg.origin, leg.position), leg.id);
        match leg.parent {
            Some(parent) => {
                self.children.entry(parent).or_default().insert(leg.id);
            }
            None => {
                self.root_legs.insert(leg.id);
            }
        }
        *self.usage.entry(leg.origin).or_default() += 1;
        *self.usage.entry(leg.destination).or_default() += 1;
        self.legs.insert(leg.id, leg);
    }

    fn detach(&mut self, id: LegId) -> Option<Leg> {
        let leg = self.legs.remove(&id)?;
        self.slots.remove(&(leg.origin, leg.position));
        match leg.parent {
            Some(parent) => {
                if let Some(siblings) = self.children.get_mut(&parent) {
                    siblings.remove(&id);
                    if siblings.is_empty() {
                        self.children.remove(&parent);
                    }
                }
            }
            None => {
                self.root_legs.remove(&id);
            }
        }
        self.children.remove(&id);
        for airport in [leg.origin, leg.destination] {
            if let Some(count) = self.usage.get_mut(&airport) {
                *count -= 1;
                if *count == 0 {
                    self.usage.remove(&airport);
                }
            }
        }
        Some(leg)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn airports(&self) -> &AirportRegistry {
        &self.airports
    }

    pub fn airport(&self, id: AirportId) -> Option<&Airport> {
        self.airports.get(id)
    }

    pub fn airport_by_code(&self, code: &str) -> Option<&Airport> {
        self.airports.by_code(code)
    }

    /// Resolve an airport code, failing with [`Error::UnknownAirport`].
    pub fn resolve_code(&self, code: &str) -> Result<&Airport> {
        self.airports
            .by_code(code.trim())
            .ok_or_else(|| Error::UnknownAirport {
                reference: code.to_string(),
            })
    }

    pub fn leg(&self, id: LegId) -> Option<&Leg> {
        self.legs.get(&id)
    }

    /// Legs in creation order.
    pub fn legs(&self) -> impl Iterator<Item = &Leg> {
        self.legs.values()
    }

    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// The leg leaving `origin` in `position`, if any.
    pub fn leg_at(&self, origin: AirportId, position: Position) -> Option<&Leg> {
        self.slots
            .get(&(origin, position))
            .and_then(|id| self.legs.get(id))
    }

    /// Outgoing legs of `origin` in creation order.
    pub fn outgoing(&self, origin: AirportId) -> Vec<&Leg> {
        let mut legs: Vec<&Leg> = Position::ALL
            .iter()
            .filter_map(|&position| self.leg_at(origin, position))
            .collect();
        legs.sort_by_key(|leg| leg.id);
        legs
    }

    /// Legs whose parent is `id`, in creation order.
    pub fn children(&self, id: LegId) -> Vec<&Leg> {
        self.children
            .get(&id)
            .map(|ids| ids.iter().filter_map(|child| self.legs.get(child)).collect())
            .unwrap_or_default()
    }

    /// Rootless legs in creation order.
    pub fn root_legs(&self) -> Vec<&Leg> {
        self.root_legs
            .iter()
            .filter_map(|id| self.legs.get(id))
            .collect()
    }

    /// The airport every rootless leg starts from, once one exists.
    pub fn root_airport(&self) -> Option<AirportId> {
        self.root_legs
            .first()
            .and_then(|id| self.legs.get(id))
            .map(|leg| leg.origin)
    }

    /// Legs whose parent has been deleted.
    pub fn orphans(&self) -> Vec<&Leg> {
        self.legs
            .values()
            .filter(|leg| leg.parent.is_some_and(|parent| !self.legs.contains_key(&parent)))
            .collect()
    }

    /// Number of legs that start or end at `airport`.
    pub fn usage_count(&self, airport: AirportId) -> usize {
        self.usage.get(&airport).copied().unwrap_or(0)
    }

    /// Walk the parent chain starting at `start` (inclusive) towards the root.
    pub fn ancestors(&self, start: Option<LegId>) -> Ancestors<'_> {
        Ancestors {
            network: self,
            next: start,
        }
    }

    /// Whether following existing legs from `from` can arrive at `to`.
    pub fn reaches(&self, from: AirportId, to: AirportId) -> bool {
        let mut queue = VecDeque::from([from]);
        let mut visited = HashSet::from([from]);
        while let Some(current) = queue.pop_front() {
            if current == to {
                return true;
            }
            for leg in self.outgoing(current) {
                if visited.insert(leg.destination) {
                    queue.push_back(leg.destination);
                }
            }
        }
        false
    }

    pub fn stats(&self) -> NetworkStats {
        let longest_route = self
            .legs
            .values()
            .fold(None::<&Leg>, |best, leg| match best {
                Some(current) if current.duration >= leg.duration => Some(current),
                _ => Some(leg),
            })
            .cloned();
        NetworkStats {
            total_airports: self.airports.len(),
            total_routes: self.legs.len(),
            longest_route,
        }
    }
}

/// Iterator over a leg's ancestor chain, see [`RouteNetwork::ancestors`].
pub struct Ancestors<'a> {
    network: &'a RouteNetwork,
    next: Option<LegId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Leg;

    fn next(&mut self) -> Option<Self::Item> {
        let leg = self.network.leg(self.next?)?;
        self.next = leg.parent;
        Some(leg)
    }
}
