//! Single-writer access to a [`RouteNetwork`] with lock-free snapshot reads.
//!
//! Writers serialise on a write lock and mutate through [`Arc::make_mut`], so
//! a snapshot handed out earlier keeps seeing the state it was taken from.
//! Readers only hold the read lock long enough to clone the `Arc`.

use std::sync::{Arc, RwLock};

use crate::airport::{Airport, AirportId};
use crate::error::{Error, Result};
use crate::leg::{Leg, LegDeletion, LegDraft, LegId, Position};
use crate::network::RouteNetwork;
use crate::routing::{find_path_with, PathAlgorithm, ShortestPath};
use crate::walk::{find_nth_node, NthNode};

/// Thread-safe handle around the committed network.
#[derive(Debug, Clone, Default)]
pub struct SharedNetwork {
    inner: Arc<RwLock<Arc<RouteNetwork>>>,
}

impl SharedNetwork {
    pub fn new(network: RouteNetwork) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(network))),
        }
    }

    /// The latest committed state.
    pub fn snapshot(&self) -> Result<Arc<RouteNetwork>> {
        let guard = self.inner.read().map_err(|_| poisoned())?;
        Ok(Arc::clone(&*guard))
    }

    /// Apply one mutation under the write lock.
    ///
    /// `apply` must leave the network untouched when it fails; every
    /// `RouteNetwork` mutation does.
    pub fn mutate<T>(&self, apply: impl FnOnce(&mut RouteNetwork) -> Result<T>) -> Result<T> {
        let mut guard = self.inner.write().map_err(|_| poisoned())?;
        apply(Arc::make_mut(&mut *guard))
    }

    pub fn insert_airport(&self, code: &str, name: &str) -> Result<Airport> {
        self.mutate(|network| network.insert_airport(code, name))
    }

    pub fn delete_airport(&self, id: AirportId) -> Result<Airport> {
        self.mutate(|network| network.delete_airport(id))
    }

    pub fn insert_leg(&self, draft: LegDraft) -> Result<Leg> {
        self.mutate(|network| network.insert_leg(draft))
    }

    pub fn delete_leg(&self, id: LegId) -> Result<LegDeletion> {
        self.mutate(|network| network.delete_leg(id))
    }

    pub fn walk(&self, start: AirportId, direction: Position, n: usize) -> Result<NthNode> {
        let snapshot = self.snapshot()?;
        find_nth_node(&snapshot, start, direction, n)
    }

    pub fn find_path(
        &self,
        from: AirportId,
        to: AirportId,
        algorithm: PathAlgorithm,
    ) -> Result<ShortestPath> {
        let snapshot = self.snapshot()?;
        find_path_with(&snapshot, from, to, algorithm)
    }
}

fn poisoned() -> Error {
    Error::Internal {
        message: "route network lock poisoned".to_string(),
    }
}
