use serde::Serialize;
use tracing::debug;

use crate::airport::AirportId;
use crate::error::{Error, Result};
use crate::leg::Position;
use crate::network::RouteNetwork;

/// One airport reached during a walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkStep {
    pub airport: AirportId,
    /// Duration of the leg that reached this airport (0 for the start).
    pub duration: u32,
    /// Total duration from the start up to and including this leg.
    pub cumulative: u64,
}

/// Result of a successful nth-node walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NthNode {
    pub start: AirportId,
    pub direction: Position,
    pub n: usize,
    pub airport: AirportId,
    pub total_duration: u64,
    /// Start airport followed by every airport reached.
    pub steps: Vec<WalkStep>,
}

/// Follow `direction` from `start` exactly `n` times.
///
/// Fails with [`Error::NthNodeNotFound`] carrying the number of completed
/// steps when an airport along the way has no leg in that direction.
pub fn find_nth_node(
    network: &RouteNetwork,
    start: AirportId,
    direction: Position,
    n: usize,
) -> Result<NthNode> {
    if n == 0 {
        return Err(Error::InvalidStepCount);
    }
    if network.airport(start).is_none() {
        return Err(Error::unknown_airport_id(start));
    }

    let mut current = start;
    let mut total_duration = 0u64;
    let mut steps = Vec::with_capacity(n + 1);
    steps.push(WalkStep {
        airport: start,
        duration: 0,
        cumulative: 0,
    });

    for completed in 0..n {
        let Some(leg) = network.leg_at(current, direction) else {
            debug!(start, %direction, n, completed, "walk stopped early");
            return Err(Error::NthNodeNotFound {
                direction,
                n,
                steps_completed: completed,
            });
        };
        current = leg.destination;
        total_duration += u64::from(leg.duration);
        steps.push(WalkStep {
            airport: current,
            duration: leg.duration,
            cumulative: total_duration,
        });
    }

    debug!(start, %direction, n, airport = current, total_duration, "walk completed");
    Ok(NthNode {
        start,
        direction,
        n,
        airport: current,
        total_duration,
        steps,
    })
}
