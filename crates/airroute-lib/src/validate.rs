//! Tree invariants enforced on every leg insertion.
//!
//! Each invariant is a small [`LegRule`] with a stable name. [`validate_leg`]
//! first resolves the draft's references and then runs [`default_rules`] in
//! order, stopping at the first violation. Rules only read the network, so a
//! rejected draft never leaves anything behind.

use tracing::debug;

use crate::error::{Error, Result};
use crate::leg::LegDraft;
use crate::network::RouteNetwork;

/// A single named invariant checked against a candidate leg.
pub trait LegRule: Send + Sync {
    /// Stable identifier used in logs and tests.
    fn name(&self) -> &'static str;

    /// Return `Ok(())` when the draft satisfies this invariant.
    ///
    /// Rules may assume the draft's airports and parent exist.
    fn check(&self, network: &RouteNetwork, draft: &LegDraft) -> Result<()>;
}

/// Origin and destination must differ.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfLoopRule;

impl LegRule for SelfLoopRule {
    fn name(&self) -> &'static str {
        "self_loop"
    }

    fn check(&self, network: &RouteNetwork, draft: &LegDraft) -> Result<()> {
        if draft.origin == draft.destination {
            return Err(Error::SelfLoop {
                airport: network.airports().name_of(draft.origin),
            });
        }
        Ok(())
    }
}

/// At most one leg per `(origin, position)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniquePositionRule;

impl LegRule for UniquePositionRule {
    fn name(&self) -> &'static str {
        "unique_position"
    }

    fn check(&self, network: &RouteNetwork, draft: &LegDraft) -> Result<()> {
        if network.leg_at(draft.origin, draft.position).is_some() {
            return Err(Error::DuplicatePosition {
                origin: network.airports().name_of(draft.origin),
                position: draft.position,
            });
        }
        Ok(())
    }
}

/// Rootless legs must all start at the established root airport.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleRootRule;

impl LegRule for SingleRootRule {
    fn name(&self) -> &'static str {
        "single_root"
    }

    fn check(&self, network: &RouteNetwork, draft: &LegDraft) -> Result<()> {
        if draft.parent.is_some() {
            return Ok(());
        }
        match network.root_airport() {
            Some(root) if root != draft.origin => Err(Error::RootMismatch {
                root: network.airports().name_of(root),
            }),
            _ => Ok(()),
        }
    }
}

/// A child leg starts where its parent ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParentContinuityRule;

impl LegRule for ParentContinuityRule {
    fn name(&self) -> &'static str {
        "parent_continuity"
    }

    fn check(&self, network: &RouteNetwork, draft: &LegDraft) -> Result<()> {
        let Some(parent) = draft.parent.and_then(|id| network.leg(id)) else {
            return Ok(());
        };
        if parent.destination != draft.origin {
            return Err(Error::ParentContinuityViolation {
                origin: network.airports().name_of(draft.origin),
                expected: network.airports().name_of(parent.destination),
            });
        }
        Ok(())
    }
}

/// A leg may not lead back to the root airport or to any airport that can
/// already reach its origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcyclicRule;

impl LegRule for AcyclicRule {
    fn name(&self) -> &'static str {
        "acyclic"
    }

    fn check(&self, network: &RouteNetwork, draft: &LegDraft) -> Result<()> {
        if network.root_airport() == Some(draft.destination)
            || network.reaches(draft.destination, draft.origin)
        {
            return Err(Error::CycleViolation {
                destination: network.airports().name_of(draft.destination),
            });
        }
        Ok(())
    }
}

static SELF_LOOP: SelfLoopRule = SelfLoopRule;
static UNIQUE_POSITION: UniquePositionRule = UniquePositionRule;
static SINGLE_ROOT: SingleRootRule = SingleRootRule;
static PARENT_CONTINUITY: ParentContinuityRule = ParentContinuityRule;
static ACYCLIC: AcyclicRule = AcyclicRule;

/// The tree rules in evaluation order.
pub fn default_rules() -> [&'static dyn LegRule; 5] {
    [
        &SELF_LOOP,
        &UNIQUE_POSITION,
        &SINGLE_ROOT,
        &PARENT_CONTINUITY,
        &ACYCLIC,
    ]
}

/// Resolve the draft's references, then run every rule in order.
pub fn validate_leg(network: &RouteNetwork, draft: &LegDraft) -> Result<()> {
    check_references(network, draft)?;
    run_rules(network, draft, &default_rules())
}

/// Run an arbitrary rule sequence, failing on the first violation.
pub fn run_rules(network: &RouteNetwork, draft: &LegDraft, rules: &[&dyn LegRule]) -> Result<()> {
    for rule in rules {
        if let Err(err) = rule.check(network, draft) {
            debug!(rule = rule.name(), error = %err, "route rejected");
            return Err(err);
        }
    }
    Ok(())
}

fn check_references(network: &RouteNetwork, draft: &LegDraft) -> Result<()> {
    for airport in [draft.origin, draft.destination] {
        if network.airport(airport).is_none() {
            return Err(Error::unknown_airport_id(airport));
        }
    }
    if let Some(parent) = draft.parent {
        if network.leg(parent).is_none() {
            return Err(Error::UnknownLeg { id: parent });
        }
    }
    if draft.duration == 0 {
        return Err(Error::InvalidDuration);
    }
    Ok(())
}
