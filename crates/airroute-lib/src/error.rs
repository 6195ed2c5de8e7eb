use thiserror::Error;

use crate::airport::AirportId;
use crate::leg::{LegId, Position};

/// Convenient result alias for the airroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Every validation variant carries enough context to render a precise
/// message; none of them leave the network mutated.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an airport code is already registered.
    #[error("an airport with code '{code}' already exists")]
    DuplicateCode { code: String },

    /// Raised when an airport code is empty or too long.
    #[error("invalid airport code '{code}': expected 1 to {max} characters")]
    InvalidAirportCode { code: String, max: usize },

    /// Raised when an airport name is empty or too long.
    #[error("invalid airport name '{name}': expected 1 to {max} characters")]
    InvalidAirportName { name: String, max: usize },

    /// Raised when an airport reference cannot be resolved.
    #[error("unknown airport: {reference}")]
    UnknownAirport { reference: String },

    /// Raised when deleting an airport that legs still reference.
    #[error("cannot delete airport '{code}', it is used in {routes} route(s)")]
    AirportInUse { code: String, routes: usize },

    /// Raised when a leg identifier cannot be resolved.
    #[error("unknown route id {id}")]
    UnknownLeg { id: LegId },

    /// Raised when a leg duration is zero.
    #[error("route duration must be a positive number of minutes")]
    InvalidDuration,

    /// Raised when a leg would start and end at the same airport.
    #[error("from and to airport cannot be the same ('{airport}')")]
    SelfLoop { airport: String },

    /// Raised when the origin already has a leg in the requested position.
    #[error("a route from '{origin}' with position '{position}' already exists")]
    DuplicatePosition { origin: String, position: Position },

    /// Raised when a rootless leg does not start at the established root airport.
    #[error("root routes must start from '{root}'; select a parent route")]
    RootMismatch { root: String },

    /// Raised when a child leg does not start where its parent ends.
    #[error("from airport '{origin}' must match the parent route's to airport '{expected}'")]
    ParentContinuityViolation { origin: String, expected: String },

    /// Raised when a leg would lead back to the root or close a loop of legs.
    #[error("route to '{destination}' would close a cycle in the route tree")]
    CycleViolation { destination: String },

    /// Raised when deleting a leg that still has child legs.
    #[error("cannot delete this route, it has {count} child route(s) connected to it")]
    HasChildren { count: usize },

    /// Raised when a walk is requested with zero steps.
    #[error("nth position must be at least 1")]
    InvalidStepCount,

    /// Raised when a walk runs out of legs before reaching the requested depth.
    #[error("cannot find {n}th {direction} node (stopped after {steps_completed} step(s))")]
    NthNodeNotFound {
        direction: Position,
        n: usize,
        steps_completed: usize,
    },

    /// Raised when a path search is asked to connect an airport to itself.
    #[error("from and to airport cannot be the same ('{airport}')")]
    SameEndpoints { airport: String },

    /// Raised when no path connects the two airports.
    #[error("no path found between {from} and {to}")]
    PathNotFound { from: String, to: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the route store")]
    ProjectDirsUnavailable,

    /// Persisted rows violate a storage-level invariant.
    #[error("route store is corrupt: {message}")]
    CorruptStore { message: String },

    /// Opaque fault the core does not interpret (for example a poisoned lock).
    #[error("internal error: {message}")]
    Internal { message: String },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an [`Error::UnknownAirport`] for a numeric identifier.
    pub(crate) fn unknown_airport_id(id: AirportId) -> Self {
        Error::UnknownAirport {
            reference: format!("id {id}"),
        }
    }

    /// `true` for failures produced by validating a request against the
    /// network, as opposed to storage or internal faults.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            Error::ProjectDirsUnavailable
                | Error::CorruptStore { .. }
                | Error::Internal { .. }
                | Error::Sqlite(_)
                | Error::Io(_)
        )
    }
}
