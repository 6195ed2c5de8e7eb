use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::airport::AirportId;

/// Numeric identifier for a leg (a directed route between two airports).
pub type LegId = i64;

/// Branch taken out of an origin airport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Left,
    Right,
}

impl Position {
    pub const ALL: [Position; 2] = [Position::Left, Position::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::Left => "left",
            Position::Right => "right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Position`] from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePositionError(String);

impl fmt::Display for ParsePositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown position '{}', expected left or right", self.0)
    }
}

impl std::error::Error for ParsePositionError {}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Position::Left),
            "right" => Ok(Position::Right),
            other => Err(ParsePositionError(other.to_string())),
        }
    }
}

/// A committed leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    pub id: LegId,
    pub origin: AirportId,
    pub destination: AirportId,
    pub position: Position,
    /// Duration in minutes, always positive.
    pub duration: u32,
    pub parent: Option<LegId>,
    pub created_at: DateTime<Utc>,
}

impl Leg {
    /// Root legs have no parent and start at the root airport.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A leg that has not been validated yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegDraft {
    pub origin: AirportId,
    pub destination: AirportId,
    pub position: Position,
    pub duration: u32,
    pub parent: Option<LegId>,
}

impl LegDraft {
    /// Draft for a rootless leg.
    pub fn root(origin: AirportId, destination: AirportId, position: Position, duration: u32) -> Self {
        Self {
            origin,
            destination,
            position,
            duration,
            parent: None,
        }
    }

    /// Draft for a leg hanging off `parent`.
    pub fn child(
        parent: LegId,
        origin: AirportId,
        destination: AirportId,
        position: Position,
        duration: u32,
    ) -> Self {
        Self {
            origin,
            destination,
            position,
            duration,
            parent: Some(parent),
        }
    }
}

/// Outcome of a successful leg deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegDeletion {
    pub leg: Leg,
    /// Set when the deleted leg was the only rootless leg. The network has no
    /// root afterwards, so the next root leg may start from any airport.
    pub root_removed: bool,
}
