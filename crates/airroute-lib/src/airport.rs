use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Numeric identifier for an airport.
pub type AirportId = i64;

/// Longest accepted airport code.
pub const MAX_CODE_LEN: usize = 10;

/// Longest accepted airport display name.
pub const MAX_NAME_LEN: usize = 200;

/// A registered airport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub id: AirportId,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Airport {
    /// `CODE - Name`, the label used in listings.
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// Airport records keyed by identifier, with a unique code index.
///
/// Identifiers are handed out monotonically, so iterating the registry yields
/// airports in creation order.
#[derive(Debug, Clone, Default)]
pub struct AirportRegistry {
    airports: BTreeMap<AirportId, Airport>,
    code_to_id: HashMap<String, AirportId>,
    next_id: AirportId,
}

impl AirportRegistry {
    /// Register a new airport after validating its code and name.
    pub fn insert(&mut self, code: &str, name: &str) -> Result<Airport> {
        let code = code.trim();
        let name = name.trim();
        validate_code(code)?;
        validate_name(name)?;
        if self.code_to_id.contains_key(code) {
            return Err(Error::DuplicateCode {
                code: code.to_string(),
            });
        }

        self.next_id += 1;
        let airport = Airport {
            id: self.next_id,
            code: code.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.code_to_id.insert(airport.code.clone(), airport.id);
        self.airports.insert(airport.id, airport.clone());
        Ok(airport)
    }

    /// Re-register a persisted airport, keeping its identifier and timestamp.
    pub(crate) fn restore(&mut self, airport: Airport) -> Result<()> {
        if self.airports.contains_key(&airport.id) || self.code_to_id.contains_key(&airport.code) {
            return Err(Error::CorruptStore {
                message: format!("duplicate airport {} ({})", airport.code, airport.id),
            });
        }
        self.next_id = self.next_id.max(airport.id);
        self.code_to_id.insert(airport.code.clone(), airport.id);
        self.airports.insert(airport.id, airport);
        Ok(())
    }

    /// Remove an airport unconditionally. Usage checks belong to the caller.
    pub(crate) fn remove(&mut self, id: AirportId) -> Option<Airport> {
        let airport = self.airports.remove(&id)?;
        self.code_to_id.remove(&airport.code);
        Some(airport)
    }

    pub fn get(&self, id: AirportId) -> Option<&Airport> {
        self.airports.get(&id)
    }

    /// Lookup an airport by its case-sensitive code.
    pub fn by_code(&self, code: &str) -> Option<&Airport> {
        self.code_to_id
            .get(code)
            .and_then(|id| self.airports.get(id))
    }

    /// Airports in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Airport> {
        self.airports.values()
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Display name for an airport, falling back to a placeholder.
    pub fn name_of(&self, id: AirportId) -> String {
        self.get(id)
            .map(|airport| airport.name.clone())
            .unwrap_or_else(|| "<unknown>".to_string())
    }
}

fn validate_code(code: &str) -> Result<()> {
    let len = code.chars().count();
    if len == 0 || len > MAX_CODE_LEN {
        return Err(Error::InvalidAirportCode {
            code: code.to_string(),
            max: MAX_CODE_LEN,
        });
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(Error::InvalidAirportName {
            name: name.to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}
