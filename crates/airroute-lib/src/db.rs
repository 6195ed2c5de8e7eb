use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row, TransactionBehavior};
use tracing::{debug, info};

use crate::airport::Airport;
use crate::error::{Error, Result};
use crate::leg::{Leg, Position};
use crate::network::RouteNetwork;

/// How long a writer waits for another process to release the store.
const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS Airports (
    airportId INTEGER PRIMARY KEY,
    code      TEXT NOT NULL UNIQUE,
    name      TEXT NOT NULL,
    createdAt TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS Routes (
    routeId       INTEGER PRIMARY KEY,
    fromAirportId INTEGER NOT NULL REFERENCES Airports(airportId),
    toAirportId   INTEGER NOT NULL REFERENCES Airports(airportId),
    position      TEXT NOT NULL CHECK (position IN ('left', 'right')),
    duration      INTEGER NOT NULL CHECK (duration > 0),
    parentId      INTEGER,
    createdAt     TEXT NOT NULL,
    UNIQUE (fromAirportId, position)
);
";

/// Row shape read from the `Routes` table before validation.
struct RouteRow {
    id: i64,
    origin: i64,
    destination: i64,
    position: String,
    duration: i64,
    parent: Option<i64>,
    created_at: String,
}

/// Load the network stored at `db_path`.
///
/// A missing file yields an empty network; the file is only created by
/// [`save_network`]. Parent links are not declared as foreign keys because a
/// route may legitimately outlive its parent (see
/// [`RouteNetwork::delete_leg`]).
pub fn load_network(db_path: &Path) -> Result<RouteNetwork> {
    if !db_path.exists() {
        debug!(path = %db_path.display(), "route store missing; starting empty");
        return Ok(RouteNetwork::new());
    }

    let connection = Connection::open(db_path)?;
    ensure_schema(&connection)?;

    let airports = load_airports(&connection)?;
    let legs = load_routes(&connection)?;
    info!(
        airports = airports.len(),
        routes = legs.len(),
        path = %db_path.display(),
        "loaded route network"
    );
    RouteNetwork::restore(airports, legs)
}

/// Replace the stored snapshot with `network` in a single transaction.
pub fn save_network(db_path: &Path, network: &RouteNetwork) -> Result<()> {
    let mut connection = open_store(db_path)?;
    let tx = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;
    ensure_schema(&tx)?;
    write_network(&tx, network)?;
    tx.commit()?;

    log_saved(db_path, network);
    Ok(())
}

/// Load, change and store the network as one serialised unit.
///
/// The store's write lock is taken before reading, so concurrent callers
/// (including other processes) apply their changes one after another, each
/// against the state the previous one committed. When `apply` fails nothing
/// is written.
pub fn mutate_network<T>(
    db_path: &Path,
    apply: impl FnOnce(&mut RouteNetwork) -> Result<T>,
) -> Result<T> {
    let mut connection = open_store(db_path)?;
    let tx = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;
    ensure_schema(&tx)?;

    let mut network = RouteNetwork::restore(load_airports(&tx)?, load_routes(&tx)?)?;
    let outcome = apply(&mut network)?;
    write_network(&tx, &network)?;
    tx.commit()?;

    log_saved(db_path, &network);
    Ok(outcome)
}

fn open_store(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let connection = Connection::open(db_path)?;
    connection.busy_timeout(BUSY_TIMEOUT)?;
    Ok(connection)
}

fn write_network(connection: &Connection, network: &RouteNetwork) -> Result<()> {
    connection.execute("DELETE FROM Routes", [])?;
    connection.execute("DELETE FROM Airports", [])?;

    let mut insert_airport = connection.prepare(
        "INSERT INTO Airports (airportId, code, name, createdAt) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for airport in network.airports().iter() {
        insert_airport.execute(params![
            airport.id,
            airport.code,
            airport.name,
            airport.created_at.to_rfc3339(),
        ])?;
    }

    let mut insert_route = connection.prepare(
        "INSERT INTO Routes (routeId, fromAirportId, toAirportId, position, duration, parentId, createdAt)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    for leg in network.legs() {
        insert_route.execute(params![
            leg.id,
            leg.origin,
            leg.destination,
            leg.position.as_str(),
            leg.duration,
            leg.parent,
            leg.created_at.to_rfc3339(),
        ])?;
    }
    Ok(())
}

fn log_saved(db_path: &Path, network: &RouteNetwork) {
    info!(
        airports = network.airports().len(),
        routes = network.leg_count(),
        path = %db_path.display(),
        "saved route network"
    );
}

fn ensure_schema(connection: &Connection) -> Result<()> {
    connection.execute_batch(SCHEMA)?;
    Ok(())
}

fn load_airports(connection: &Connection) -> Result<Vec<Airport>> {
    let mut stmt = connection
        .prepare("SELECT airportId, code, name, createdAt FROM Airports ORDER BY airportId")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut airports = Vec::new();
    for row in rows {
        let (id, code, name, created_at) = row?;
        airports.push(Airport {
            id,
            code,
            name,
            created_at: parse_timestamp(&created_at)?,
        });
    }
    Ok(airports)
}

fn load_routes(connection: &Connection) -> Result<Vec<Leg>> {
    let mut stmt = connection.prepare(
        "SELECT routeId, fromAirportId, toAirportId, position, duration, parentId, createdAt
         FROM Routes ORDER BY routeId",
    )?;
    let rows = stmt.query_map([], row_to_route)?;

    let mut legs = Vec::new();
    for row in rows {
        legs.push(route_from_row(row?)?);
    }
    Ok(legs)
}

fn row_to_route(row: &Row<'_>) -> rusqlite::Result<RouteRow> {
    Ok(RouteRow {
        id: row.get(0)?,
        origin: row.get(1)?,
        destination: row.get(2)?,
        position: row.get(3)?,
        duration: row.get(4)?,
        parent: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn route_from_row(row: RouteRow) -> Result<Leg> {
    let position: Position = row.position.parse().map_err(|err| Error::CorruptStore {
        message: format!("route {}: {err}", row.id),
    })?;
    let duration = u32::try_from(row.duration).map_err(|_| Error::CorruptStore {
        message: format!("route {} has out-of-range duration {}", row.id, row.duration),
    })?;

    Ok(Leg {
        id: row.id,
        origin: row.origin,
        destination: row.destination,
        position,
        duration,
        parent: row.parent,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|err| Error::CorruptStore {
            message: format!("invalid timestamp '{value}': {err}"),
        })
}
