//! Output formatting for command results.
//!
//! Every command produces a serialisable value. [`render`] turns it into
//! pretty JSON or hands it to a text formatter from this module.

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use airroute_lib::{Airport, LegSummary};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Render `value` in `format`, using `text` for the text representation.
pub fn render<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text(value)),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(value).context("failed to serialise output")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Result of `delete-route`, including legs pruned by `--cascade`.
#[derive(Debug, Clone, Serialize)]
pub struct DeletionReport {
    pub deleted: LegSummary,
    pub root_removed: bool,
    pub pruned: Vec<LegSummary>,
}

/// Result of `prune`.
#[derive(Debug, Clone, Serialize)]
pub struct PruneReport {
    pub pruned: Vec<LegSummary>,
}

pub fn airport_added(airport: &Airport, palette: &ColorPalette) -> String {
    format!(
        "{} {} - {} (id {})\n",
        palette.paint(palette.green, "Airport added:"),
        airport.code,
        airport.name,
        airport.id
    )
}

pub fn airport_deleted(airport: &Airport) -> String {
    format!("Airport deleted: {}\n", airport.label())
}

pub fn airport_table(airports: &[Airport], palette: &ColorPalette) -> String {
    if airports.is_empty() {
        return "No airports.\n".to_string();
    }
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "{}",
        palette.paint(palette.gray, &format!("{:>4}  {:<10} {}", "ID", "CODE", "NAME"))
    );
    for airport in airports {
        let _ = writeln!(
            buffer,
            "{:>4}  {:<10} {}",
            airport.id, airport.code, airport.name
        );
    }
    buffer
}

/// One route as shown in listings: `#3 Cochin -> Dubai (left) [240 mins] root`.
pub fn route_line(leg: &LegSummary) -> String {
    let mut line = format!("#{} {} [{} mins]", leg.id, leg.label(), leg.duration);
    match leg.parent {
        Some(parent) if leg.orphaned => {
            let _ = write!(line, " parent #{parent} (missing)");
        }
        Some(parent) => {
            let _ = write!(line, " parent #{parent}");
        }
        None => line.push_str(" root"),
    }
    line
}

pub fn route_added(leg: &LegSummary, palette: &ColorPalette) -> String {
    format!(
        "{} {}\n",
        palette.paint(palette.green, "Route added:"),
        route_line(leg)
    )
}

pub fn route_table(legs: &[LegSummary]) -> String {
    if legs.is_empty() {
        return "No routes.\n".to_string();
    }
    let mut buffer = String::new();
    for leg in legs {
        let _ = writeln!(buffer, "{}", route_line(leg));
    }
    buffer
}

pub fn deletion_text(report: &DeletionReport) -> String {
    let mut buffer = String::new();
    let _ = writeln!(buffer, "Route deleted: {}", route_line(&report.deleted));
    if report.root_removed {
        let _ = writeln!(
            buffer,
            "The only root route was removed; the network has no root until a new root route is added."
        );
    }
    if !report.pruned.is_empty() {
        write_pruned(&mut buffer, &report.pruned);
    }
    buffer
}

pub fn prune_text(report: &PruneReport) -> String {
    let mut buffer = String::new();
    write_pruned(&mut buffer, &report.pruned);
    buffer
}

fn write_pruned(buffer: &mut String, pruned: &[LegSummary]) {
    let _ = writeln!(buffer, "Pruned {} orphaned route(s)", pruned.len());
    for leg in pruned {
        let _ = writeln!(buffer, " - {}", route_line(leg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airroute_lib::{AirportRef, Position};

    fn leg(parent: Option<i64>, orphaned: bool) -> LegSummary {
        let airport = |id, code: &str, name: &str| AirportRef {
            id,
            code: code.to_string(),
            name: name.to_string(),
        };
        LegSummary {
            id: 3,
            from: airport(1, "COK", "Cochin"),
            to: airport(2, "DXB", "Dubai"),
            position: Position::Left,
            duration: 240,
            parent,
            orphaned,
        }
    }

    #[test]
    fn route_line_marks_roots_and_missing_parents() {
        assert_eq!(
            route_line(&leg(None, false)),
            "#3 Cochin -> Dubai (left) [240 mins] root"
        );
        assert_eq!(
            route_line(&leg(Some(1), true)),
            "#3 Cochin -> Dubai (left) [240 mins] parent #1 (missing)"
        );
    }

    #[test]
    fn json_output_ends_with_newline() {
        let rendered = render(OutputFormat::Json, &leg(Some(1), false), |_| String::new())
            .expect("serialises");
        assert!(rendered.ends_with("}\n"));
        assert!(rendered.contains("\"parent\": 1"));
    }

    #[test]
    fn empty_listings_say_so() {
        assert_eq!(airport_table(&[], &ColorPalette::plain()), "No airports.\n");
        assert_eq!(route_table(&[]), "No routes.\n");
    }

    #[test]
    fn deletion_reports_missing_root() {
        let report = DeletionReport {
            deleted: leg(None, false),
            root_removed: true,
            pruned: vec![leg(Some(1), true)],
        };
        let text = deletion_text(&report);
        assert!(text.contains("the network has no root"));
        assert!(text.contains("Pruned 1 orphaned route(s)"));
    }
}
