mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use airroute_cli::output::OutputFormat;
use airroute_lib::{LegId, PathAlgorithm, Position};

use commands::route::AddRouteArgs;
use commands::CommandContext;

#[derive(Parser, Debug)]
#[command(author, version, about = "Airport route tree utilities")]
struct Cli {
    /// Override the route store directory or `.db` file path.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new airport.
    AddAirport {
        /// Unique airport code (up to 10 characters).
        #[arg(long)]
        code: String,
        /// Display name (up to 200 characters).
        #[arg(long)]
        name: String,
    },
    /// Delete an airport that no route uses.
    DeleteAirport {
        /// Airport code.
        code: String,
    },
    /// List airports.
    Airports,
    /// Add a route to the tree.
    AddRoute {
        /// Origin airport code.
        #[arg(long = "from")]
        from: String,
        /// Destination airport code.
        #[arg(long = "to")]
        to: String,
        /// Branch of the origin airport: left or right.
        #[arg(long)]
        position: Position,
        /// Flight duration in minutes.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        duration: u32,
        /// Parent route id; omit for a root route.
        #[arg(long)]
        parent: Option<LegId>,
    },
    /// Delete a route without children.
    DeleteRoute {
        /// Route id.
        id: LegId,
        /// Also remove routes whose parent is missing from the store.
        #[arg(long)]
        cascade: bool,
    },
    /// List routes.
    Routes,
    /// Remove routes whose parent route no longer exists.
    ///
    /// Only stores edited outside this tool can hold such routes, since a
    /// route with children cannot be deleted.
    Prune,
    /// Follow one direction from an airport N times.
    NthNode {
        /// Starting airport code.
        #[arg(long)]
        airport: String,
        /// Direction to follow: left or right.
        #[arg(long)]
        direction: Position,
        /// Number of steps (at least 1).
        #[arg(long)]
        n: usize,
    },
    /// Find a path between two airports.
    ShortestPath {
        /// Starting airport code.
        #[arg(long = "from")]
        from: String,
        /// Destination airport code.
        #[arg(long = "to")]
        to: String,
        /// Search algorithm: bfs (fewest legs) or dijkstra (lowest duration).
        #[arg(long, default_value_t = PathAlgorithm::Bfs)]
        algorithm: PathAlgorithm,
    },
    /// Show network statistics.
    Stats,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let ctx = CommandContext::new(cli.data_dir.as_deref(), cli.format)?;

    match cli.command {
        Command::AddAirport { code, name } => {
            commands::airport::handle_add_airport(&ctx, &code, &name)
        }
        Command::DeleteAirport { code } => commands::airport::handle_delete_airport(&ctx, &code),
        Command::Airports => commands::airport::handle_list_airports(&ctx),
        Command::AddRoute {
            from,
            to,
            position,
            duration,
            parent,
        } => commands::route::handle_add_route(
            &ctx,
            &AddRouteArgs {
                from,
                to,
                position,
                duration,
                parent,
            },
        ),
        Command::DeleteRoute { id, cascade } => {
            commands::route::handle_delete_route(&ctx, id, cascade)
        }
        Command::Routes => commands::route::handle_list_routes(&ctx),
        Command::Prune => commands::route::handle_prune(&ctx),
        Command::NthNode {
            airport,
            direction,
            n,
        } => commands::search::handle_nth_node(&ctx, &airport, direction, n),
        Command::ShortestPath {
            from,
            to,
            algorithm,
        } => commands::search::handle_shortest_path(&ctx, &from, &to, algorithm),
        Command::Stats => commands::stats::handle_stats(&ctx),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
