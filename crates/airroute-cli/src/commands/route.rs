//! Route command handlers: add, delete, list and prune.

use anyhow::{Context, Result};
use tracing::info;

use airroute_cli::output::{
    deletion_text, prune_text, render, route_added, route_table, DeletionReport, PruneReport,
};
use airroute_lib::{list_legs, LegDraft, LegId, LegSummary, Position};

use super::CommandContext;

/// Arguments for the add-route command.
#[derive(Debug, Clone)]
pub struct AddRouteArgs {
    pub from: String,
    pub to: String,
    pub position: Position,
    pub duration: u32,
    pub parent: Option<LegId>,
}

pub fn handle_add_route(ctx: &CommandContext, args: &AddRouteArgs) -> Result<()> {
    let summary = ctx.mutate(|network| {
        let draft = LegDraft {
            origin: network.resolve_code(&args.from)?.id,
            destination: network.resolve_code(&args.to)?.id,
            position: args.position,
            duration: args.duration,
            parent: args.parent,
        };
        let leg = network.insert_leg(draft)?;
        Ok(LegSummary::from_leg(network, &leg))
    })?;

    print!(
        "{}",
        render(ctx.format, &summary, |s| route_added(s, &ctx.palette))?
    );
    Ok(())
}

/// Delete one route; with `cascade`, prune whatever it left orphaned.
pub fn handle_delete_route(ctx: &CommandContext, id: LegId, cascade: bool) -> Result<()> {
    let report = ctx
        .mutate(|network| {
            let deletion = network.delete_leg(id)?;
            let pruned = if cascade {
                network.prune_orphans()
            } else {
                Vec::new()
            };
            Ok(DeletionReport {
                deleted: LegSummary::from_leg(network, &deletion.leg),
                root_removed: deletion.root_removed,
                pruned: pruned
                    .iter()
                    .map(|leg| LegSummary::from_leg(network, leg))
                    .collect(),
            })
        })
        .with_context(|| format!("failed to delete route #{id}"))?;

    if !report.pruned.is_empty() {
        info!(count = report.pruned.len(), "cascade removed orphaned routes");
    }
    print!("{}", render(ctx.format, &report, deletion_text)?);
    Ok(())
}

pub fn handle_list_routes(ctx: &CommandContext) -> Result<()> {
    let network = ctx.load()?;
    let legs = list_legs(&network);
    print!("{}", render(ctx.format, &legs, |list| route_table(list))?);
    Ok(())
}

pub fn handle_prune(ctx: &CommandContext) -> Result<()> {
    let report = ctx.mutate(|network| {
        let pruned = network.prune_orphans();
        Ok(PruneReport {
            pruned: pruned
                .iter()
                .map(|leg| LegSummary::from_leg(network, leg))
                .collect(),
        })
    })?;
    print!("{}", render(ctx.format, &report, prune_text)?);
    Ok(())
}
