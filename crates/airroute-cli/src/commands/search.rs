//! Query command handlers: nth-node walks and shortest paths.

use anyhow::Result;

use airroute_cli::output::render;
use airroute_lib::{
    find_nth_node, plan_path, PathAlgorithm, PathRequest, PathSummary, Position, WalkSummary,
};

use super::CommandContext;

pub fn handle_nth_node(
    ctx: &CommandContext,
    airport: &str,
    direction: Position,
    n: usize,
) -> Result<()> {
    let network = ctx.load()?;
    let start = network.resolve_code(airport)?.id;
    let walk = find_nth_node(&network, start, direction, n)?;

    let summary = WalkSummary::from_walk(&network, &walk);
    print!("{}", render(ctx.format, &summary, WalkSummary::render_plain)?);
    Ok(())
}

pub fn handle_shortest_path(
    ctx: &CommandContext,
    from: &str,
    to: &str,
    algorithm: PathAlgorithm,
) -> Result<()> {
    let network = ctx.load()?;
    let request = PathRequest {
        from: from.to_string(),
        to: to.to_string(),
        algorithm,
    };
    let plan = plan_path(&network, &request)?;

    let summary = PathSummary::from_path(&network, &plan);
    print!("{}", render(ctx.format, &summary, PathSummary::render_plain)?);
    Ok(())
}
