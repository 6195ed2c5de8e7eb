//! Stats command handler.

use anyhow::Result;

use airroute_cli::output::render;
use airroute_lib::StatsSummary;

use super::CommandContext;

pub fn handle_stats(ctx: &CommandContext) -> Result<()> {
    let network = ctx.load()?;
    let summary = StatsSummary::from_stats(&network, &network.stats());
    print!("{}", render(ctx.format, &summary, StatsSummary::render_plain)?);
    Ok(())
}
