//! Airport command handlers.

use anyhow::Result;

use airroute_cli::output::{airport_added, airport_deleted, airport_table, render};
use airroute_lib::Airport;

use super::CommandContext;

pub fn handle_add_airport(ctx: &CommandContext, code: &str, name: &str) -> Result<()> {
    let airport = ctx.mutate(|network| network.insert_airport(code, name))?;
    print!(
        "{}",
        render(ctx.format, &airport, |a| airport_added(a, &ctx.palette))?
    );
    Ok(())
}

pub fn handle_delete_airport(ctx: &CommandContext, code: &str) -> Result<()> {
    let airport = ctx.mutate(|network| {
        let id = network.resolve_code(code)?.id;
        network.delete_airport(id)
    })?;
    print!("{}", render(ctx.format, &airport, airport_deleted)?);
    Ok(())
}

pub fn handle_list_airports(ctx: &CommandContext) -> Result<()> {
    let network = ctx.load()?;
    let airports: Vec<Airport> = network.airports().iter().cloned().collect();
    print!(
        "{}",
        render(ctx.format, &airports, |list| airport_table(list, &ctx.palette))?
    );
    Ok(())
}
