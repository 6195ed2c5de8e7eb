//! Airroute CLI library.
//!
//! Output formatting and terminal styling shared by the `airroute-cli`
//! subcommands.

pub mod output;
pub mod terminal;
