// Module exports for CLI subcommands
//
// Each module handles one group of subcommands. main.rs parses arguments and
// dispatches here; handlers either read a snapshot of the store or apply one
// library operation inside a store transaction, then print the result.

pub mod airport;
pub mod route;
pub mod search;
pub mod stats;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use airroute_lib::{load_network, mutate_network, resolve_store_path, RouteNetwork};
use airroute_cli::output::OutputFormat;
use airroute_cli::terminal::ColorPalette;

/// Resolved store location and output settings shared by every handler.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub store: PathBuf,
    pub format: OutputFormat,
    pub palette: ColorPalette,
}

impl CommandContext {
    pub fn new(data_dir: Option<&Path>, format: OutputFormat) -> Result<Self> {
        let store = resolve_store_path(data_dir).context("failed to resolve the route store")?;
        Ok(Self {
            store,
            format,
            palette: ColorPalette::detect(),
        })
    }

    pub fn load(&self) -> Result<RouteNetwork> {
        load_network(&self.store)
            .with_context(|| format!("failed to load route store from {}", self.store.display()))
    }

    /// Run `apply` against the committed store and write the result back
    /// atomically. Rejected operations surface their own message.
    pub fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut RouteNetwork) -> airroute_lib::Result<T>,
    ) -> Result<T> {
        mutate_network(&self.store, apply).map_err(|err| {
            if err.is_validation() {
                anyhow::Error::new(err)
            } else {
                anyhow::Error::new(err).context(format!(
                    "failed to update route store at {}",
                    self.store.display()
                ))
            }
        })
    }
}
