use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename for the route store.
pub const STORE_FILENAME: &str = "network.db";

/// Environment variable overriding the store location.
pub const DATA_DIR_ENV: &str = "AIRROUTE_DATA_DIR";

/// Resolve the default store location using platform-specific project directories.
pub fn default_store_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "airroute", "airroute").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(STORE_FILENAME))
}

/// Resolve the store path.
///
/// Precedence: explicit `target`, then the `AIRROUTE_DATA_DIR` environment
/// variable, then [`default_store_path`]. Explicit locations that end in `.db`
/// are used as the database file; anything else is treated as a directory
/// holding `network.db`.
pub fn resolve_store_path(target: Option<&Path>) -> Result<PathBuf> {
    let resolved = if let Some(path) = target {
        normalize_store_path(path)
    } else if let Some(env_path) = env::var_os(DATA_DIR_ENV) {
        normalize_store_path(Path::new(&env_path))
    } else {
        default_store_path()?
    };
    debug!(path = %resolved.display(), "resolved route store");
    Ok(resolved)
}

fn normalize_store_path(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "db") {
        path.to_path_buf()
    } else {
        path.join(STORE_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_gain_the_default_filename() {
        let resolved = resolve_store_path(Some(Path::new("/tmp/airroute"))).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/airroute/network.db"));
    }

    #[test]
    fn database_files_are_used_verbatim() {
        let resolved = resolve_store_path(Some(Path::new("/tmp/custom.db"))).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/custom.db"));
    }
}
