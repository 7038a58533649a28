//! Agent library discovery.
//!
//! The primary library directory is checked first. When the package is not
//! there, the fallback directory is appended (only if it exists) and the
//! check repeats over both. Discovery runs once per process and is never
//! retried.

use std::path::{Path, PathBuf};

use crate::error::{BridgeError, Result, SearchedPaths};
use crate::settings::AgentSettings;

/// Environment variable overriding the base directory.
pub const HOME_ENV: &str = "FORGE_BRIDGE_HOME";

/// Resolve the directory that library and project paths are relative to.
pub fn base_dir() -> std::io::Result<PathBuf> {
    match std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => std::env::current_dir(),
    }
}

/// Locate the library directories that make the agent package importable.
///
/// Returns every directory that was added to the search list, in order.
pub fn locate_library(base: &Path, agent: &AgentSettings) -> Result<Vec<PathBuf>> {
    let primary = base.join(&agent.library_dir);

    if has_package(&primary, &agent.package) {
        tracing::debug!("Found {} in {}", agent.package, primary.display());
        return Ok(vec![primary]);
    }

    let fallback = base.join(&agent.fallback_library_dir);
    if !fallback.is_dir() {
        return Err(BridgeError::RuntimeNotFound {
            message: format!("Import error: No module named '{}'", agent.package),
            searched: SearchedPaths::single(&primary),
        });
    }

    let search = vec![primary, fallback];
    match search.iter().find(|dir| has_package(dir, &agent.package)) {
        Some(dir) => {
            tracing::debug!("Found {} in {}", agent.package, dir.display());
            Ok(search)
        }
        None => Err(BridgeError::RuntimeNotFound {
            message: format!(
                "Import error after adding local libs: No module named '{}'",
                agent.package
            ),
            searched: SearchedPaths::many(&search),
        }),
    }
}

fn has_package(dir: &Path, package: &str) -> bool {
    dir.join(package).is_dir()
}
