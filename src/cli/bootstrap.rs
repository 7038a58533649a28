//! CLI bootstrap - load the environment, settings and agent runtime.

use std::path::PathBuf;

use crate::bridge::{base_dir, locate_library, AgentForgeRuntime, AgentRuntime};
use crate::error::Result;
use crate::settings::{settings_path, SettingsManager};

use super::args::Args;

/// Setting this to a non-empty value raises the crate's log level to debug.
pub const VERBOSE_ENV: &str = "FORGE_BRIDGE_VERBOSE";

/// Everything a single bridge invocation needs.
pub struct BridgeContext {
    /// The message to forward
    pub message: String,

    /// Directory library and project paths are resolved against
    pub base: PathBuf,

    /// Loaded settings
    pub settings_manager: SettingsManager,

    /// The located agent runtime
    pub runtime: Box<dyn AgentRuntime>,
}

/// Initialize the context for one invocation.
///
/// Fails with `MissingMessage` before touching the filesystem, and with
/// `RuntimeNotFound` when no library directory provides the agent package.
pub async fn initialize(args: &Args) -> Result<BridgeContext> {
    // Load .env file if present
    if let Err(e) = dotenvy::dotenv() {
        // Only warn on errors other than file not found
        if !matches!(e, dotenvy::Error::Io(_)) {
            tracing::warn!("Failed to load .env file: {}", e);
        }
    }

    init_logging();

    let message = args.message()?.into_owned();

    let settings_manager = match SettingsManager::new().await {
        Ok(manager) => manager,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {:#}", e);
            SettingsManager::defaults(settings_path())
        }
    };
    let settings = settings_manager.get();

    let base = base_dir().unwrap_or_else(|e| {
        tracing::warn!("Failed to resolve base directory: {}", e);
        PathBuf::from(".")
    });
    tracing::debug!("Base directory: {}", base.display());

    let library_dirs = locate_library(&base, &settings.agent)?;
    let runtime = AgentForgeRuntime::new(base.clone(), library_dirs, settings.agent.clone());

    Ok(BridgeContext {
        message,
        base,
        settings_manager,
        runtime: Box::new(runtime),
    })
}

/// Log to stderr; stdout is reserved for the JSON response.
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let verbose = std::env::var_os(VERBOSE_ENV).is_some_and(|v| !v.is_empty());
    let directives = log_directives(std::env::var(EnvFilter::DEFAULT_ENV).ok(), verbose);
    let filter = EnvFilter::new(directives);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// `RUST_LOG` wins when set; otherwise only this crate logs, at warn or debug.
fn log_directives(rust_log: Option<String>, verbose: bool) -> String {
    match rust_log.filter(|v| !v.trim().is_empty()) {
        Some(directives) => directives,
        None => {
            let level = if verbose { "debug" } else { "warn" };
            format!("forge_bridge_lib={}", level)
        }
    }
}
