//! TOML-based settings for the bridge.
//!
//! Settings are loaded from `~/.forge-bridge/settings.toml` with environment variable
//! interpolation support. Credentials keep working from plain environment variables
//! through the `get_with_env_fallback` helper.

pub mod loader;
pub mod schema;

pub use loader::{get_with_env_fallback, settings_path, SettingsManager, SETTINGS_ENV};
pub use schema::{AgentSettings, ApiKeysSettings, BridgeSettings};
