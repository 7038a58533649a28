//! Settings loading and environment variable interpolation.
//!
//! The `SettingsManager` handles:
//! - Loading settings from `~/.forge-bridge/settings.toml` (or `$FORGE_BRIDGE_SETTINGS`)
//! - Resolving `$VAR` and `${VAR}` environment variable references

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::schema::BridgeSettings;

/// Environment variable overriding the settings file location.
pub const SETTINGS_ENV: &str = "FORGE_BRIDGE_SETTINGS";

/// Get the path to the settings file.
pub fn settings_path() -> PathBuf {
    if let Some(path) = std::env::var_os(SETTINGS_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".forge-bridge")
        .join("settings.toml")
}

/// Loaded settings together with the file they came from.
pub struct SettingsManager {
    /// Settings with env vars resolved
    settings: BridgeSettings,

    /// Path to the settings file
    path: PathBuf,
}

impl SettingsManager {
    /// Create a new SettingsManager, loading from disk if available.
    pub async fn new() -> Result<Self> {
        Self::from_path(settings_path()).await
    }

    /// Load settings from a specific path.
    pub async fn from_path(path: PathBuf) -> Result<Self> {
        let settings = Self::load_from_path(&path).await?;
        Ok(Self { settings, path })
    }

    /// Built-in defaults, used when the settings file cannot be read.
    pub fn defaults(path: PathBuf) -> Self {
        Self {
            settings: BridgeSettings::default(),
            path,
        }
    }

    async fn load_from_path(path: &Path) -> Result<BridgeSettings> {
        if !path.exists() {
            tracing::debug!("Settings file not found at {:?}, using defaults", path);
            return Ok(BridgeSettings::default());
        }

        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;

        let mut settings: BridgeSettings =
            toml::from_str(&contents).context("Failed to deserialize settings")?;

        Self::resolve_env_vars(&mut settings);

        tracing::debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Resolve $ENV_VAR references in string fields.
    fn resolve_env_vars(settings: &mut BridgeSettings) {
        fn resolve_opt(value: &mut Option<String>) {
            if let Some(v) = value {
                if let Some(resolved) = resolve_env_ref(v) {
                    *v = resolved;
                }
            }
        }

        fn resolve(value: &mut String) {
            if let Some(resolved) = resolve_env_ref(value) {
                *value = resolved;
            }
        }

        resolve(&mut settings.agent.command);
        resolve(&mut settings.agent.library_dir);
        resolve(&mut settings.agent.fallback_library_dir);
        resolve(&mut settings.agent.project_dir);

        resolve_opt(&mut settings.api_keys.openai);
        resolve_opt(&mut settings.api_keys.huggingface);
    }

    /// Get the current settings.
    pub fn get(&self) -> &BridgeSettings {
        &self.settings
    }

    /// Get the settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Resolve a $ENV_VAR or ${ENV_VAR} reference.
///
/// Returns `Some(resolved)` if the value starts with `$` and the env var exists.
/// Returns `None` if no env var reference or env var not set.
fn resolve_env_ref(value: &str) -> Option<String> {
    let trimmed = value.trim();

    if let Some(rest) = trimmed.strip_prefix('$') {
        let var_name = rest
            .strip_prefix('{')
            .and_then(|r| r.strip_suffix('}'))
            .unwrap_or(rest);

        return std::env::var(var_name).ok();
    }

    None
}

/// Get a setting value with environment variable fallback.
///
/// Priority order:
/// 1. Settings value (if set and non-empty)
/// 2. Environment variable (first match from list)
/// 3. Default value
pub fn get_with_env_fallback(
    setting: &Option<String>,
    env_vars: &[&str],
    default: Option<String>,
) -> Option<String> {
    if let Some(v) = setting {
        if !v.is_empty() {
            return Some(v.clone());
        }
    }

    for env_var in env_vars {
        if let Ok(v) = std::env::var(env_var) {
            if !v.is_empty() {
                return Some(v);
            }
        }
    }

    default
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_env_ref_dollar_format() {
        std::env::set_var("FB_TEST_VAR_1", "test_value_1");

        assert_eq!(
            resolve_env_ref("$FB_TEST_VAR_1"),
            Some("test_value_1".to_string())
        );

        std::env::remove_var("FB_TEST_VAR_1");
    }

    #[test]
    fn test_resolve_env_ref_braces_format() {
        std::env::set_var("FB_TEST_VAR_2", "test_value_2");

        assert_eq!(
            resolve_env_ref("${FB_TEST_VAR_2}"),
            Some("test_value_2".to_string())
        );

        std::env::remove_var("FB_TEST_VAR_2");
    }

    #[test]
    fn test_resolve_env_ref_no_match() {
        assert_eq!(resolve_env_ref("regular_value"), None);
        assert_eq!(resolve_env_ref("$NONEXISTENT_VAR_XYZ_12345"), None);
    }

    #[test]
    fn test_get_with_env_fallback_from_setting() {
        let setting = Some("from_settings".to_string());
        let result = get_with_env_fallback(&setting, &["SOME_VAR"], None);
        assert_eq!(result, Some("from_settings".to_string()));
    }

    #[test]
    fn test_get_with_env_fallback_from_env() {
        std::env::set_var("FB_FALLBACK_TEST_VAR", "from_env");

        let result = get_with_env_fallback(&None, &["FB_FALLBACK_TEST_VAR"], None);
        assert_eq!(result, Some("from_env".to_string()));

        std::env::remove_var("FB_FALLBACK_TEST_VAR");
    }

    #[test]
    fn test_get_with_env_fallback_empty_setting() {
        std::env::set_var("FB_EMPTY_SETTING_TEST", "from_env");

        // Empty string in setting should fall through to env var
        let setting = Some("".to_string());
        let result = get_with_env_fallback(&setting, &["FB_EMPTY_SETTING_TEST"], None);
        assert_eq!(result, Some("from_env".to_string()));

        std::env::remove_var("FB_EMPTY_SETTING_TEST");
    }

    #[test]
    fn test_get_with_env_fallback_default() {
        let result = get_with_env_fallback(
            &None,
            &["NONEXISTENT_VAR_ABC"],
            Some("default_value".to_string()),
        );
        assert_eq!(result, Some("default_value".to_string()));
    }

    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let manager = SettingsManager::from_path(PathBuf::from("/nonexistent/settings.toml"))
            .await
            .unwrap();

        assert_eq!(manager.get().agent.name, "ResponseAgent");
    }

    #[tokio::test]
    async fn test_load_resolves_env_refs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "[api_keys]\nopenai = \"$FB_LOADER_OPENAI\"\n\n[agent]\nname = \"Other\"\n",
        )
        .unwrap();
        std::env::set_var("FB_LOADER_OPENAI", "sk-test");

        let manager = SettingsManager::from_path(path.clone()).await.unwrap();
        assert_eq!(manager.get().api_keys.openai.as_deref(), Some("sk-test"));
        assert_eq!(manager.get().agent.name, "Other");
        assert_eq!(manager.path(), path.as_path());

        std::env::remove_var("FB_LOADER_OPENAI");
    }

    #[tokio::test]
    async fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "agent = [not toml").unwrap();

        assert!(SettingsManager::from_path(path).await.is_err());
    }
}
