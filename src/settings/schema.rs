//! Settings schema definitions for the bridge.
//!
//! All settings structs use `#[serde(default)]` to allow partial configuration files.
//! Missing fields are filled with the defaults below.

use serde::Deserialize;

/// Root settings structure.
///
/// Loaded from `~/.forge-bridge/settings.toml` with environment variable interpolation support.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct BridgeSettings {
    /// Agent runtime discovery and invocation
    pub agent: AgentSettings,

    /// Credentials whose presence is reported in fallback replies
    pub api_keys: ApiKeysSettings,
}

/// How the AgentForge runtime is located and driven.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Agent identifier passed to the runner
    pub name: String,

    /// Executable used to drive the runtime
    pub command: String,

    /// Arguments for `command`. `{agent}` and `{input}` are substituted.
    pub args: Vec<String>,

    /// Upper bound for a single delegate call
    pub timeout_secs: u64,

    /// Primary library directory, relative to the base directory
    pub library_dir: String,

    /// Directory appended when the package is missing from `library_dir`
    pub fallback_library_dir: String,

    /// Package directory that must exist inside a library directory
    pub package: String,

    /// Project configuration directory read by the runtime
    pub project_dir: String,
}

/// Python driver handed to `python3 -c`. Prints the agent reply without a trailing newline.
pub const RUNNER_SHIM: &str = "import sys\n\
from agentforge.core.agent_runner import AgentRunner\n\
reply = AgentRunner(agent_name=sys.argv[1]).run(input_data=sys.argv[2])\n\
sys.stdout.write(str(reply) if reply else '')\n";

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            name: "ResponseAgent".to_string(),
            command: "python3".to_string(),
            args: vec![
                "-c".to_string(),
                RUNNER_SHIM.to_string(),
                "{agent}".to_string(),
                "{input}".to_string(),
            ],
            timeout_secs: 120,
            library_dir: "AgentForge/src".to_string(),
            fallback_library_dir: ".pythonlibs/lib/python3.11/site-packages".to_string(),
            package: "agentforge".to_string(),
            project_dir: ".agentforge".to_string(),
        }
    }
}

/// API keys (support `$ENV_VAR` syntax).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ApiKeysSettings {
    pub openai: Option<String>,

    pub huggingface: Option<String>,
}
