//! AgentForge runtime driven as a child process.
//!
//! The located library directories are passed to the child through
//! `PYTHONPATH`; the bridge's own environment is left untouched.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tokio::process::Command;

use super::delegate::{AgentRunner, AgentRuntime, ConfigHandle, DelegateOutcome};
use crate::error::DelegateError;
use crate::settings::AgentSettings;

/// Runtime rooted at a base directory with a resolved set of library directories.
pub struct AgentForgeRuntime {
    base: PathBuf,
    library_dirs: Vec<PathBuf>,
    agent: AgentSettings,
}

impl AgentForgeRuntime {
    pub fn new(base: PathBuf, library_dirs: Vec<PathBuf>, agent: AgentSettings) -> Self {
        Self {
            base,
            library_dirs,
            agent,
        }
    }
}

/// `PYTHONPATH` for the child: located directories first, then any inherited entries.
fn python_path(library_dirs: &[PathBuf]) -> Result<OsString, DelegateError> {
    let mut entries = library_dirs.to_vec();
    if let Some(existing) = std::env::var_os("PYTHONPATH") {
        entries.extend(std::env::split_paths(&existing));
    }

    std::env::join_paths(entries).map_err(|e| {
        DelegateError::Spawn(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
    })
}

impl AgentRuntime for AgentForgeRuntime {
    fn runner(&self, agent_name: &str) -> Box<dyn AgentRunner> {
        Box::new(ProcessRunner {
            agent_name: agent_name.to_string(),
            command: self.agent.command.clone(),
            args: self.agent.args.clone(),
            timeout: Duration::from_secs(self.agent.timeout_secs),
            working_dir: self.base.clone(),
            library_dirs: self.library_dirs.clone(),
        })
    }

    fn config_manager(&self) -> anyhow::Result<ConfigHandle> {
        let project_dir = self.base.join(&self.agent.project_dir);
        if !project_dir.exists() {
            tracing::debug!("No project config at {}", project_dir.display());
            return Ok(ConfigHandle { project_dir: None });
        }

        std::fs::read_dir(&project_dir).with_context(|| {
            format!(
                "Failed to open AgentForge config at {}",
                project_dir.display()
            )
        })?;

        Ok(ConfigHandle {
            project_dir: Some(project_dir),
        })
    }
}

struct ProcessRunner {
    agent_name: String,
    command: String,
    args: Vec<String>,
    timeout: Duration,
    working_dir: PathBuf,
    library_dirs: Vec<PathBuf>,
}

impl ProcessRunner {
    fn render_args(&self, input: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| match arg.as_str() {
                "{agent}" => self.agent_name.clone(),
                "{input}" => input.to_string(),
                _ => arg.clone(),
            })
            .collect()
    }

    async fn invoke(&self, input: &str) -> Result<String, DelegateError> {
        let child = Command::new(&self.command)
            .args(self.render_args(input))
            .current_dir(&self.working_dir)
            .env("PYTHONPATH", python_path(&self.library_dirs)?)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| DelegateError::Timeout(self.timeout.as_secs()))??;

        if !output.status.success() {
            return Err(DelegateError::Exited {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| DelegateError::InvalidOutput(e.to_string()))
    }
}

#[async_trait]
impl AgentRunner for ProcessRunner {
    fn agent_name(&self) -> &str {
        &self.agent_name
    }

    async fn run(&self, input: &str) -> DelegateOutcome {
        tracing::debug!("Running agent {} via {}", self.agent_name, self.command);
        DelegateOutcome::from(self.invoke(input).await)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn runtime(base: PathBuf, script: &str, timeout_secs: u64) -> AgentForgeRuntime {
        let agent = AgentSettings {
            command: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                script.to_string(),
                "sh".to_string(),
                "{agent}".to_string(),
                "{input}".to_string(),
            ],
            timeout_secs,
            ..AgentSettings::default()
        };
        AgentForgeRuntime::new(base.clone(), vec![base.join("lib")], agent)
    }

    #[tokio::test]
    async fn test_reply_from_stdout() {
        let base = tempfile::tempdir().unwrap();
        let rt = runtime(base.path().to_path_buf(), r#"printf '%s:%s' "$1" "$2""#, 10);

        let runner = rt.runner("ResponseAgent");
        assert_eq!(runner.agent_name(), "ResponseAgent");
        match runner.run("hello").await {
            DelegateOutcome::Succeeded(reply) => assert_eq!(reply, "ResponseAgent:hello"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reply_whitespace_reaches_caller() {
        let base = tempfile::tempdir().unwrap();
        let rt = runtime(base.path().to_path_buf(), r"printf '    let x = 1;\n'", 10);

        match rt.runner("ResponseAgent").run("x").await {
            DelegateOutcome::Succeeded(reply) => assert_eq!(reply, "    let x = 1;\n"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_library_dirs_reach_child() {
        let base = tempfile::tempdir().unwrap();
        let rt = runtime(base.path().to_path_buf(), r#"printf '%s' "$PYTHONPATH""#, 10);

        match rt.runner("ResponseAgent").run("x").await {
            DelegateOutcome::Succeeded(reply) => {
                assert!(reply.starts_with(base.path().join("lib").to_str().unwrap()))
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_failure() {
        let base = tempfile::tempdir().unwrap();
        let rt = runtime(base.path().to_path_buf(), "echo boom >&2; exit 3", 10);

        match rt.runner("ResponseAgent").run("x").await {
            DelegateOutcome::Failed(DelegateError::Exited { stderr, .. }) => {
                assert_eq!(stderr, "boom")
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_output_is_failure() {
        let base = tempfile::tempdir().unwrap();
        let rt = runtime(base.path().to_path_buf(), "true", 10);

        assert!(matches!(
            rt.runner("ResponseAgent").run("x").await,
            DelegateOutcome::Failed(DelegateError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_timeout_is_failure() {
        let base = tempfile::tempdir().unwrap();
        let rt = runtime(base.path().to_path_buf(), "sleep 5", 1);

        assert!(matches!(
            rt.runner("ResponseAgent").run("x").await,
            DelegateOutcome::Failed(DelegateError::Timeout(1))
        ));
    }

    #[tokio::test]
    async fn test_missing_command_is_failure() {
        let base = tempfile::tempdir().unwrap();
        let mut rt = runtime(base.path().to_path_buf(), "true", 10);
        rt.agent.command = "forge-bridge-no-such-command".to_string();

        assert!(matches!(
            rt.runner("ResponseAgent").run("x").await,
            DelegateOutcome::Failed(DelegateError::Spawn(_))
        ));
    }

    #[test]
    fn test_config_manager_without_project_dir() {
        let base = tempfile::tempdir().unwrap();
        let rt = runtime(base.path().to_path_buf(), "true", 10);

        let handle = rt.config_manager().unwrap();
        assert_eq!(handle.project_dir, None);
    }

    #[test]
    fn test_config_manager_with_project_dir() {
        let base = tempfile::tempdir().unwrap();
        std::fs::create_dir(base.path().join(".agentforge")).unwrap();
        let rt = runtime(base.path().to_path_buf(), "true", 10);

        let handle = rt.config_manager().unwrap();
        assert_eq!(handle.project_dir, Some(base.path().join(".agentforge")));
    }

    #[test]
    fn test_config_manager_rejects_file_in_place_of_dir() {
        let base = tempfile::tempdir().unwrap();
        std::fs::write(base.path().join(".agentforge"), "not a dir").unwrap();
        let rt = runtime(base.path().to_path_buf(), "true", 10);

        let err = rt.config_manager().unwrap_err();
        assert!(err.to_string().contains("Failed to open AgentForge config"));
    }
}
