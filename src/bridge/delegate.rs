//! Capabilities the bridge needs from the external agent runtime.
//!
//! The runtime is injected into the runner as `&dyn AgentRuntime`, so the
//! entry point never discovers it through global state.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::DelegateError;

/// Result of asking the real agent for a reply.
#[derive(Debug)]
pub enum DelegateOutcome {
    /// The agent produced a non-empty reply
    Succeeded(String),
    /// No usable reply; the bridge falls back to canned text
    Failed(DelegateError),
}

impl DelegateOutcome {
    /// Build an outcome from raw agent output, treating blank output as a failure.
    ///
    /// A non-blank reply is forwarded exactly as returned.
    pub fn from_reply(reply: String) -> Self {
        if reply.trim().is_empty() {
            Self::Failed(DelegateError::EmptyResponse)
        } else {
            Self::Succeeded(reply)
        }
    }
}

impl From<Result<String, DelegateError>> for DelegateOutcome {
    fn from(result: Result<String, DelegateError>) -> Self {
        match result {
            Ok(reply) => Self::from_reply(reply),
            Err(e) => Self::Failed(e),
        }
    }
}

/// A handle to one named agent.
#[async_trait]
pub trait AgentRunner: Send + Sync {
    /// Name the runner was constructed with
    fn agent_name(&self) -> &str;

    /// Process a single input message.
    async fn run(&self, input: &str) -> DelegateOutcome;
}

/// Runtime configuration handle. Its construction gates the canned fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigHandle {
    /// Project configuration directory, when one exists
    pub project_dir: Option<PathBuf>,
}

/// The external agent framework.
///
/// Object-safe; used as `&dyn AgentRuntime` by the runner.
pub trait AgentRuntime: Send + Sync {
    /// Construct a runner for the given agent.
    fn runner(&self, agent_name: &str) -> Box<dyn AgentRunner>;

    /// Open the runtime configuration.
    fn config_manager(&self) -> anyhow::Result<ConfigHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_reply_is_failure() {
        assert!(matches!(
            DelegateOutcome::from_reply("  \n".to_string()),
            DelegateOutcome::Failed(DelegateError::EmptyResponse)
        ));
    }

    #[test]
    fn test_reply_whitespace_is_preserved() {
        let reply = "    fn main() {}\n\nDone.\n".to_string();
        match DelegateOutcome::from_reply(reply.clone()) {
            DelegateOutcome::Succeeded(forwarded) => assert_eq!(forwarded, reply),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_error_maps_to_failure() {
        let outcome = DelegateOutcome::from(Err(DelegateError::Timeout(3)));
        assert!(matches!(
            outcome,
            DelegateOutcome::Failed(DelegateError::Timeout(3))
        ));
    }
}
