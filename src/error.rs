use std::path::Path;

use serde::Serialize;
use thiserror::Error;

/// Fatal bridge errors. Both variants end the process with exit code 1.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("No message provided")]
    MissingMessage,

    #[error("{message}")]
    RuntimeNotFound {
        message: String,
        searched: SearchedPaths,
    },
}

/// The library directories searched while locating the agent runtime.
///
/// Serializes as a bare string when only the primary directory was searched,
/// and as a list once the fallback directory has been appended. Paths are
/// stored as lossy display strings so serialization cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchedPaths {
    Single(String),
    Many(Vec<String>),
}

impl SearchedPaths {
    pub fn single(path: &Path) -> Self {
        Self::Single(path.display().to_string())
    }

    pub fn many<P: AsRef<Path>>(paths: &[P]) -> Self {
        Self::Many(
            paths
                .iter()
                .map(|p| p.as_ref().display().to_string())
                .collect(),
        )
    }
}

/// Reasons a delegate call produced no usable reply.
#[derive(Debug, Error)]
pub enum DelegateError {
    #[error("Failed to start agent runner: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Agent runner exited with {status}: {stderr}")]
    Exited { status: String, stderr: String },

    #[error("Agent runner timed out after {0}s")]
    Timeout(u64),

    #[error("Agent runner returned an empty response")]
    EmptyResponse,

    #[error("Agent runner produced invalid output: {0}")]
    InvalidOutput(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
