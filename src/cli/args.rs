//! CLI argument parsing using clap.
//!
//! The bridge takes exactly one positional message. Every argv word is treated
//! as message text, so `--help` and hyphen-leading messages pass through.
//! Arguments are taken as raw OS strings; invalid UTF-8 is replaced, never rejected.

use std::borrow::Cow;
use std::ffi::OsString;

use clap::Parser;

use crate::error::BridgeError;

/// Forward a chat message to the AgentForge runtime and print a JSON reply
#[derive(Parser, Debug, Clone)]
#[command(name = "forge-bridge")]
#[command(about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Message to forward to the agent
    #[arg(allow_hyphen_values = true, value_parser = clap::value_parser!(OsString))]
    pub message: Option<OsString>,

    /// Extra arguments are accepted and ignored
    #[arg(
        hide = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(OsString)
    )]
    pub rest: Vec<OsString>,
}

impl Args {
    /// The message to process.
    ///
    /// An empty string is still a message; only a missing argument is an error.
    pub fn message(&self) -> Result<Cow<'_, str>, BridgeError> {
        self.message
            .as_ref()
            .map(|m| m.to_string_lossy())
            .ok_or(BridgeError::MissingMessage)
    }
}
