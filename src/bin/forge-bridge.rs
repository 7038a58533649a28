//! forge-bridge - forward one chat message to the AgentForge runtime
//!
//! Prints exactly one JSON object on stdout:
//!
//! ```bash
//! # Reply from the agent, or a canned reply when the agent is unavailable
//! forge-bridge "who are you"
//! # {"message":"...","steps":[{"title":"...","status":"completed","description":"..."}]}
//!
//! # Missing message (exit code 1)
//! forge-bridge
//! # {"error":"No message provided"}
//! ```
//!
//! Logs go to stderr. Set `FORGE_BRIDGE_VERBOSE=1` or `RUST_LOG` for detail.

use std::process::ExitCode;

use clap::Parser;

use forge_bridge_lib::bridge::BridgeResponse;
use forge_bridge_lib::cli::{emit, execute_once, initialize, Args};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let response = match initialize(&args).await {
        Ok(ctx) => execute_once(&ctx).await,
        Err(e) => BridgeResponse::from(e),
    };

    emit(&response)
}
