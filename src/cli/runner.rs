//! CLI execution runner.
//!
//! Asks the real agent first and falls back to a canned reply. Errors that
//! escape either stage become a `Failure` response instead of a crash.

use anyhow::{Context, Result};

use crate::bridge::{
    canned_reply, AgentRuntime, BridgeResponse, CredentialStatus, DelegateOutcome,
};
use crate::settings::BridgeSettings;

use super::bootstrap::BridgeContext;

/// Process the context's message and build the response to print.
pub async fn execute_once(ctx: &BridgeContext) -> BridgeResponse {
    tracing::debug!(
        "Running in {} with settings from {}",
        ctx.base.display(),
        ctx.settings_manager.path().display()
    );
    run_agent(ctx.runtime.as_ref(), ctx.settings_manager.get(), &ctx.message).await
}

/// Run one message through the delegate and fallback chain.
pub async fn run_agent(
    runtime: &dyn AgentRuntime,
    settings: &BridgeSettings,
    message: &str,
) -> BridgeResponse {
    match respond(runtime, settings, message).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Bridge failed: {:#}", e);
            BridgeResponse::failure(&e)
        }
    }
}

async fn respond(
    runtime: &dyn AgentRuntime,
    settings: &BridgeSettings,
    message: &str,
) -> Result<BridgeResponse> {
    let runner = runtime.runner(&settings.agent.name);

    match runner.run(message).await {
        DelegateOutcome::Succeeded(reply) => return Ok(BridgeResponse::delegated(reply)),
        DelegateOutcome::Failed(reason) => {
            tracing::debug!(
                "Agent {} unavailable, using canned reply: {}",
                runner.agent_name(),
                reason
            );
        }
    }

    let config = runtime
        .config_manager()
        .context("Failed to initialize AgentForge configuration")?;
    tracing::debug!("AgentForge project config: {:?}", config.project_dir);

    let credentials = CredentialStatus::resolve(&settings.api_keys);
    Ok(BridgeResponse::canned(canned_reply(message, credentials)))
}
