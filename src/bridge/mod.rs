//! Bridge between a single chat message and the AgentForge runtime.
//!
//! ```text
//! +-----------+     +----------------+     +-----------------+
//! | locate.rs | --> | AgentRuntime   | --> | DelegateOutcome |
//! | (library) |     | (process.rs)   |     |  ok | failed    |
//! +-----------+     +----------------+     +-----------------+
//!                                               |       |
//!                                   BridgeResponse   rules.rs (canned)
//! ```

pub mod delegate;
pub mod locate;
pub mod process;
pub mod rules;
pub mod types;

pub use delegate::{AgentRunner, AgentRuntime, ConfigHandle, DelegateOutcome};
pub use locate::{base_dir, locate_library, HOME_ENV};
pub use process::AgentForgeRuntime;
pub use rules::{canned_reply, CredentialStatus};
pub use types::{BridgeResponse, StepRecord, DELEGATE_STEPS, FALLBACK_STEPS};
