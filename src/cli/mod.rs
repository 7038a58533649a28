//! CLI module for the bridge binary.
//!
//! ```text
//! +--------------+     +-----------+     +-----------+
//! | bootstrap.rs | --> | runner.rs | --> | output.rs |
//! | (runtime)    |     | (reply)   |     | (JSON)    |
//! +--------------+     +-----------+     +-----------+
//! ```
//!
//! Bootstrap failures (missing message, agent library not found) skip the
//! runner and go straight to output with exit code 1.

mod args;
mod bootstrap;
mod output;
mod runner;

pub use args::Args;
pub use bootstrap::{initialize, BridgeContext, VERBOSE_ENV};
pub use output::{emit, write_response};
pub use runner::{execute_once, run_agent};
