//! devion - development environment manager CLI
//!
//! devion is a thin front end over an independently versioned Python backend
//! that does the actual work: environment inspection, project analysis,
//! packaging. The front end's job is the **command bridge**: resolve which
//! backend interpreter to launch, run it as a subprocess, exchange one
//! JSON request/response over standard streams, and turn every failure mode
//! into a deterministic terminal report and exit code.
//!
//! # Quick Start
//!
//! ```bash
//! # Check development environment status
//! devion status --detailed
//!
//! # Analyze the current project tree
//! devion analyze
//!
//! # Package the project
//! devion deploy --target staging
//! ```
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Backend reported success |
//! | 1 | Backend reported failure, or the bridge failed |
//! | 2 | Invalid CLI arguments |
//! | n | The backend's own non-zero exit code, propagated verbatim |
//!
//! # Stable Public API
//!
//! - [`Bridge`] - subprocess lifecycle and outcome classification
//! - [`Invocation`] / [`Response`] - the wire protocol pair
//! - [`BridgeError`] - bridge-level failure taxonomy
//! - [`ExitCode`] - typed CLI exit codes

pub mod bridge;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod protocol;
pub mod render;
pub mod resolver;

/// Bridge owning one backend subprocess per invocation.
pub use bridge::Bridge;

/// Bridge-level failure taxonomy.
pub use error::BridgeError;

/// Typed exit codes for the CLI contract.
pub use exit_codes::ExitCode;

/// One CLI-triggered backend request.
pub use protocol::Invocation;

/// Decoded backend result.
pub use protocol::Response;

// CLI module - internal implementation detail, exposed for main.rs and
// white-box testing of flag parsing; not part of the stable public API.
#[doc(hidden)]
pub mod cli;
