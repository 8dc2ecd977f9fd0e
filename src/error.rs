//! Error taxonomy for the command bridge.
//!
//! Every failure mode of one backend invocation is resolved at the bridge
//! boundary into exactly one [`BridgeError`] variant. An application-level
//! failure reported through the protocol (`Response { success: false, .. }`)
//! is NOT a bridge error; it is a normal result and never appears here.

use crate::exit_codes::ExitCode;
use std::path::PathBuf;
use thiserror::Error;

/// Failure that prevented a well-formed `Response` from being produced.
///
/// Exactly one variant is produced per failed invocation. The bridge never
/// returns both a response and an error, and no panic crosses into the
/// presentation layer.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// No backend interpreter could be resolved.
    ///
    /// Reserved: the default resolver falls back to the system interpreter
    /// unconditionally and never produces this. A stricter resolver that
    /// requires a project-local venv would.
    #[error("No backend interpreter found under {root}")]
    Resolution { root: PathBuf },

    /// The OS could not start the backend process.
    #[error("Failed to start backend process '{program}': {reason}")]
    Spawn { program: String, reason: String },

    /// The backend ran but exited non-zero. Its stderr is the diagnostic of
    /// record; stdout is discarded for this outcome.
    #[error("Backend exited with code {code}")]
    NonZeroExit { code: i32, stderr: String },

    /// The backend exited zero but its stdout was not a single JSON document
    /// in the response shape. The raw output is preserved verbatim so the
    /// user can diagnose a misbehaving backend.
    #[error("Backend output is not a valid response: {reason}")]
    Decode { raw: String, reason: String },

    /// The invocation exceeded the configured wall-clock timeout and the
    /// backend process was terminated.
    #[error("Backend did not finish within {timeout_seconds}s")]
    Timeout { timeout_seconds: u64 },
}

impl BridgeError {
    /// Map this error to the exit code surfaced to the shell.
    ///
    /// A backend's own non-zero exit code is propagated verbatim rather than
    /// collapsed to 1; every other variant exits 1. Signal deaths are
    /// reported with code `-1` internally and normalized to 1 here.
    #[must_use]
    pub fn to_exit_code(&self) -> ExitCode {
        match self {
            Self::NonZeroExit { code, .. } if *code > 0 => ExitCode::from_i32(*code),
            _ => ExitCode::FAILURE,
        }
    }
}
