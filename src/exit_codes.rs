//! Exit code constants for the devion CLI.
//!
//! # Exit Code Table
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Backend reported `success: true` |
//! | 1 | `FAILURE` | Backend reported `success: false`, or a bridge failure |
//! | 2 | `CLI_ARGS` | Invalid command-line arguments |
//! | n | (none) | The backend's own non-zero exit code, propagated verbatim |

/// Type-safe exit code for `std::process::exit`.
///
/// The numeric values are part of the CLI contract and will not change in
/// 1.x releases. Backend exit codes outside the named constants are carried
/// through [`from_i32`](Self::from_i32) unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Operation completed and the backend reported success.
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// General failure: application-level `success: false`, spawn failure,
    /// decode failure, or timeout.
    pub const FAILURE: ExitCode = ExitCode(1);

    /// Invalid or missing command-line arguments.
    pub const CLI_ARGS: ExitCode = ExitCode(2);

    /// Get the numeric value for `std::process::exit()`.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Create an `ExitCode` from a raw value.
    ///
    /// Used to propagate a backend's own exit code. Prefer the named
    /// constants otherwise.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<i32> for ExitCode {
    fn from(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}
