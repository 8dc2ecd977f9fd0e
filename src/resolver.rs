//! Backend interpreter resolution.
//!
//! Picks which Python executable launches the devion backend. Supports both
//! a vendored interpreter in a project-local `.venv` and a bare system
//! installation, without requiring configuration.

use std::path::{Path, PathBuf};

/// Venv-relative interpreter locations, highest priority first.
///
/// One entry per OS family: the Unix layout and the Windows layout. Both are
/// probed regardless of the host OS so a checkout shared across platforms
/// resolves the same way.
const VENV_CANDIDATES: [&[&str]; 2] = [
    &[".venv", "bin", "python"],
    &[".venv", "Scripts", "python.exe"],
];

/// System-wide interpreter used when no venv interpreter exists.
pub const SYSTEM_INTERPRETER: &str = "python3";

/// Resolve the backend interpreter for the given backend root.
///
/// Returns the first venv candidate that exists as a regular file, else the
/// generic [`SYSTEM_INTERPRETER`] unconditionally. Resolution itself never
/// fails; a fallback that turns out not to exist surfaces later as a spawn
/// failure. Side effects are limited to read-only existence checks.
#[must_use]
pub fn resolve_interpreter(backend_root: &Path) -> PathBuf {
    for candidate in VENV_CANDIDATES {
        let path = candidate
            .iter()
            .fold(backend_root.to_path_buf(), |p, segment| p.join(segment));
        if path.is_file() {
            return path;
        }
    }
    PathBuf::from(SYSTEM_INTERPRETER)
}
