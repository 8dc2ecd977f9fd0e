//! Configuration discovery for the CLI.
//!
//! Precedence for every knob: CLI argument > environment variable > default.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Values extracted from parsed CLI arguments.
///
/// Kept separate from the clap structs so configuration precedence stays
/// testable without argument parsing.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// `--backend-root`: root of the installed backend package.
    pub backend_root: Option<PathBuf>,
    /// `--python`: explicit interpreter, bypassing venv resolution.
    pub python: Option<PathBuf>,
    /// `--timeout`: wall-clock bound in seconds for one invocation.
    pub timeout_seconds: Option<u64>,
    /// `--verbose`
    pub verbose: bool,
}

/// Effective configuration for one CLI run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend package root; used for venv resolution and `PYTHONPATH`.
    pub backend_root: PathBuf,
    /// Explicit interpreter override, if any.
    pub interpreter: Option<PathBuf>,
    /// Optional invocation timeout.
    pub timeout: Option<Duration>,
    /// Verbose logging.
    pub verbose: bool,
}

impl Config {
    /// Resolve the effective configuration.
    ///
    /// Backend root: flag > `DEVION_BACKEND_ROOT` > the installed
    /// executable's grandparent (the `<root>/bin/devion` layout) > the
    /// current directory. Interpreter: flag > `DEVION_PYTHON` > venv
    /// resolution at invoke time.
    #[must_use]
    pub fn discover(overrides: &CliOverrides) -> Self {
        let backend_root = overrides
            .backend_root
            .clone()
            .or_else(|| env::var_os("DEVION_BACKEND_ROOT").map(PathBuf::from))
            .or_else(installed_backend_root)
            .unwrap_or_else(|| PathBuf::from("."));

        let interpreter = overrides
            .python
            .clone()
            .or_else(|| env::var_os("DEVION_PYTHON").map(PathBuf::from));

        Self {
            backend_root,
            interpreter,
            timeout: overrides.timeout_seconds.map(Duration::from_secs),
            verbose: overrides.verbose,
        }
    }
}

/// Backend root implied by the installed layout (`<root>/bin/devion`).
fn installed_backend_root() -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    Some(exe.parent()?.parent()?.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn cli_overrides_take_precedence() {
        let overrides = CliOverrides {
            backend_root: Some(PathBuf::from("/opt/devion")),
            python: Some(PathBuf::from("/usr/bin/python3.12")),
            timeout_seconds: Some(90),
            verbose: true,
        };
        let config = Config::discover(&overrides);
        assert_eq!(config.backend_root, Path::new("/opt/devion"));
        assert_eq!(config.interpreter, Some(PathBuf::from("/usr/bin/python3.12")));
        assert_eq!(config.timeout, Some(Duration::from_secs(90)));
        assert!(config.verbose);
    }

    #[test]
    fn defaults_always_yield_a_backend_root() {
        let config = Config::discover(&CliOverrides::default());
        assert!(!config.backend_root.as_os_str().is_empty());
        assert_eq!(config.timeout, None);
        assert!(!config.verbose);
    }
}
