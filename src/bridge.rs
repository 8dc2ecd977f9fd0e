//! Process bridge: owns one backend subprocess per invocation.
//!
//! The backend is an opaque capability reached only through the documented
//! argv/JSON protocol, never shared memory or direct calls. Each
//! [`Bridge::invoke`] call creates exactly one OS subprocess, drains both of
//! its output streams in full, observes its exit, and classifies the outcome
//! into a [`Response`] or a [`BridgeError`]. No retries, no pooling, no
//! persistent handle across calls.
//!
//! All process execution goes through [`CommandSpec`] to ensure argv-style
//! invocation: arguments cross the trust boundary as discrete elements, and
//! no shell string evaluation occurs.

use crate::error::BridgeError;
use crate::protocol::{Invocation, Response, decode_response};
use crate::resolver;
use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, ChildStderr, ChildStdout, Command as TokioCommand};
use tracing::debug;

/// Specification for a command to execute.
///
/// Arguments are stored as discrete `OsString` elements, NOT shell strings,
/// so shell metacharacters in options JSON are never interpreted.
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    /// The program to execute.
    pub program: OsString,
    /// Arguments as discrete elements.
    pub args: Vec<OsString>,
    /// Optional working directory. `None` inherits the parent's cwd.
    pub cwd: Option<PathBuf>,
    /// Environment overrides layered on the inherited environment.
    pub env: HashMap<OsString, OsString>,
}

impl CommandSpec {
    /// Create a new `CommandSpec` for the given program.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Add a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory.
    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Set an environment variable override.
    #[must_use]
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Convert into a `tokio::process::Command` using argv-style APIs only.
    #[must_use]
    pub fn to_tokio_command(&self) -> TokioCommand {
        let mut cmd = TokioCommand::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }
}

/// Bridge to the devion backend process.
///
/// Holds the resolved configuration for one CLI run; each
/// [`invoke`](Self::invoke) call is an independent subprocess lifecycle.
#[derive(Debug, Clone)]
pub struct Bridge {
    backend_root: PathBuf,
    interpreter: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl Bridge {
    /// Create a bridge for the backend package rooted at `backend_root`.
    #[must_use]
    pub fn new(backend_root: impl Into<PathBuf>) -> Self {
        Self {
            backend_root: backend_root.into(),
            interpreter: None,
            timeout: None,
        }
    }

    /// Use an explicit interpreter instead of venv resolution.
    #[must_use]
    pub fn with_interpreter(mut self, interpreter: impl Into<PathBuf>) -> Self {
        self.interpreter = Some(interpreter.into());
        self
    }

    /// Bound the total invocation wall-clock time.
    ///
    /// Off by default. When the bound is exceeded the child is terminated
    /// and the invocation fails with [`BridgeError::Timeout`].
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Run one invocation against the backend.
    ///
    /// Returns exactly one of a decoded [`Response`] or a [`BridgeError`]:
    ///
    /// 1. Resolve the interpreter (explicit override, else venv lookup with
    ///    system fallback).
    /// 2. Spawn it with the encoded argument vector. The child inherits the
    ///    user's current working directory (backend operations must see the
    ///    user's project tree, not this tool's installation directory) and
    ///    the full environment, with `PYTHONPATH` augmented to include the
    ///    backend package root so module resolution succeeds from any cwd.
    /// 3. Drain stdout and stderr concurrently and in full. Neither stream
    ///    may block the other; sequential draining can deadlock once the
    ///    backend fills an OS pipe buffer.
    /// 4. Wait for exit. Non-zero exit returns `NonZeroExit` with the
    ///    accumulated stderr; stdout is discarded since a failed backend's
    ///    payload is not trustworthy.
    /// 5. Zero exit decodes stdout; a decode failure carries the raw text.
    /// 6. A decoded `success: false` response passes through unchanged: an
    ///    application-level failure reported through the protocol is a valid
    ///    response, not a bridge error.
    ///
    /// I/O failures on the child's pipes or while reaping it are reported as
    /// `Spawn`: the subprocess never produced a complete, trustworthy
    /// exchange.
    pub async fn invoke(&self, invocation: &Invocation) -> Result<Response, BridgeError> {
        let interpreter = self
            .interpreter
            .clone()
            .unwrap_or_else(|| resolver::resolve_interpreter(&self.backend_root));
        let program = interpreter.display().to_string();

        let spec = CommandSpec::new(&interpreter)
            .args(invocation.encode_request())
            .env("PYTHONPATH", backend_python_path(&self.backend_root));

        debug!(
            program = %program,
            command = invocation.command(),
            "spawning backend process"
        );

        let mut cmd = spec.to_tokio_command();
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // If this CLI is interrupted mid-invocation, take the child down
            // with it rather than leaving an orphaned backend.
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| BridgeError::Spawn {
            program: program.clone(),
            reason: e.to_string(),
        })?;

        let mut stdout_pipe = child.stdout.take().ok_or_else(|| BridgeError::Spawn {
            program: program.clone(),
            reason: "failed to capture stdout".to_string(),
        })?;
        let mut stderr_pipe = child.stderr.take().ok_or_else(|| BridgeError::Spawn {
            program: program.clone(),
            reason: "failed to capture stderr".to_string(),
        })?;

        let (stdout_buf, stderr_buf, status) = match self.timeout {
            Some(duration) => {
                let outcome = tokio::time::timeout(
                    duration,
                    drain_and_wait(&mut child, &mut stdout_pipe, &mut stderr_pipe, &program),
                )
                .await;
                match outcome {
                    Ok(done) => done?,
                    Err(_) => {
                        let _ = child.kill().await;
                        return Err(BridgeError::Timeout {
                            timeout_seconds: duration.as_secs(),
                        });
                    }
                }
            }
            None => drain_and_wait(&mut child, &mut stdout_pipe, &mut stderr_pipe, &program).await?,
        };

        debug!(code = ?status.code(), "backend process exited");

        if !status.success() {
            return Err(BridgeError::NonZeroExit {
                code: status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&stderr_buf).to_string(),
            });
        }

        decode_response(&String::from_utf8_lossy(&stdout_buf))
    }
}

/// Drain both output streams to EOF concurrently, then reap the child.
///
/// The two reads run under `tokio::join!` so a backend that floods one pipe
/// before touching the other cannot wedge the invocation.
async fn drain_and_wait(
    child: &mut Child,
    stdout_pipe: &mut ChildStdout,
    stderr_pipe: &mut ChildStderr,
    program: &str,
) -> Result<(Vec<u8>, Vec<u8>, ExitStatus), BridgeError> {
    let mut stdout_buf = Vec::new();
    let mut stderr_buf = Vec::new();

    let (stdout_read, stderr_read) = tokio::join!(
        stdout_pipe.read_to_end(&mut stdout_buf),
        stderr_pipe.read_to_end(&mut stderr_buf),
    );
    stdout_read.map_err(|e| BridgeError::Spawn {
        program: program.to_string(),
        reason: format!("failed to read stdout: {e}"),
    })?;
    stderr_read.map_err(|e| BridgeError::Spawn {
        program: program.to_string(),
        reason: format!("failed to read stderr: {e}"),
    })?;

    let status = child.wait().await.map_err(|e| BridgeError::Spawn {
        program: program.to_string(),
        reason: format!("failed to wait for process: {e}"),
    })?;

    Ok((stdout_buf, stderr_buf, status))
}

/// `PYTHONPATH` for the child: the backend package root first, then the
/// parent's existing entries.
fn backend_python_path(backend_root: &Path) -> OsString {
    let mut parts = vec![backend_root.to_path_buf()];
    if let Some(existing) = env::var_os("PYTHONPATH") {
        parts.extend(env::split_paths(&existing));
    }
    env::join_paths(&parts).unwrap_or_else(|_| backend_root.as_os_str().to_os_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_spec_holds_discrete_args() {
        let spec = CommandSpec::new("python3")
            .arg("-m")
            .args(["devion.main", "status", r#"{"verbose":true}"#]);
        assert_eq!(spec.program, OsString::from("python3"));
        assert_eq!(spec.args.len(), 4);
        // Shell metacharacters stay inert as a single element.
        let spec = CommandSpec::new("python3").arg("a; rm -rf /");
        assert_eq!(spec.args, vec![OsString::from("a; rm -rf /")]);
    }

    #[test]
    fn command_spec_env_overrides_accumulate() {
        let spec = CommandSpec::new("python3")
            .env("PYTHONPATH", "/opt/devion")
            .env("DEVION_DEBUG", "1");
        assert_eq!(spec.env.len(), 2);
        assert_eq!(
            spec.env.get(&OsString::from("PYTHONPATH")),
            Some(&OsString::from("/opt/devion"))
        );
    }

    #[test]
    fn python_path_puts_backend_root_first() {
        let joined = backend_python_path(Path::new("/opt/devion"));
        let first = env::split_paths(&joined).next();
        assert_eq!(first, Some(PathBuf::from("/opt/devion")));
    }

    #[test]
    fn bridge_builder_applies_overrides() {
        let bridge = Bridge::new("/opt/devion")
            .with_interpreter("/usr/bin/python3.12")
            .with_timeout(Duration::from_secs(30));
        assert_eq!(bridge.interpreter, Some(PathBuf::from("/usr/bin/python3.12")));
        assert_eq!(bridge.timeout, Some(Duration::from_secs(30)));
    }
}
