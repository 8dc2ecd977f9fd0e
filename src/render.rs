//! Presentation layer: maps bridge results to terminal output and exit codes.
//!
//! Application-level results (both successes and `success: false` responses)
//! and bridge-level failures render distinguishably: bridge failures are
//! always prefixed `Bridge failure:` so a misbehaving backend is never
//! mistaken for a backend-reported error. Decode failures additionally dump
//! the raw backend output verbatim.

use crate::error::BridgeError;
use crate::exit_codes::ExitCode;
use crate::protocol::Response;
use serde_json::Value;
use std::io::IsTerminal;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Colored output only when stdout is a TTY and `NO_COLOR` is unset.
fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{BOLD}{color}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Render a terminal result and return the exit code for the shell.
///
/// Successful responses go to stdout with exit 0; everything else goes to
/// stderr with a non-zero code. `NonZeroExit` propagates the backend's own
/// exit code verbatim.
pub fn render(result: &Result<Response, BridgeError>) -> ExitCode {
    let color = use_color();
    match result {
        Ok(response) if response.success => {
            print!("{}", success_report(response, color));
            ExitCode::SUCCESS
        }
        Ok(response) => {
            eprint!("{}", failure_report(response, color));
            ExitCode::FAILURE
        }
        Err(error) => {
            eprint!("{}", bridge_error_report(error, color));
            error.to_exit_code()
        }
    }
}

/// Report for a `success: true` response: the data payload as pretty JSON,
/// followed by the backend's message when present.
#[must_use]
pub fn success_report(response: &Response, color: bool) -> String {
    let mut out = format!("{} Operation successful\n", paint("✓", GREEN, color));
    if let Some(data) = &response.data
        && *data != Value::Null
    {
        let pretty =
            serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
        out.push_str(&pretty);
        out.push('\n');
    }
    if let Some(message) = &response.message {
        out.push_str(message);
        out.push('\n');
    }
    out
}

/// Report for a well-formed `success: false` response: the message plus one
/// line per entry of `errors`.
#[must_use]
pub fn failure_report(response: &Response, color: bool) -> String {
    let message = response
        .message
        .as_deref()
        .unwrap_or("Operation failed");
    let mut out = format!("{} {message}\n", paint("✗", RED, color));
    for error in &response.errors {
        out.push_str("  - ");
        out.push_str(error);
        out.push('\n');
    }
    out
}

/// Fixed, variant-specific diagnostic for a bridge-level failure.
#[must_use]
pub fn bridge_error_report(error: &BridgeError, color: bool) -> String {
    let mut out = format!("{} Bridge failure: {error}\n", paint("✗", RED, color));
    match error {
        BridgeError::NonZeroExit { stderr, .. } if !stderr.is_empty() => {
            for line in stderr.lines() {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
        BridgeError::Decode { raw, .. } => {
            out.push_str("--- raw backend output ---\n");
            out.push_str(raw);
            if !raw.ends_with('\n') {
                out.push('\n');
            }
        }
        _ => {}
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(success: bool) -> Response {
        Response {
            success,
            data: None,
            message: None,
            errors: Vec::new(),
        }
    }

    #[test]
    fn success_report_includes_data_and_message() {
        let mut resp = response(true);
        resp.data = Some(json!({"tools": {"git": {"installed": true}}}));
        resp.message = Some("All tools present".to_string());
        let report = success_report(&resp, false);
        assert!(report.starts_with("✓ Operation successful\n"));
        assert!(report.contains("\"installed\": true"));
        assert!(report.ends_with("All tools present\n"));
    }

    #[test]
    fn success_report_skips_null_data() {
        let mut resp = response(true);
        resp.data = Some(Value::Null);
        assert_eq!(success_report(&resp, false), "✓ Operation successful\n");
    }

    #[test]
    fn failure_report_lists_each_error_on_its_own_line() {
        let mut resp = response(false);
        resp.message = Some("Execution error in module 'deploy'.".to_string());
        resp.errors = vec!["dist/ not writable".to_string(), "disk full".to_string()];
        let report = failure_report(&resp, false);
        assert!(report.starts_with("✗ Execution error in module 'deploy'.\n"));
        assert!(report.contains("  - dist/ not writable\n"));
        assert!(report.contains("  - disk full\n"));
    }

    #[test]
    fn failure_report_without_message_uses_fallback() {
        let report = failure_report(&response(false), false);
        assert!(report.starts_with("✗ Operation failed\n"));
    }

    #[test]
    fn bridge_reports_are_distinguishable_from_application_failures() {
        let err = BridgeError::Spawn {
            program: "python3".to_string(),
            reason: "No such file or directory".to_string(),
        };
        let report = bridge_error_report(&err, false);
        assert!(report.contains("Bridge failure:"));
        assert!(report.contains("python3"));
    }

    #[test]
    fn decode_report_dumps_raw_output() {
        let err = BridgeError::Decode {
            raw: "Traceback (most recent call last):\n  ...".to_string(),
            reason: "expected value at line 1 column 1".to_string(),
        };
        let report = bridge_error_report(&err, false);
        assert!(report.contains("--- raw backend output ---\n"));
        assert!(report.contains("Traceback"));
        assert!(report.ends_with("\n"));
    }

    #[test]
    fn nonzero_exit_report_indents_stderr() {
        let err = BridgeError::NonZeroExit {
            code: 3,
            stderr: "fatal: config missing\n".to_string(),
        };
        let report = bridge_error_report(&err, false);
        assert!(report.contains("Backend exited with code 3"));
        assert!(report.contains("  fatal: config missing\n"));
    }

    #[test]
    fn color_wraps_only_the_glyph() {
        let report = failure_report(&response(false), true);
        assert!(report.starts_with("\x1b[1m\x1b[31m✗\x1b[0m "));
    }
}
