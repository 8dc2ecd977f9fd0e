//! Stub devion backend for testing.
//!
//! Speaks the same argv/JSON protocol as the real Python backend
//! (`<interpreter> -m devion.main <command> <options-json>`) so the bridge
//! and the CLI can be exercised without a Python installation. Scenarios are
//! selected either by command name (bridge-level tests build invocations
//! directly) or by the `DEVION_STUB_SCENARIO` environment variable
//! (end-to-end CLI tests, where the argv is fixed by the real verbs).
//!
//! | Command / scenario | Behavior |
//! |--------------------|----------|
//! | `echo` (default)   | exit 0, success response echoing command+options |
//! | `fail` / `failure` | exit 0, well-formed `success: false` response |
//! | `exit` / `exit-N`  | write stderr, exit non-zero, junk on stdout |
//! | `garbage`          | exit 0, stdout is `not json` |
//! | `multiline`        | exit 0, diagnostic line before the JSON payload |
//! | `flood`            | >64 KiB to stderr before stdout, then success |
//! | `sleep`            | sleep before answering (timeout tests) |

use anyhow::{Result, bail};
use serde_json::{Value, json};
use std::io::Write;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // The interpreter contract: -m devion.main <command> <options-json>.
    if args.len() < 4 || args[0] != "-m" || args[1] != "devion.main" {
        write_response(&json!({
            "success": false,
            "data": null,
            "message": "CLI Bridge Error: Command and arguments are missing.",
            "errors": ["Expected format: python3 -m devion.main <command> <args_json>"],
        }))?;
        return Ok(());
    }
    let command = args[2].as_str();
    let options: Value = match serde_json::from_str(&args[3]) {
        Ok(options) => options,
        Err(_) => {
            write_response(&json!({
                "success": false,
                "data": null,
                "message": "Input Error: Invalid JSON arguments received.",
                "errors": ["The argument string passed to the backend could not be parsed."],
            }))?;
            return Ok(());
        }
    };

    let scenario = std::env::var("DEVION_STUB_SCENARIO").unwrap_or_default();
    match scenario.as_str() {
        "" => run_command(command, &options),
        "failure" => fail_scenario(command, &options),
        "garbage" => garbage_scenario(),
        "multiline" => multiline_scenario(),
        "flood" => flood_scenario(&options),
        "sleep" => sleep_scenario(command, &options),
        other => {
            if let Some(code) = other.strip_prefix("exit-") {
                exit_scenario(code.parse().unwrap_or(2), "backend failure");
            }
            bail!("unknown DEVION_STUB_SCENARIO '{other}'");
        }
    }
}

fn run_command(command: &str, options: &Value) -> Result<()> {
    match command {
        "fail" => fail_scenario(command, options),
        "exit" => {
            let code = options["code"].as_i64().unwrap_or(2) as i32;
            let stderr = options["stderr"].as_str().unwrap_or("backend failure");
            exit_scenario(code, stderr)
        }
        "garbage" => garbage_scenario(),
        "multiline" => multiline_scenario(),
        "flood" => flood_scenario(options),
        "sleep" => sleep_scenario(command, options),
        // `echo` and every real verb: act like a healthy backend and echo
        // the request back through the protocol shape.
        _ => echo_scenario(command, options),
    }
}

fn echo_scenario(command: &str, options: &Value) -> Result<()> {
    write_response(&json!({
        "success": true,
        "data": { "command": command, "options": options },
        "message": null,
        "errors": [],
    }))
}

fn fail_scenario(command: &str, options: &Value) -> Result<()> {
    let errors = options
        .get("errors")
        .cloned()
        .unwrap_or_else(|| json!(["step 1 failed", "step 2 skipped"]));
    write_response(&json!({
        "success": false,
        "data": null,
        "message": format!("Execution error in module '{command}'."),
        "errors": errors,
    }))
}

fn exit_scenario(code: i32, stderr: &str) -> ! {
    eprint!("{stderr}");
    // Stdout noise before dying; the bridge must discard it.
    print!("partial output that must be ignored");
    let _ = std::io::stdout().flush();
    let _ = std::io::stderr().flush();
    std::process::exit(code);
}

fn garbage_scenario() -> Result<()> {
    print!("not json");
    std::io::stdout().flush()?;
    Ok(())
}

fn multiline_scenario() -> Result<()> {
    println!("warming up backend...");
    write_response(&json!({
        "success": true,
        "data": null,
        "message": null,
        "errors": [],
    }))
}

fn flood_scenario(options: &Value) -> Result<()> {
    // Enough to overrun any OS pipe buffer before stdout is touched.
    let bytes = options["bytes"].as_u64().unwrap_or(256 * 1024) as usize;
    let mut stderr = std::io::stderr().lock();
    stderr.write_all(&vec![b'x'; bytes])?;
    stderr.flush()?;
    write_response(&json!({
        "success": true,
        "data": { "flooded_bytes": bytes },
        "message": null,
        "errors": [],
    }))
}

fn sleep_scenario(command: &str, options: &Value) -> Result<()> {
    let ms = options["ms"].as_u64().unwrap_or(5_000);
    thread::sleep(Duration::from_millis(ms));
    echo_scenario(command, options)
}

/// Exactly one JSON document on stdout, no trailing newline, like the real
/// backend's `sys.stdout.write(json.dumps(response))`.
fn write_response(response: &Value) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{response}")?;
    stdout.flush()?;
    Ok(())
}
