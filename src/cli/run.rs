//! CLI entry point and dispatch.
//!
//! `run()` handles ALL output including errors; `main.rs` only maps the
//! returned [`ExitCode`] to `std::process::exit`.

use clap::Parser;

use super::args::Cli;
use super::commands;
use crate::bridge::Bridge;
use crate::config::{CliOverrides, Config};
use crate::exit_codes::ExitCode;
use crate::{logging, render};

/// Parse arguments, run one backend invocation, render the result.
///
/// Returns `Ok(())` on exit code 0 and `Err(code)` otherwise. One CLI call
/// is exactly one subprocess lifecycle; the bridge call runs to completion
/// before the process exits.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();

    let config = Config::discover(&CliOverrides {
        backend_root: cli.backend_root.clone(),
        python: cli.python.clone(),
        timeout_seconds: cli.timeout,
        verbose: cli.verbose,
    });

    logging::init_tracing(config.verbose);

    let mut bridge = Bridge::new(&config.backend_root);
    if let Some(interpreter) = &config.interpreter {
        bridge = bridge.with_interpreter(interpreter);
    }
    if let Some(timeout) = config.timeout {
        bridge = bridge.with_timeout(timeout);
    }

    let invocation = commands::invocation_for(&cli.command);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("✗ Failed to create async runtime: {e}");
            return Err(ExitCode::FAILURE);
        }
    };

    let result = rt.block_on(bridge.invoke(&invocation));
    let code = render::render(&result);

    if code == ExitCode::SUCCESS {
        Ok(())
    } else {
        Err(code)
    }
}
