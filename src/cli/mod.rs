//! Command-line interface for devion.
//!
//! ## Module Structure
//!
//! - `args`: CLI argument definitions (clap)
//! - `commands`: verb → backend `Invocation` mapping
//! - `run`: entry point: parse, configure, invoke the bridge, render

pub mod args;
pub mod commands;
mod run;

pub use args::{Cli, Commands};
pub use run::run;
