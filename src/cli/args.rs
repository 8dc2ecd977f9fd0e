//! CLI argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// devion: development environment manager.
///
/// Thin front end over the devion backend: every verb becomes one backend
/// invocation over the JSON subprocess protocol.
#[derive(Debug, Parser)]
#[command(name = "devion", version, about = "Development environment manager")]
pub struct Cli {
    /// Show detailed logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Root directory of the installed devion backend package
    #[arg(long, global = true, value_name = "DIR")]
    pub backend_root: Option<PathBuf>,

    /// Explicit Python interpreter to launch the backend with
    /// (overrides venv resolution; also settable via DEVION_PYTHON)
    #[arg(long, global = true, value_name = "PATH")]
    pub python: Option<PathBuf>,

    /// Abort an invocation that runs longer than this many seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Backend verbs exposed by the CLI.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check development environment status
    Status {
        /// Include per-tool detail in the report
        #[arg(long)]
        detailed: bool,
    },

    /// Deep-scan the host environment and installed tools
    Scan,

    /// Analyze the current project structure
    Analyze {
        /// Directory to analyze instead of the current one
        #[arg(long, value_name = "DIR")]
        path: Option<String>,
    },

    /// Check and auto-fix common environment issues
    Fix {
        /// Apply fixes without prompting
        #[arg(long)]
        force: bool,
    },

    /// Package the project for deployment
    Deploy {
        /// Deployment target name
        #[arg(long, value_name = "TARGET")]
        target: Option<String>,
    },

    /// Read or update the global devion configuration
    Config {
        /// Configuration key to read or set
        key: Option<String>,
        /// New value; omit to read the key
        value: Option<String>,
    },

    /// Initialize a devion project in the current directory
    Init {
        /// Project name; defaults to the directory name
        name: Option<String>,
    },

    /// Activate a target configuration or environment mode
    Use {
        /// Target to activate; the backend defaults to "default"
        target: Option<String>,
    },
}
