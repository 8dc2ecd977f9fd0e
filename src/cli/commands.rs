//! Verb → backend invocation mapping.
//!
//! Each CLI verb produces one immutable [`Invocation`]. Only options the
//! user actually supplied are forwarded; the backend applies its own
//! defaults for the rest.

use super::args::Commands;
use crate::protocol::Invocation;
use serde_json::{Map, Value, json};

/// Build the backend invocation for a parsed verb.
#[must_use]
pub fn invocation_for(command: &Commands) -> Invocation {
    let mut options = Map::new();
    let name = match command {
        Commands::Status { detailed } => {
            // The backend's status module calls this option `verbose`.
            options.insert("verbose".to_string(), json!(detailed));
            "status"
        }
        Commands::Scan => "scan",
        Commands::Analyze { path } => {
            if let Some(path) = path {
                options.insert("path".to_string(), json!(path));
            }
            "analyze"
        }
        Commands::Fix { force } => {
            options.insert("force".to_string(), json!(force));
            "fix"
        }
        Commands::Deploy { target } => {
            if let Some(target) = target {
                options.insert("target".to_string(), json!(target));
            }
            "deploy"
        }
        Commands::Config { key, value } => {
            if let Some(key) = key {
                options.insert("key".to_string(), json!(key));
            }
            if let Some(value) = value {
                options.insert("value".to_string(), json!(value));
            }
            "config"
        }
        Commands::Init { name } => {
            if let Some(name) = name {
                options.insert("name".to_string(), json!(name));
            }
            "init"
        }
        Commands::Use { target } => {
            if let Some(target) = target {
                options.insert("target".to_string(), json!(target));
            }
            "use"
        }
    };
    Invocation::new(name, options)
}
