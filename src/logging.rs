//! Structured logging setup.

use tracing_subscriber::{
    EnvFilter,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` enables debug-level
/// events for this crate. Output stays compact and goes to stderr so it
/// never mixes with the rendered report on stdout.
pub fn init_tracing(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("devion=debug,info")
            } else {
                EnvFilter::try_new("devion=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init rather than init: integration tests may install their own
    // subscriber first.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .compact(),
        )
        .try_init();
}
