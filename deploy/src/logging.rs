//! Diagnostic tracing for `deploy`.
//!
//! stdout carries what the operator reads during a release build: cleanup
//! lines, the success banner, final instructions and the Enter prompt. The
//! packaging tool writes its own progress to the same terminal. Diagnostics
//! from this crate (spawn failures, a missing executable after a zero exit,
//! stage transitions at `debug`) go to stderr through `tracing`, so a CI log
//! can separate them from the console text.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to `warn`, which keeps a
/// normal run quiet apart from packaging errors and warnings.
///
/// ```bash
/// RUST_LOG=deploy=debug deploy --no-pause
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
