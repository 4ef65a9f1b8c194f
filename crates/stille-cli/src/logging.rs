//! Logging setup.
//!
//! Logs go to stderr so they never land in the countdown line on stdout.
//! `STILLE_LOG` takes an `EnvFilter` directive (default `warn`); `--verbose`
//! turns on debug output for the stille crates.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_DIRECTIVE: &str = "warn,stille_cli=debug,stille_core=debug";

pub fn init(verbose: bool) {
    let directive = if verbose {
        VERBOSE_DIRECTIVE.to_string()
    } else {
        std::env::var("STILLE_LOG").unwrap_or_else(|_| "warn".to_string())
    };

    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid STILLE_LOG directive '{directive}': {e}");
        EnvFilter::new("warn")
    });

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .init();

    tracing::debug!(directive = %directive, "logging initialized");
}
