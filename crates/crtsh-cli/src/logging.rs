//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

/// Crates whose debug output `--verbose` turns on
const CRATES: &[&str] = &["crtsh", "crtsh_core", "crtsh_client", "crtsh_recon", "crtsh_cli"];

/// Filter directive used when `RUST_LOG` is unset
pub fn default_directive(verbose: bool) -> String {
    if verbose {
        std::iter::once("warn".to_string())
            .chain(CRATES.iter().map(|c| format!("{c}=debug")))
            .collect::<Vec<_>>()
            .join(",")
    } else {
        "warn".to_string()
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second install (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
