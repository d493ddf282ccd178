//! Tracing subscriber setup for the binary

use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber for the library's tracing events.
///
/// `RUST_LOG` wins when set. Otherwise `--verbose` enables debug events from
/// this crate and everything else stays silent, since warnings already reach
/// the user through [`super::Output`]. Safe to call more than once.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("catalog_cli=debug")
        } else {
            EnvFilter::new("off")
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
