//! Log output for the CLI.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug output for the
/// roster crates and warnings for everything else.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "warn,roster=debug,roster_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
