use std::sync::OnceLock;

use tracing_subscriber::{fmt, EnvFilter};

static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// Install the stderr subscriber once. `RUST_LOG` applies unless `verbose`
/// forces debug output; the fallback level is `warn`.
pub fn init_logger(verbose: bool) {
    LOGGER_INIT.get_or_init(|| {
        let filter = if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        let installed = fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok();

        tracing::debug!(installed, "logger initialized");
    });
}
