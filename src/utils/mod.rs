use std::sync::Once;

use crate::config::Config;

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber with the default directive.
pub fn init_tracing() {
    init_tracing_with(&Config::default_log_directive());
}

/// Installs the global tracing subscriber once.
///
/// `RUST_LOG` takes precedence over `directive` when set.
pub fn init_tracing_with(directive: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(directive))
            .unwrap_or_else(|_| EnvFilter::new(Config::default_log_directive()));

        if fmt().with_env_filter(filter).try_init().is_ok() {
            tracing::info!("Farm Ledger Core tracing initialized.");
        }
    });
}

/// Installs tracing using the directive stored in `config`.
pub fn init_tracing_from(config: &Config) {
    init_tracing_with(&config.log_directive);
}
