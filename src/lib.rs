#![doc(test(attr(deny(warnings))))]

//! Farm Ledger Core validates farm operating records (crop fields, cost
//! types, seasons, and ledger entries) and derives filtered listings and
//! expense/profit reports from validated snapshots.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod utils;

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    utils::init_tracing();
}

/// Initializes global tracing with the directive stored in `config`.
pub fn init_with_config(config: &config::Config) {
    utils::init_tracing_from(config);
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }

    #[test]
    fn init_with_config_does_not_panic() {
        let mut config = crate::config::Config::default();
        config.log_directive = "farm_ledger_core=debug".into();
        super::init_with_config(&config);
    }
}
