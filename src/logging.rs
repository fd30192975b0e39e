//! Logging setup for the `ara` binary.
//!
//! The library only emits through the `log` facade; embedders pick their own
//! logger. The binary installs `env_logger`, filtered by `ARA_LOG`.

use std::sync::Once;

use env_logger::{Builder, Env};

/// Environment variable holding the log filter, e.g. `ARA_LOG=ara_finder=debug`.
pub const LOG_ENV: &str = "ARA_LOG";

const DEFAULT_FILTER: &str = "warn";

static INIT: Once = Once::new();

/// Install the process-wide logger. Later calls are no-ops, as is the first
/// call when another logger is already registered.
pub fn initialize() {
    INIT.call_once(|| {
        let env = Env::new().filter_or(LOG_ENV, DEFAULT_FILTER);
        if Builder::from_env(env)
            .format_timestamp(None)
            .try_init()
            .is_err()
        {
            log::debug!("logger already installed");
        }
    });
}
