//! Test logging initialization

use simplelog::{Config, LevelFilter, TestLogger};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the test logger once per test binary.
///
/// The level comes from `LOG_LEVEL` and defaults to "info".
pub fn init_test_logging() {
    INIT.call_once(|| {
        let level = std::env::var("LOG_LEVEL")
            .map(|level| meta_ledger::logging::parse_level(&level))
            .unwrap_or(LevelFilter::Info);
        let _ = TestLogger::init(level, Config::default());
    });
}
