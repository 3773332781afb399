//! Logging setup, built on `log` and `env_logger`.
//!
//! Log records go to stderr so they never mix with generated CMake on
//! stdout.  Levels are used as follows:
//!
//! - `warn!` - a checked setting differs from what the translator assumes
//! - `info!` - one line per solution read and per project translated
//! - `debug!` - solution entries and the values picked out of each project
//!
//! `RUST_LOG` overrides the level chosen on the command line:
//!
//! ```bash
//! RUST_LOG=debug vcxproj-rs All.sln
//! RUST_LOG=vcxproj_rs::solution=debug vcxproj-rs All.sln
//! ```

use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Default filter for a `-v` count: none → warn, `-v` → info, `-vv` → debug,
/// more → trace.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize logging at `level`, unless `RUST_LOG` is set.
///
/// Only the first call has any effect.
pub fn init_with_level(level: LevelFilter) {
    INIT.call_once(|| {
        Builder::from_env(Env::default().default_filter_or(level.as_str()))
            .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
            .init();
    });
}

/// Initialize logging for tests; safe to call from every test.
pub fn init_test() {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .is_test(true)
        .try_init();
}
