#![deny(missing_docs)]
//! Logging front end for the similar-page crates.
//!
//! Every crate logs through the `page_*` macros so the facade stays in one
//! place. Tests call [`initialize_for_tests`] once to see the output.

use log::LevelFilter;

#[doc(hidden)]
pub use log as __log;

/// Environment variable read by [`initialize_for_tests`] to pick a level.
pub const TEST_LEVEL_VAR: &str = "SIMILAR_TEST_LOG";

#[doc(hidden)]
#[macro_export]
macro_rules! __page_log {
    ($level:ident, $($arg:tt)*) => {{
        $crate::__log::log!($crate::__log::Level::$level, $($arg)*);
    }};
}

/// Logs at trace level.
#[macro_export]
macro_rules! page_trace {
    ($($arg:tt)*) => { $crate::__page_log!(Trace, $($arg)*) };
}

/// Logs at debug level.
#[macro_export]
macro_rules! page_debug {
    ($($arg:tt)*) => { $crate::__page_log!(Debug, $($arg)*) };
}

/// Logs at info level.
#[macro_export]
macro_rules! page_info {
    ($($arg:tt)*) => { $crate::__page_log!(Info, $($arg)*) };
}

/// Logs at warn level.
#[macro_export]
macro_rules! page_warn {
    ($($arg:tt)*) => { $crate::__page_log!(Warn, $($arg)*) };
}

/// Logs at error level.
#[macro_export]
macro_rules! page_error {
    ($($arg:tt)*) => { $crate::__page_log!(Error, $($arg)*) };
}

/// Level for test output: `SIMILAR_TEST_LOG` when it names a level, else
/// debug in debug builds and info otherwise.
pub fn test_level(requested: Option<&str>) -> LevelFilter {
    requested
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
}

/// Installs a terminal logger for tests. A second call is a no-op.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let requested = std::env::var(TEST_LEVEL_VAR).ok();
    let _ = TermLogger::init(
        test_level(requested.as_deref()),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}
