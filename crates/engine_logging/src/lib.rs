#![deny(missing_docs)]
//! Logging macros shared by the compressor crates.
//!
//! Raw encoder output is logged at trace level under its own target so it can
//! be filtered separately from pipeline events.

/// Log target used for lines forwarded verbatim from the transcoding engine.
pub const ENGINE_OUTPUT_TARGET: &str = "engine_output";

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Logs one line of raw encoder output under [`ENGINE_OUTPUT_TARGET`].
#[macro_export]
macro_rules! engine_output {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::ENGINE_OUTPUT_TARGET, $($arg)*);
    }};
}

/// Initializes a terminal logger for tests, with raw encoder output muted.
///
/// No-ops if another logger has already been installed.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, TermLogger, TerminalMode};

    let config = ConfigBuilder::new()
        .add_filter_ignore_str(ENGINE_OUTPUT_TARGET)
        .build();
    let _ = CombinedLogger::init(vec![TermLogger::new(
        log::LevelFilter::Trace,
        config,
        TerminalMode::Stderr,
        ColorChoice::Never,
    )]);
}
