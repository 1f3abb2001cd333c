#![deny(missing_docs)]
//! Logging for LedgerMind.
//!
//! The engine and app crates log through the `ledger_*` macros below, never
//! through `log` directly; the core state machine stays silent.
//! The binary installs a file logger (`./ledgermind.log`) because the chat
//! screen owns the terminal. This is also where the cause of a failed
//! question ends up: the transcript only ever shows the fallback answer.
//!
//! Tests call [`initialize_for_tests`] to see the same lines on stderr.

#[doc(hidden)]
pub use log;

/// Wire-level detail, off by default.
#[macro_export]
macro_rules! ledger_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!($($arg)*);
    }};
}

/// Session lifecycle: configured service, questions asked, answers received.
#[macro_export]
macro_rules! ledger_info {
    ($($arg:tt)*) => {{
        $crate::log::info!($($arg)*);
    }};
}

/// Engine bookkeeping, e.g. an ask command picked up by the runtime thread.
#[macro_export]
macro_rules! ledger_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!($($arg)*);
    }};
}

/// A question resolved to the fallback answer; carries the operator-facing cause.
#[macro_export]
macro_rules! ledger_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!($($arg)*);
    }};
}

/// The engine itself misbehaved (runtime gone, client task aborted).
#[macro_export]
macro_rules! ledger_error {
    ($($arg:tt)*) => {{
        $crate::log::error!($($arg)*);
    }};
}

/// Routes log lines to stderr for test runs.
///
/// Every test binary may call this from several tests; only the first call
/// installs the logger.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
