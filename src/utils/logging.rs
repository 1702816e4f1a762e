//! Conditional logging macros.
//!
//! `log_info!`, `log_warn!` and `log_error!` check a module-level `ENABLE_LOGS`
//! flag, so a noisy module can be silenced at compile time:
//!
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//! use crate::{log_error, log_info, log_warn};
//!
//! log_info!("model worker started");
//! ```
//!
//! `log_verbose!` takes the flag as its first argument instead. The stats
//! dispatcher uses it for the human-readable record dump, which is switched on
//! at runtime from settings.

/// Info logging gated by the calling module's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Warn logging gated by the calling module's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Error logging gated by the calling module's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}

/// Debug logging on the `StatsLog` target, gated by a runtime flag.
///
/// ```ignore
/// log_verbose!(self.verbose, "writeSnapshot({}): {:?}", id, record);
/// ```
#[macro_export]
macro_rules! log_verbose {
    ($enabled:expr, $($arg:tt)*) => {
        if $enabled {
            log::debug!(target: $crate::VERBOSE_LOG_TARGET, $($arg)*);
        }
    };
}
