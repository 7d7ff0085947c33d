//! Crate-internal logging macros.
//!
//! - `tracing` feature: emit `tracing` events (wins when both are enabled)
//! - `logging` feature: emit `log` records
//! - neither: arguments are still type-checked, nothing is emitted

macro_rules! log_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!($($arg)*);
        }
        #[cfg(all(not(feature = "tracing"), feature = "logging"))]
        {
            log::debug!($($arg)*);
        }
        #[cfg(not(any(feature = "tracing", feature = "logging")))]
        {
            let _ = format_args!($($arg)*);
        }
    };
}

macro_rules! log_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            tracing::warn!($($arg)*);
        }
        #[cfg(all(not(feature = "tracing"), feature = "logging"))]
        {
            log::warn!($($arg)*);
        }
        #[cfg(not(any(feature = "tracing", feature = "logging")))]
        {
            let _ = format_args!($($arg)*);
        }
    };
}

pub(crate) use log_debug;
pub(crate) use log_warn;
