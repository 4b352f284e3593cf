//! Call-site macros.
//!
//! Each macro captures `file!()` and `line!()`, checks the logger's
//! threshold before evaluating its format arguments, and returns the
//! emission [`Outcome`](crate::Outcome).

/// Expands to the [`Origin`](crate::Origin) of the invocation.
#[macro_export]
macro_rules! origin {
    () => {
        $crate::Origin::new(file!(), line!())
    };
}

/// Emits at an explicit level.
///
/// ```
/// use std::sync::Arc;
/// use sevlog::{FormatMask, Level, Logger, Outcome, Sink};
///
/// let logger = Logger::builder()
///     .threshold(Level::INFO)
///     .format(FormatMask::TAG | FormatMask::MESSAGE)
///     .sink(Arc::new(Sink::noop()))
///     .build();
///
/// let port = 8080;
/// let written = sevlog::log_at!(logger, Level::ERROR, "Port {port} already in use.");
/// assert_eq!(written, Outcome::Written);
///
/// let never = || -> u32 { unreachable!() };
/// let skipped = sevlog::log_debug!(logger, "value {}", never());
/// assert_eq!(skipped, Outcome::Suppressed);
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let __logger = &$logger;
        let __level: $crate::Level = $level;
        if __logger.enabled(__level) {
            __logger.emit($crate::origin!(), __level, ::core::format_args!($($arg)+))
        } else {
            $crate::Outcome::Suppressed
        }
    }};
}

#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::TRACE, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::DEBUG, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::INFO, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::WARN, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::ERROR, $($arg)+)
    };
}

/// Emits at `FATAL`. With the default hook this does not return.
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::FATAL, $($arg)+)
    };
}
