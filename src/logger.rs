//! The logging engine.
//!
//! [`Logger::emit`] runs one synchronous transaction per call:
//!
//! 1. Gate on the threshold and capture the format mask and sink list under
//!    a single read lock; suppressed calls stop here without side effects
//! 2. Substitute the default sink (stderr) when none are configured,
//!    without writing that back into the configuration
//! 3. Capture local wall-clock time once
//! 4. Render the line once
//! 5. Write it to every sink in order, flushing each, or closing each when
//!    the severity is fatal
//! 6. For fatal severity, run the fatal hook only after every sink has
//!    been written and closed
//!
//! No configuration lock is held while sinks do I/O.

use std::fmt;
use std::sync::{Arc, OnceLock};

use chrono::Local;

use crate::config::store::{Config, ConfigStore};
use crate::error::ExitCode;
use crate::format::{self, FormatMask, Origin, Record};
use crate::level::Level;
use crate::sink::{Disposition, Sink, SinkList};

/// Called after a fatal-severity line reached every sink.
pub type FatalHook = Arc<dyn Fn() + Send + Sync>;

/// What an emission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Below threshold; nothing was touched.
    Suppressed,
    /// The line was handed to every sink.
    Written,
    /// The line was handed to every sink, the sinks were closed and the
    /// fatal hook returned (the default hook never returns).
    Fatal,
}

/// A leveled logger with its own configuration.
///
/// Loggers are independent of each other; [`global`] provides a shared
/// process-wide instance for callers that want one.
pub struct Logger {
    config: ConfigStore,
    default_sinks: OnceLock<SinkList>,
    on_fatal: FatalHook,
}

// The fatal hook is not Debug.
impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Creates a logger with threshold `ERROR`, every format field and no
    /// sinks configured (stderr is used).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a logger with the given initial configuration and the
    /// default fatal hook.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            config: ConfigStore::new(config),
            default_sinks: OnceLock::new(),
            on_fatal: Arc::new(exit_process),
        }
    }

    /// Starts a [`LoggerBuilder`].
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// The live configuration.
    #[must_use]
    pub const fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Minimum level that is written.
    #[must_use]
    pub fn threshold(&self) -> Level {
        self.config.threshold()
    }

    /// Replaces the threshold. Any `i32` value is stored as given.
    pub fn set_threshold(&self, threshold: Level) {
        self.config.set_threshold(threshold);
    }

    /// Fields included in each line.
    #[must_use]
    pub fn format(&self) -> FormatMask {
        self.config.format()
    }

    /// Replaces the format mask, unknown bits included.
    pub fn set_format(&self, format: FormatMask) {
        self.config.set_format(format);
    }

    /// Snapshot of the configured sinks, or `None` while stderr is used.
    #[must_use]
    pub fn sinks(&self) -> Option<SinkList> {
        self.config.sinks()
    }

    /// Replaces the sink list.
    ///
    /// An empty list is kept as is and suppresses output entirely; use
    /// [`Logger::clear_sinks`] to go back to stderr.
    pub fn set_sinks<I>(&self, sinks: I)
    where
        I: IntoIterator<Item = Arc<Sink>>,
    {
        self.config.set_sinks(sinks);
    }

    /// Forgets the configured sinks so stderr is used again.
    pub fn clear_sinks(&self) {
        self.config.clear_sinks();
    }

    /// Returns whether a call at `level` would currently be written.
    ///
    /// The call-site macros check this before building their arguments.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.config.threshold()
    }

    /// Emits one line.
    ///
    /// Sink failures are recorded on the failing sink and never stop the
    /// remaining sinks. With the default hook a fatal severity exits the
    /// process with [`ExitCode::FATAL`] once every sink is closed.
    pub fn emit(&self, origin: Origin, level: Level, message: fmt::Arguments<'_>) -> Outcome {
        let Some(route) = self.config.route(level) else {
            return Outcome::Suppressed;
        };
        let sinks = route.sinks.unwrap_or_else(|| self.default_sinks());

        let record = Record {
            timestamp: Local::now().naive_local(),
            origin,
            level,
            message,
        };
        let line = format::render(route.format, &record);

        let fatal = level.is_fatal();
        let disposition = if fatal {
            Disposition::Close
        } else {
            Disposition::Flush
        };
        for sink in sinks.iter() {
            sink.write_line(line.as_bytes(), disposition);
        }

        if fatal {
            tracing::debug!(sinks = sinks.len(), "fatal message written, terminating");
            (self.on_fatal)();
            return Outcome::Fatal;
        }
        Outcome::Written
    }

    fn default_sinks(&self) -> SinkList {
        Arc::clone(
            self.default_sinks
                .get_or_init(|| SinkList::from([Arc::new(Sink::stderr())])),
        )
    }
}

fn exit_process() {
    std::process::exit(ExitCode::FATAL);
}

/// Returns the process-wide logger, creating it with defaults on first use.
pub fn global() -> &'static Logger {
    static GLOBAL: OnceLock<Logger> = OnceLock::new();
    GLOBAL.get_or_init(Logger::new)
}

// ============================================================================
// Builder
// ============================================================================

/// Builds a [`Logger`] with a non-default configuration or fatal hook.
#[derive(Default)]
pub struct LoggerBuilder {
    threshold: Option<Level>,
    format: Option<FormatMask>,
    sinks: Option<Vec<Arc<Sink>>>,
    on_fatal: Option<FatalHook>,
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("threshold", &self.threshold)
            .field("format", &self.format)
            .field("sinks", &self.sinks)
            .field("custom_on_fatal", &self.on_fatal.is_some())
            .finish()
    }
}

impl LoggerBuilder {
    /// Sets the initial threshold. Defaults to [`Level::ERROR`].
    #[must_use]
    pub const fn threshold(mut self, threshold: Level) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Sets the initial format mask. Defaults to [`FormatMask::ALL`].
    #[must_use]
    pub const fn format(mut self, format: FormatMask) -> Self {
        self.format = Some(format);
        self
    }

    /// Appends one sink.
    #[must_use]
    pub fn sink(mut self, sink: Arc<Sink>) -> Self {
        self.sinks.get_or_insert_with(Vec::new).push(sink);
        self
    }

    /// Replaces the sink list.
    #[must_use]
    pub fn sinks<I>(mut self, sinks: I) -> Self
    where
        I: IntoIterator<Item = Arc<Sink>>,
    {
        self.sinks = Some(sinks.into_iter().collect());
        self
    }

    /// Replaces what happens after a fatal line is written.
    ///
    /// If the hook returns, [`Logger::emit`] returns [`Outcome::Fatal`].
    #[must_use]
    pub fn on_fatal<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_fatal = Some(Arc::new(hook));
        self
    }

    /// Finishes the logger. Unset options keep the [`Logger::new`] defaults.
    #[must_use]
    pub fn build(self) -> Logger {
        let defaults = Config::default();
        let config = Config {
            threshold: self.threshold.unwrap_or(defaults.threshold),
            format: self.format.unwrap_or(defaults.format),
            sinks: self.sinks.map(SinkList::from),
        };
        let mut logger = Logger::with_config(config);
        if let Some(hook) = self.on_fatal {
            logger.on_fatal = hook;
        }
        logger
    }
}
