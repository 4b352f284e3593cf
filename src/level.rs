//! Severity levels.
//!
//! A [`Level`] is an ordered severity used both as a call severity and as
//! the logger's threshold. The eight named levels are associated constants;
//! any other integer is still a valid `Level` and simply takes part in
//! comparisons, rendering with the placeholder tag.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Tag rendered for levels that have no display tag of their own.
pub const UNKNOWN_TAG: &str = "?????";

/// Ordered message severity.
///
/// `ALL < TRACE < DEBUG < INFO < WARN < ERROR < FATAL < OFF`. `ALL` and
/// `OFF` are threshold sentinels: a threshold of `ALL` lets everything
/// through, a threshold of `OFF` suppresses every named call severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(i32);

impl Level {
    /// Threshold sentinel that admits every severity.
    pub const ALL: Self = Self(0);
    /// Very fine-grained tracing output.
    pub const TRACE: Self = Self(1);
    /// Debugging detail.
    pub const DEBUG: Self = Self(2);
    /// Coarse-grained progress information.
    pub const INFO: Self = Self(3);
    /// Potentially harmful situations.
    pub const WARN: Self = Self(4);
    /// Errors the program can survive.
    pub const ERROR: Self = Self(5);
    /// Unrecoverable errors. Emitting at this level terminates the process.
    pub const FATAL: Self = Self(6);
    /// Threshold sentinel that suppresses every named severity.
    pub const OFF: Self = Self(7);

    /// Every named level in ascending order.
    pub const NAMED: [Self; 8] = [
        Self::ALL,
        Self::TRACE,
        Self::DEBUG,
        Self::INFO,
        Self::WARN,
        Self::ERROR,
        Self::FATAL,
        Self::OFF,
    ];

    /// Wraps a raw value. Out-of-range values are kept as-is.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Returns the fixed-width (5 column) display tag.
    ///
    /// Sentinels and unknown values map to [`UNKNOWN_TAG`].
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self.0 {
            1 => "TRACE",
            2 => "DEBUG",
            3 => "INFO ",
            4 => "WARN ",
            5 => "ERROR",
            6 => "FATAL",
            _ => UNKNOWN_TAG,
        }
    }

    /// Returns the upper-case level name, or `None` for unnamed values.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("ALL"),
            1 => Some("TRACE"),
            2 => Some("DEBUG"),
            3 => Some("INFO"),
            4 => Some("WARN"),
            5 => Some("ERROR"),
            6 => Some("FATAL"),
            7 => Some("OFF"),
            _ => None,
        }
    }

    /// Returns whether this is the terminating severity.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        self.0 == Self::FATAL.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::ERROR
    }
}

impl From<i32> for Level {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "LEVEL({})", self.0),
        }
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const EXPECTED: &str =
            "one of all, trace, debug, info, warn, error, fatal, off, or an integer";

        let trimmed = s.trim();
        let level = match trimmed.to_ascii_lowercase().as_str() {
            "all" => Self::ALL,
            "trace" => Self::TRACE,
            "debug" => Self::DEBUG,
            "info" => Self::INFO,
            "warn" | "warning" => Self::WARN,
            "error" => Self::ERROR,
            "fatal" => Self::FATAL,
            "off" => Self::OFF,
            other => match other.parse::<i32>() {
                Ok(raw) => Self(raw),
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        field: "level".to_owned(),
                        value: trimmed.to_owned(),
                        expected: EXPECTED.to_owned(),
                    });
                }
            },
        };
        Ok(level)
    }
}
