//! `sevlog` - synchronous leveled logging engine
//!
//! Callers emit tagged, leveled messages that are filtered by a threshold,
//! rendered with optional date, time, origin, tag and message fields, and
//! written to one or more sinks. A fatal-severity message terminates the
//! process once every sink has it.

#[macro_use]
mod macros;

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod level;
pub mod logger;
pub mod observability;
pub mod sink;

pub use config::{Config, ConfigStore};
pub use format::{FormatMask, Origin};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder, Outcome, global};
pub use sink::{Sink, SinkList};
