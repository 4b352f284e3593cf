//! Logger configuration.
//!
//! [`store`] holds the live, lock-guarded configuration a [`Logger`]
//! consults on every emission. [`loader`] turns a YAML settings file or
//! command-line strings into values for that store; the engine itself
//! never reads files.
//!
//! [`Logger`]: crate::logger::Logger

pub mod loader;
pub mod store;

pub use loader::{Settings, SinkSpec};
pub use store::{Config, ConfigStore, Route};
