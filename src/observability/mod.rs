//! Diagnostics for `sevlog` itself.
//!
//! The engine reports its own trouble (failed sink writes, settings
//! loading) through `tracing`; the binary installs the subscriber.

pub mod logging;

pub use logging::{DiagnosticsFormat, init_logging};
