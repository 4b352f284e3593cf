//! `sevlog demo`
//!
//! Threshold DEBUG with time, tag and message fields: a debug line is
//! written, a trace line is filtered, and the fatal line ends the process
//! so the last debug line never appears.

use std::sync::Arc;

use crate::cli::args::DemoArgs;
use crate::config::SinkSpec;
use crate::error::SevlogError;
use crate::format::FormatMask;
use crate::level::Level;
use crate::logger::Logger;

/// Run the walkthrough.
///
/// # Errors
///
/// Returns an error if a sink specification is invalid or cannot be opened.
pub fn run(args: &DemoArgs) -> Result<(), SevlogError> {
    let mut builder = Logger::builder()
        .threshold(Level::DEBUG)
        .format(FormatMask::TIME | FormatMask::TAG | FormatMask::MESSAGE);
    for spec in &args.sinks {
        builder = builder.sink(Arc::new(spec.parse::<SinkSpec>()?.open()?));
    }
    let logger = builder.build();

    log_debug!(logger, "Starting.");
    log_trace!(logger, "Passed here!");
    log_fatal!(logger, "Cannot start server, aborting.");
    log_debug!(logger, "This should not show.");

    Ok(())
}
