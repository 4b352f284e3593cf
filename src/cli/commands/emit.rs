//! `sevlog emit`
//!
//! Emits each message through a logger configured from the settings file
//! and flags. A fatal severity ends the process after the first message.

use crate::cli::args::EmitArgs;
use crate::cli::commands::build_logger;
use crate::error::SevlogError;
use crate::logger::Outcome;

/// Emit every message at the requested severity.
///
/// # Errors
///
/// Returns an error if the logger cannot be configured.
pub fn run(args: &EmitArgs) -> Result<(), SevlogError> {
    let logger = build_logger(args.config.as_deref(), &args.logger)?;

    let mut suppressed = 0_usize;
    for message in &args.messages {
        if logger.emit(crate::origin!(), args.severity, format_args!("{message}"))
            == Outcome::Suppressed
        {
            suppressed += 1;
        }
    }
    if suppressed > 0 {
        tracing::info!(
            suppressed,
            severity = %args.severity,
            threshold = %logger.threshold(),
            "messages below threshold"
        );
    }
    Ok(())
}
