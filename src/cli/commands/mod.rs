//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod demo;
pub mod emit;
pub mod version;

use std::path::Path;

use crate::cli::args::{Cli, Commands, LoggerArgs};
use crate::config::Settings;
use crate::error::SevlogError;
use crate::logger::Logger;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), SevlogError> {
    match cli.command {
        Commands::Emit(args) => emit::run(&args),
        Commands::Demo(args) => demo::run(&args),
        Commands::Version(args) => version::run(&args),
    }
}

/// Builds a logger from an optional settings file overlaid with flags.
///
/// # Errors
///
/// Returns an error if the settings file cannot be loaded, a value does
/// not parse, or a file sink cannot be opened.
pub fn build_logger(
    settings_path: Option<&Path>,
    flags: &LoggerArgs,
) -> Result<Logger, SevlogError> {
    let file = settings_path.map(Settings::load).transpose()?.unwrap_or_default();
    let config = file.merge(flags.to_settings()).resolve()?;
    tracing::info!(
        threshold = %config.threshold,
        format = config.format.bits(),
        sinks = config.sinks.as_ref().map_or(0, |s| s.len()),
        "logger configured"
    );
    Ok(Logger::with_config(config))
}
