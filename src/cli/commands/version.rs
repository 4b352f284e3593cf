//! `sevlog version`
//!
//! Prints the package version together with the level names and the
//! configuration a fresh logger starts from.

use serde::Serialize;

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::config::Config;
use crate::error::SevlogError;
use crate::level::Level;

/// What `sevlog version` reports.
#[derive(Debug, Serialize)]
pub struct VersionInfo {
    /// Package name.
    pub name: &'static str,
    /// Package version.
    pub version: &'static str,
    /// Level names from least to most severe.
    pub levels: Vec<&'static str>,
    /// Threshold of a logger built without options.
    pub default_threshold: String,
    /// Format fields of a logger built without options.
    pub default_format: String,
    /// Destination used while no sinks are configured.
    pub default_sink: &'static str,
}

impl VersionInfo {
    /// Collects the build and default-configuration details.
    #[must_use]
    pub fn current() -> Self {
        let defaults = Config::default();
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            levels: Level::NAMED.into_iter().filter_map(Level::name).collect(),
            default_threshold: defaults.threshold.to_string(),
            default_format: defaults.format.to_string(),
            default_sink: "stderr",
        }
    }
}

/// Print version information.
///
/// # Errors
///
/// Returns an error if the JSON report cannot be serialized.
pub fn run(args: &VersionArgs) -> Result<(), SevlogError> {
    let info = VersionInfo::current();
    match args.format {
        OutputFormat::Human => {
            println!("{} {}", info.name, info.version);
            println!("  levels:    {}", info.levels.join(" "));
            println!("  threshold: {} (default)", info.default_threshold);
            println!("  format:    {} (default)", info.default_format);
            println!("  sink:      {} (default)", info.default_sink);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&info)?);
        }
    }
    Ok(())
}
