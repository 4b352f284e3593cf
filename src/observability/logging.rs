//! Diagnostics subscriber initialization.
//!
//! Provides `tracing` output for the engine's own diagnostics with
//! human-readable and JSON formats, configurable verbosity, and an
//! environment override via `SEVLOG_DIAGNOSTICS`.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Diagnostics output format.
///
/// Controls how diagnostics are rendered to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagnosticsFormat {
    /// Human-readable format with optional ANSI colors.
    #[default]
    Human,
    /// Newline-delimited JSON for machine consumption.
    Json,
}

/// Maps a verbosity level to a tracing directive string.
///
/// - 0 → `"warn"`
/// - 1 → `"info"`
/// - 2 → `"debug"`
/// - 3+ → `"trace"` (saturates)
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Resolves a [`ColorChoice`] against the terminal and `NO_COLOR`.
#[must_use]
pub fn use_ansi(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Auto => {
            std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// Installs the diagnostics subscriber on stderr.
///
/// `SEVLOG_DIAGNOSTICS`, when set, replaces the verbosity-derived filter.
/// Returns `false` if a subscriber was already installed, so repeated
/// calls (e.g. from tests) are harmless.
pub fn init_logging(format: DiagnosticsFormat, verbosity: u8, color: ColorChoice) -> bool {
    let filter = EnvFilter::try_from_env("SEVLOG_DIAGNOSTICS")
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr);

    match format {
        DiagnosticsFormat::Human => builder.with_ansi(use_ansi(color)).try_init().is_ok(),
        DiagnosticsFormat::Json => builder.json().try_init().is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_format_default_is_human() {
        assert_eq!(DiagnosticsFormat::default(), DiagnosticsFormat::Human);
    }

    #[test]
    fn second_init_is_a_no_op() {
        init_logging(DiagnosticsFormat::Human, 0, ColorChoice::Auto);
        let installed = init_logging(DiagnosticsFormat::Json, 3, ColorChoice::Never);
        assert!(!installed);
    }

    #[test]
    fn explicit_color_choices_ignore_the_terminal() {
        assert!(use_ansi(ColorChoice::Always));
        assert!(!use_ansi(ColorChoice::Never));
    }

    #[test]
    fn verbosity_mapping() {
        assert_eq!(verbosity_to_directive(0), "warn");
        assert_eq!(verbosity_to_directive(1), "info");
        assert_eq!(verbosity_to_directive(2), "debug");
        assert_eq!(verbosity_to_directive(3), "trace");
        assert_eq!(verbosity_to_directive(255), "trace");
    }
}
