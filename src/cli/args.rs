//! CLI argument definitions
//!
//! All Clap derive structs for `sevlog` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::config::Settings;
use crate::level::Level;

// ============================================================================
// Root CLI
// ============================================================================

/// Leveled logging from the command line.
#[derive(Parser, Debug)]
#[command(name = "sevlog", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase diagnostics verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress diagnostics.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control for diagnostics.
    #[arg(long, default_value = "auto", global = true, env = "SEVLOG_COLOR")]
    pub color: ColorChoice,

    /// Diagnostics output format.
    #[arg(long, default_value = "human", global = true)]
    pub diagnostics_format: OutputFormat,
}

// ============================================================================
// Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Emit messages through a configured logger.
    Emit(EmitArgs),

    /// Run the built-in walkthrough; ends with a fatal message (exit 1).
    Demo(DemoArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Logger configuration shared by commands that build a logger.
#[derive(Args, Debug, Default)]
pub struct LoggerArgs {
    /// Threshold level (all, trace, debug, info, warn, error, fatal, off).
    #[arg(short, long, env = "SEVLOG_THRESHOLD")]
    pub threshold: Option<String>,

    /// Format fields, e.g. `time,tag,message`, `all` or `none`.
    #[arg(short, long, env = "SEVLOG_FORMAT")]
    pub format: Option<String>,

    /// Sink to write to: `stderr`, `stdout`, `null` or a file path. Repeatable.
    #[arg(long = "sink", value_name = "SINK")]
    pub sinks: Vec<String>,
}

impl LoggerArgs {
    /// Converts the flags into settings overrides.
    #[must_use]
    pub fn to_settings(&self) -> Settings {
        Settings {
            threshold: self.threshold.clone(),
            format: self.format.clone().map(|f| vec![f]),
            sinks: (!self.sinks.is_empty()).then(|| self.sinks.clone()),
        }
    }
}

/// Arguments for `emit`.
#[derive(Args, Debug)]
pub struct EmitArgs {
    /// Path to a YAML settings file.
    #[arg(short, long, env = "SEVLOG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub logger: LoggerArgs,

    /// Severity of every emitted message.
    #[arg(short, long, default_value = "info")]
    pub severity: Level,

    /// Messages to emit, one line each.
    #[arg(required = true)]
    pub messages: Vec<String>,
}

/// Arguments for `demo`.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Sink to write to instead of stderr. Repeatable.
    #[arg(long = "sink", value_name = "SINK")]
    pub sinks: Vec<String>,
}

/// Arguments for `version`.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Value Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}
