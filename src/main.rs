//! `sevlog` - leveled logging from the command line

use clap::Parser;

use sevlog::cli::args::{Cli, OutputFormat};
use sevlog::cli::commands;
use sevlog::error::ExitCode;
use sevlog::observability::{DiagnosticsFormat, init_logging};

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        let format = match cli.diagnostics_format {
            OutputFormat::Human => DiagnosticsFormat::Human,
            OutputFormat::Json => DiagnosticsFormat::Json,
        };
        init_logging(format, cli.verbose, cli.color);
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
