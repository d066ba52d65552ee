use std::process::ExitCode;

use clap::{Parser, Subcommand};
use commands::{
    degrees::{self, DegreesArgs},
    diagram::{self, DiagramArgs},
    rewire::{self, RewireArgs},
    version::{self, VersionArgs},
};
use logging::LogFormat;
use tracing::error;

mod commands;
mod io;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "cfgm-sim", about = "Degree-preserving network rewiring CLI")]
struct Cli {
    /// Format of diagnostics on stderr; falls back to `CFGM_LOG_FORMAT`.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an ensemble of rewired networks preserving the input degrees.
    Rewire(RewireArgs),
    /// Print the degree sequence of an edge list.
    Degrees(DegreesArgs),
    /// Render an edge list as a D2 diagram.
    Diagram(DiagramArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let installed = logging::resolve_format(cli.log_format).and_then(logging::init_logging);
    if let Err(err) = installed {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    let result = match cli.command {
        Command::Rewire(args) => rewire::run(&args),
        Command::Degrees(args) => degrees::run(&args),
        Command::Diagram(args) => diagram::run(&args),
        Command::Version(args) => version::run(&args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}
