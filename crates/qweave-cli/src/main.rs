//! Qweave Command-Line Interface
//!
//! Convert, validate, and inspect quantum-circuit JSON documents from the
//! command line, using the same codecs the designer uses.

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{convert, inspect, validate};

/// Qweave - circuit document tooling for QML encoding benchmarks
#[derive(Parser)]
#[command(name = "qweave")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Output shape for `convert`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Flat `{gate, wires, params}` stream for the execution backend
    Wire,
    /// Canonical `{id, type, target, control, params, timeStep}` snapshot
    Snapshot,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a circuit document and re-emit it in a chosen shape
    Convert {
        /// Input file (any accepted circuit JSON shape)
        #[arg(short, long)]
        input: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Output shape
        #[arg(long, value_enum, default_value = "wire")]
        to: OutputFormat,
    },

    /// Check a wire-list document against the execution backend contract
    Validate {
        /// Input file
        #[arg(short, long)]
        input: String,
    },

    /// Summarize a circuit document
    Inspect {
        /// Input file
        #[arg(short, long)]
        input: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Convert { input, output, to } => {
            convert::execute(&input, output.as_deref(), to.into())
        }
        Commands::Validate { input } => validate::execute(&input),
        Commands::Inspect { input } => inspect::execute(&input),
    }
}

impl From<OutputFormat> for qweave_wire::ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Wire => qweave_wire::ExportFormat::WireList,
            OutputFormat::Snapshot => qweave_wire::ExportFormat::Snapshot,
        }
    }
}
