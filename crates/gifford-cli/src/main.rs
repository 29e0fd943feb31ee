//! CLI for gifford — a keystream file transform with a classical randomness battery.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gifford")]
#[command(about = "Gifford keystream file transform with a classical randomness battery")]
#[command(version = gifford_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a file through the keystream engine, then report the
    /// battery over the engine's observation sequence
    Process {
        /// Input file path (prompted for when omitted)
        #[arg(long)]
        input: Option<String>,

        /// Output file path (prompted for when omitted)
        #[arg(long)]
        output: Option<String>,

        /// Engine key as 16 hex digits (default: the reference key)
        #[arg(long)]
        key: Option<String>,

        /// Skip the statistical battery
        #[arg(long)]
        no_battery: bool,

        /// Write battery results as JSON
        #[arg(long)]
        report: Option<String>,
    },

    /// Run the statistical battery over an existing file's bytes
    Battery {
        /// File to analyze as an observation sequence
        file: String,

        /// Write battery results as JSON
        #[arg(long)]
        report: Option<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            key,
            no_battery,
            report,
        } => commands::process::run(
            input.as_deref(),
            output.as_deref(),
            key.as_deref(),
            no_battery,
            report.as_deref(),
        ),
        Commands::Battery { file, report } => commands::battery::run(&file, report.as_deref()),
    }
}
