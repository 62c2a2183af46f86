//! Command-line interface for seedfill
//!
//! # Usage Examples
//!
//! ## Populate
//! ```bash
//! # Ten people as JSON Lines on stdout, reproducibly
//! seedfill populate --schema people.yaml --type person --count 10 --seed 42
//!
//! # Write to a file, leaving some fields null
//! seedfill populate -s people.yaml -t person -n 1000 \
//!   --output people.jsonl \
//!   --exclude person.ssn,password
//! ```
//!
//! ## Describe
//! ```bash
//! # Which registry resolves each field of every type
//! seedfill describe --schema people.yaml
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`, e.g.
//! `RUST_LOG=seedfill_generator=debug`.

use clap::{Parser, Subcommand};
use seedfill::args::{DescribeArgs, PopulateArgs};

#[derive(Parser)]
#[command(name = "seedfill")]
#[command(about = "Populate objects with seedable random data from a YAML schema")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate populated objects as JSON Lines
    Populate {
        #[command(flatten)]
        args: PopulateArgs,
    },

    /// Show which registry resolves each field
    Describe {
        #[command(flatten)]
        args: DescribeArgs,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing; stdout carries the JSONL output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Populate { args } => {
            let metrics = seedfill::run_populate(&args)?;
            tracing::info!(
                "Populated {}: {} objects in {:?}",
                args.type_name,
                metrics.objects_written,
                metrics.total_duration
            );
        }
        Commands::Describe { args } => {
            seedfill::run_describe(&args, std::io::stdout().lock())?;
        }
    }

    Ok(())
}
