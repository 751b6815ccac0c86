//! Command-line interface for bench-datagen
//!
//! # Usage Examples
//!
//! ```bash
//! # Generate all tables with the schema's row counts
//! bench-datagen generate --schema bench.yaml --output-dir data/
//!
//! # Generate two tables at ten times their row count
//! bench-datagen generate --schema bench.yaml --output-dir data/ \
//!   --tables quotes,trades --scale-factor 10
//!
//! # Regenerate even if the existing files are up to date
//! bench-datagen generate --schema bench.yaml --output-dir data/ --force
//!
//! # Show what would be generated
//! bench-datagen describe --schema bench.yaml
//! ```

use bench_datagen::datagen::{describe_tables, run_generate, DescribeArgs};
use bench_populate_csv::CSVPopulateArgs;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bench-datagen")]
#[command(about = "Generate reproducible synthetic tables for benchmarks")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one CSV file per table and print the run metrics as JSON
    Generate {
        #[command(flatten)]
        args: CSVPopulateArgs,
    },

    /// Print the definition of each table
    Describe {
        #[command(flatten)]
        args: DescribeArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { args } => {
            let report = run_generate(args).await?;
            // Single line, easy to parse
            println!("{}", serde_json::to_string(&report)?);
        }
        Commands::Describe { args } => {
            print!("{}", describe_tables(&args)?);
        }
    }

    Ok(())
}
