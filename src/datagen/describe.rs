//! Describe command handler.

use anyhow::Context;
use bench_generator::TableGenerator;
use clap::Args;
use std::path::PathBuf;

use super::{load_schema, select_tables};

/// Arguments for printing table definitions.
#[derive(Args, Clone, Debug)]
pub struct DescribeArgs {
    /// Path to schema YAML file
    #[arg(long, short = 's', env = "BENCH_SCHEMA")]
    pub schema: PathBuf,

    /// Specific tables to describe (comma-separated, empty = all tables from schema)
    #[arg(long, value_delimiter = ',')]
    pub tables: Vec<String>,

    /// Random seed, overriding the schema
    #[arg(long, env = "BENCH_SEED")]
    pub seed: Option<u64>,
}

/// Render the definition of every selected table.
///
/// Each table is introduced by a `# <table>` line followed by its
/// definition (row count, seed and column CSV).
pub fn describe_tables(args: &DescribeArgs) -> anyhow::Result<String> {
    let schema = load_schema(&args.schema, args.seed)?;
    let tables = select_tables(&schema, &args.tables)?;

    let mut out = String::new();
    for table in &tables {
        let generator = TableGenerator::from_schema(&schema, table)
            .with_context(|| format!("Invalid definition for table '{table}'"))?;
        out.push_str(&format!("# {table}\n"));
        out.push_str(&generator.definition());
    }
    Ok(out)
}
