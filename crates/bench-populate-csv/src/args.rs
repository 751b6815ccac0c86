//! CLI argument definitions for CSV populator.

use clap::Args;
use std::path::PathBuf;

/// Arguments for generating CSV tables from a schema.
#[derive(Args, Clone, Debug)]
pub struct CSVPopulateArgs {
    /// Path to schema YAML file
    #[arg(long, short = 's', env = "BENCH_SCHEMA")]
    pub schema: PathBuf,

    /// Output directory for CSV files (one file per table)
    #[arg(long, short = 'o', env = "BENCH_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Specific tables to generate (comma-separated, empty = all tables from schema)
    #[arg(long, value_delimiter = ',')]
    pub tables: Vec<String>,

    /// Row count for every table, overriding the schema
    #[arg(long, env = "BENCH_ROW_COUNT")]
    pub row_count: Option<u64>,

    /// Multiply each table's row count (column shapes are preserved)
    #[arg(long, env = "BENCH_SCALE_FACTOR")]
    pub scale_factor: Option<f64>,

    /// Random seed, overriding the schema (same seed = same data)
    #[arg(long, env = "BENCH_SEED")]
    pub seed: Option<u64>,

    /// Maximum number of cached values per column
    #[arg(long, default_value_t = bench_generator::DEFAULT_VALUE_CACHE_SIZE)]
    pub cache_size: usize,

    /// Omit the header row
    #[arg(long)]
    pub no_header: bool,

    /// Regenerate tables even when an up-to-date file exists
    #[arg(long)]
    pub force: bool,
}

impl CSVPopulateArgs {
    /// Whether `table` was selected (an empty selection means all tables).
    pub fn selects(&self, table: &str) -> bool {
        self.tables.is_empty() || self.tables.iter().any(|t| t == table)
    }
}
