//! bench-datagen command handlers.
//!
//! This module contains handlers for the generate and describe commands.

pub mod describe;
pub mod generate;

use anyhow::Context;
use bench_core::BenchSchema;
use std::path::Path;

pub use describe::{describe_tables, DescribeArgs};
pub use generate::{run_generate, GenerateReport, TableReport};

/// Load a schema file, applying an optional seed override.
pub fn load_schema(path: &Path, seed: Option<u64>) -> anyhow::Result<BenchSchema> {
    let mut schema = BenchSchema::from_file(path)
        .with_context(|| format!("Failed to load schema from {path:?}"))?;
    if seed.is_some() {
        schema.seed = seed;
    }
    Ok(schema)
}

/// Resolve the tables to work on. An empty selection means every table.
pub fn select_tables(schema: &BenchSchema, selected: &[String]) -> anyhow::Result<Vec<String>> {
    if selected.is_empty() {
        return Ok(schema.table_names().iter().map(|s| s.to_string()).collect());
    }
    for name in selected {
        schema.require_table(name)?;
    }
    Ok(selected.to_vec())
}
