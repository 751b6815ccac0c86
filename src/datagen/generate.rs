//! Generate command handler.

use anyhow::Context;
use bench_core::BenchSchema;
use bench_generator::TableGenerator;
use bench_populate_csv::{CSVPopulateArgs, CSVPopulator, PopulateMetrics};
use serde::Serialize;
use std::path::PathBuf;

use super::{load_schema, select_tables};

/// Result of generating one table.
#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    /// Table name
    pub table: String,
    /// Output CSV file
    pub path: PathBuf,
    /// Rows in the table
    pub row_count: u64,
    /// Rows written by this run (0 when skipped)
    pub rows_written: u64,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Rows per second
    pub rows_per_second: f64,
    /// Output file size in bytes
    pub file_size_bytes: u64,
    /// An up-to-date file was kept
    pub skipped: bool,
}

impl TableReport {
    fn new(table: String, path: PathBuf, row_count: u64, metrics: &PopulateMetrics) -> Self {
        Self {
            table,
            path,
            row_count,
            rows_written: metrics.rows_written,
            duration_ms: metrics.total_duration.as_millis() as u64,
            rows_per_second: metrics.rows_per_second(),
            file_size_bytes: metrics.file_size_bytes,
            skipped: metrics.skipped,
        }
    }
}

/// Result of the generate command, printed as a single JSON line.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    /// Seed used for random columns
    pub seed: u64,
    /// Per-table results, in selection order
    pub tables: Vec<TableReport>,
}

/// Build the generator for one table with the command-line overrides applied.
fn build_generator(
    schema: &BenchSchema,
    table: &str,
    args: &CSVPopulateArgs,
) -> anyhow::Result<TableGenerator> {
    let mut generator =
        TableGenerator::from_schema_with_cache_size(schema, table, args.cache_size)
            .with_context(|| format!("Invalid definition for table '{table}'"))?;
    if let Some(row_count) = args.row_count {
        generator = generator.with_row_count(row_count);
    }
    if let Some(factor) = args.scale_factor {
        generator = generator.with_scale_factor(factor)?;
    }
    Ok(generator)
}

/// Run the generate command: write one CSV file per selected table.
///
/// Every table is validated before any file is written. Tables are then
/// generated concurrently, one blocking task each.
pub async fn run_generate(args: CSVPopulateArgs) -> anyhow::Result<GenerateReport> {
    let schema = load_schema(&args.schema, args.seed)?;
    let tables = select_tables(&schema, &args.tables)?;
    let seed = schema.seed.unwrap_or(bench_generator::DEFAULT_SEED);

    let generators = tables
        .iter()
        .map(|table| build_generator(&schema, table, &args))
        .collect::<anyhow::Result<Vec<_>>>()?;

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", args.output_dir))?;

    tracing::info!(
        "Generating {} table(s) into {:?} (seed={})",
        generators.len(),
        args.output_dir,
        seed
    );

    let mut handles = Vec::with_capacity(generators.len());
    for generator in generators {
        let table = generator.table_name().to_string();
        let row_count = generator.row_count();
        let path = args.output_dir.join(format!("{table}.csv"));
        let mut populator = CSVPopulator::new(generator)
            .with_header(!args.no_header)
            .with_skip_existing(!args.force);

        let task_path = path.clone();
        let handle = tokio::task::spawn_blocking(move || populator.populate(&task_path));
        handles.push((table, path, row_count, handle));
    }

    let mut reports = Vec::with_capacity(handles.len());
    for (table, path, row_count, handle) in handles {
        let metrics = handle
            .await
            .with_context(|| format!("Generation task for table '{table}' failed"))?
            .with_context(|| format!("Failed to generate table '{table}'"))?;

        if metrics.skipped {
            tracing::info!("Kept {}: {:?} is up to date", table, path);
        } else {
            tracing::info!(
                "Generated {}: {} rows in {:?}",
                table,
                metrics.rows_written,
                metrics.total_duration
            );
        }
        reports.push(TableReport::new(table, path, row_count, &metrics));
    }

    Ok(GenerateReport {
        seed,
        tables: reports,
    })
}
