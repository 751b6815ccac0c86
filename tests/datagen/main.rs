//! bench-datagen integration tests.
//!
//! These tests run the command handlers against the schema in
//! `tests/fixtures/bench_schema.yaml` and check the files they write.

mod describe;
mod generate;

use bench_populate_csv::CSVPopulateArgs;
use std::path::{Path, PathBuf};

const SCHEMA: &str = "tests/fixtures/bench_schema.yaml";

/// Generate arguments writing into `output_dir`, with every option at its default.
fn generate_args(output_dir: &Path) -> CSVPopulateArgs {
    CSVPopulateArgs {
        schema: PathBuf::from(SCHEMA),
        output_dir: output_dir.to_path_buf(),
        tables: Vec::new(),
        row_count: None,
        scale_factor: None,
        seed: None,
        cache_size: bench_generator::DEFAULT_VALUE_CACHE_SIZE,
        no_header: false,
        force: false,
    }
}

/// Read a CSV file written by the generate command into its lines.
fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
