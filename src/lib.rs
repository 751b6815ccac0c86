//! bench-datagen library
//!
//! Command handlers for generating synthetic benchmark tables.
//!
//! # Crates
//!
//! - `bench_core` - scalar types, values, rows and the YAML table schema
//! - `bench_generator` - distributions, value templates and table generation
//! - `bench_populate_csv` - writes generated tables to CSV files
//!
//! # CLI Usage
//!
//! ```bash
//! # Generate every table of a schema
//! bench-datagen generate --schema bench.yaml --output-dir data/
//!
//! # Print table definitions
//! bench-datagen describe --schema bench.yaml --tables quotes
//! ```

pub mod datagen;
