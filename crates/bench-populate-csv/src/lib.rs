//! CSV file populator for bench-datagen.
//!
//! This crate writes generated tables to CSV files, one file per table,
//! using the bench-generator crate. Each file gets a `<file>.def` companion
//! holding the table definition, so an unchanged table can be kept instead
//! of regenerated.
//!
//! # Example
//!
//! ```ignore
//! use bench_core::BenchSchema;
//! use bench_generator::TableGenerator;
//! use bench_populate_csv::CSVPopulator;
//!
//! let schema = BenchSchema::from_file("path/to/schema.yaml")?;
//! let generator = TableGenerator::from_schema(&schema, "quotes")?;
//! let mut populator = CSVPopulator::new(generator).with_skip_existing(true);
//!
//! let metrics = populator.populate("/path/to/quotes.csv")?;
//! ```

pub mod args;
mod error;
mod populator;

pub use args::CSVPopulateArgs;
pub use error::CSVPopulatorError;
pub use populator::{
    definition_path, CSVPopulator, PopulateMetrics, DEFAULT_BUFFER_SIZE, DEFINITION_EXTENSION,
};
