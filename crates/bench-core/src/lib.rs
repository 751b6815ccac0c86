//! Core types for the bench-datagen framework.
//!
//! This crate provides the foundational types shared by the generator and
//! the populators:
//!
//! - [`ScalarType`] - Column types a benchmark table can declare
//! - [`BenchValue`] - A single typed scalar produced by the generator
//! - [`BenchRow`] - One generated row, values in column order
//! - [`BenchSchema`] - Table definitions loaded from YAML
//!
//! # Architecture
//!
//! ```text
//! bench-core (this crate)
//!    │
//!    ├─── bench-generator     (distributions, templates, value cache)
//!    │
//!    └─── bench-populate-csv  (writes generated rows to CSV files)
//! ```
//!
//! # Example
//!
//! ```rust
//! use bench_core::{BenchValue, ScalarType};
//!
//! let ty: ScalarType = "timestamp-millis".parse().unwrap();
//! assert_eq!(ty, ScalarType::TimestampMillis);
//!
//! let value = BenchValue::Double(101.0);
//! assert_eq!(value.to_string(), "101.0");
//! ```

pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use schema::{BenchSchema, ColumnSchema, SchemaError, TableSchema, DEFAULT_ROW_COUNT};
pub use types::{ScalarType, TypeError};
pub use values::{BenchRow, BenchValue};
