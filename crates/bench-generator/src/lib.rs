//! Synthetic column data generator for bench-datagen.
//!
//! Columns are declared with a type, a value template and a distribution.
//! Each value is a function of `(column, row, total rows)` and the seed, so
//! tables can be generated in any order, sharded across workers, or rescaled
//! to a different row count while keeping every column's cardinality.
//!
//! # Architecture
//!
//! ```text
//! BenchSchema (YAML)
//!        │
//!        ▼
//! ┌──────────────────┐
//! │  TableGenerator  │
//! │                  │
//! │  - ColumnDefs    │──► Distribution / ValueTemplate / ValueCache
//! │  - row_count     │
//! │  - index         │
//! └────────┬─────────┘
//!          │
//!          ▼
//!    BenchRow { table, index, values }
//! ```
//!
//! # Example
//!
//! ```rust
//! use bench_generator::TableGenerator;
//! use bench_core::BenchSchema;
//!
//! let schema = BenchSchema::from_yaml(r#"
//! version: 1
//! seed: 42
//! tables:
//!   - name: quotes
//!     row_count: 100
//!     columns:
//!       - name: sym
//!         type: string
//!         values: "SYM[1-10]"
//!         distribution: ascending
//!       - name: price
//!         type: double
//!         values: "[100-200]"
//! "#).unwrap();
//!
//! let mut generator = TableGenerator::from_schema(&schema, "quotes").unwrap();
//! let row = generator.next_row().unwrap().unwrap();
//! assert_eq!(row.get(0).unwrap().to_string(), "SYM1");
//! ```

pub mod cache;
pub mod column_defs;
pub mod distribution;
pub mod error;
pub mod generator;
pub mod template;

pub use cache::{ValueCache, DEFAULT_VALUE_CACHE_SIZE};
pub use column_defs::{ColumnDefs, ColumnSpec, DEFAULT_SEED};
pub use distribution::{Distribution, DistributionError};
pub use error::GeneratorError;
pub use generator::{BenchRowIterator, TableGenerator};
pub use template::{TemplateError, ValueTemplate};
