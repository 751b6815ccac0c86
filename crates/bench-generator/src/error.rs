//! Error type for generator operations.

use crate::distribution::DistributionError;
use crate::template::TemplateError;

/// Error type for column declaration and value generation.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Column type name is not supported
    #[error("Column '{column}': {source}")]
    InvalidType {
        column: String,
        #[source]
        source: bench_core::TypeError,
    },

    /// Column template is malformed or doesn't fit the column type
    #[error("Column '{column}': {source}")]
    InvalidTemplate {
        column: String,
        #[source]
        source: TemplateError,
    },

    /// Distribution lookup or application failed
    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),

    /// Template coercion failed during generation
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// A column with this name was already declared
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// Column index outside the declared columns
    #[error("Column index {index} out of range ({count} columns)")]
    ColumnNotFound { index: usize, count: usize },

    /// Row index outside the table
    #[error("Row index {row} out of range ({total} rows)")]
    RowOutOfRange { row: u64, total: u64 },

    /// Table not found in schema
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Scale factor must be a positive finite number
    #[error("Invalid scale factor: {0}")]
    InvalidScaleFactor(f64),

    /// Schema error
    #[error("Schema error: {0}")]
    SchemaError(#[from] bench_core::SchemaError),
}
