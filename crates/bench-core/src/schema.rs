//! Table definitions for benchmark data generation.
//!
//! A schema file declares one or more tables. Each table lists its columns
//! by name, type and value template, plus optional distribution settings:
//!
//! ```yaml
//! version: 1
//! seed: 20221130
//! default_row_count: 10000
//! tables:
//!   - name: quotes
//!     distribution: ascending
//!     columns:
//!       - name: sym
//!         type: string
//!         values: "SYM[1-100]"
//!       - name: price
//!         type: double
//!         values: "[100-200]"
//!         distribution: runlength
//! ```
//!
//! Column types, templates and distribution names are kept as raw strings
//! here. They are validated when the generator builds the table's column
//! definitions, so a bad declaration fails before any row is produced.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Row count used when neither the table nor the schema sets one.
pub const DEFAULT_ROW_COUNT: u64 = 10_000;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Table not found in schema
    #[error("Table not found: {0}")]
    TableNotFound(String),
}

// ============================================================================
// Definitions
// ============================================================================

/// A single column declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnSchema {
    /// Column name
    pub name: String,

    /// Scalar type name (e.g. `int`, `timestamp-millis`)
    #[serde(rename = "type")]
    pub column_type: String,

    /// Value template (e.g. `[1-100]`, `SYM[1-10]`, `42`)
    pub values: String,

    /// Distribution override for this column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<String>,
}

/// A table declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableSchema {
    /// Table name
    pub name: String,

    /// Default distribution for columns without an override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<String>,

    /// Generate values incrementally and size the table by its widest column
    #[serde(default)]
    pub fixed: bool,

    /// Explicit number of rows to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u64>,

    /// Column declarations, in output order
    pub columns: Vec<ColumnSchema>,
}

fn default_version() -> u32 {
    1
}

/// Full schema: a set of tables plus generation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchSchema {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Seed for random distributions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Row count for tables that don't declare one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_row_count: Option<u64>,

    /// Table definitions
    pub tables: Vec<TableSchema>,

    /// Cached table lookup (not serialized)
    #[serde(skip)]
    table_map: HashMap<String, usize>,
}

impl BenchSchema {
    /// Create a schema from a list of tables.
    pub fn new(tables: Vec<TableSchema>) -> Self {
        let mut schema = Self {
            version: default_version(),
            seed: None,
            default_row_count: None,
            tables,
            table_map: HashMap::new(),
        };
        schema.build_table_map();
        schema
    }

    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let mut schema: BenchSchema = serde_yaml::from_str(yaml)?;
        schema.build_table_map();
        Ok(schema)
    }

    /// Build the internal table lookup map.
    fn build_table_map(&mut self) {
        self.table_map = self
            .tables
            .iter()
            .enumerate()
            .map(|(idx, table)| (table.name.clone(), idx))
            .collect();
    }

    /// Get a table schema by name.
    pub fn get_table(&self, name: &str) -> Option<&TableSchema> {
        self.table_map
            .get(name)
            .and_then(|&idx| self.tables.get(idx))
    }

    /// Get a table schema by name, failing if it isn't declared.
    pub fn require_table(&self, name: &str) -> Result<&TableSchema, SchemaError> {
        self.get_table(name)
            .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))
    }

    /// Get all table names in the schema.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Row count for tables without an explicit one.
    pub fn effective_default_row_count(&self) -> u64 {
        self.default_row_count
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_ROW_COUNT)
    }
}
