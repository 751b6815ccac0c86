//! Value representations for generated benchmark data.
//!
//! This module defines the typed scalars produced by the generator and the
//! row type handed to populators.

use crate::types::ScalarType;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A single generated scalar, already coerced to its column's type.
///
/// Values are shared through `Arc` so repeated magnitudes can hand out the
/// same instance instead of building a new one per row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BenchValue {
    /// String value
    String(String),

    /// 32-bit signed integer
    Int(i32),

    /// 64-bit signed integer
    Long(i64),

    /// 32-bit floating point
    Float(f32),

    /// 64-bit floating point
    Double(f64),

    /// Milliseconds since the Unix epoch
    TimestampMillis(i64),
}

impl BenchValue {
    /// The scalar type of this value.
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Self::String(_) => ScalarType::String,
            Self::Int(_) => ScalarType::Int,
            Self::Long(_) => ScalarType::Long,
            Self::Float(_) => ScalarType::Float,
            Self::Double(_) => ScalarType::Double,
            Self::TimestampMillis(_) => ScalarType::TimestampMillis,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an i64. Integers and timestamps convert.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i as i64),
            Self::Long(i) | Self::TimestampMillis(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an f64. Every numeric value converts.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f as f64),
            Self::Double(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            Self::Long(i) | Self::TimestampMillis(i) => Some(*i as f64),
            Self::String(_) => None,
        }
    }

    /// View a timestamp value as a UTC date/time.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::TimestampMillis(millis) => DateTime::from_timestamp_millis(*millis),
            _ => None,
        }
    }
}

impl fmt::Display for BenchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Long(i) | Self::TimestampMillis(i) => write!(f, "{i}"),
            // Debug formatting keeps the trailing ".0" on whole numbers
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Double(v) => write!(f, "{v:?}"),
        }
    }
}

/// One generated row.
///
/// Values are stored in column order, matching the table's column
/// declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchRow {
    /// Table name
    pub table: String,

    /// Row index within the table
    pub index: u64,

    /// Column values, in declaration order
    pub values: Vec<Arc<BenchValue>>,
}

impl BenchRow {
    /// Create a new row.
    pub fn new(table: impl Into<String>, index: u64, values: Vec<Arc<BenchValue>>) -> Self {
        Self {
            table: table.into(),
            index,
            values,
        }
    }

    /// Get a column value by position.
    pub fn get(&self, column: usize) -> Option<&BenchValue> {
        self.values.get(column).map(|v| v.as_ref())
    }

    /// Number of columns in the row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render every value as text, in column order.
    pub fn to_strings(&self) -> Vec<String> {
        self.values.iter().map(|v| v.to_string()).collect()
    }
}
