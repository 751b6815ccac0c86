//! Scalar column types for benchmark tables.
//!
//! Types are declared by name in table definitions (`string`, `int`, `long`,
//! `float`, `double`, `timestamp-millis`). Names are matched
//! case-insensitively and always rendered in lower case.

use std::fmt;
use std::str::FromStr;

/// Error returned when a type name does not match any [`ScalarType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid field type: {0}")]
pub struct TypeError(pub String);

/// Scalar type of a generated column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// UTF-8 string
    String,

    /// 32-bit signed integer
    Int,

    /// 64-bit signed integer
    Long,

    /// 32-bit IEEE 754 floating point
    Float,

    /// 64-bit IEEE 754 floating point
    Double,

    /// Milliseconds since the Unix epoch
    TimestampMillis,
}

impl ScalarType {
    /// All supported types, in declaration order.
    pub const ALL: [ScalarType; 6] = [
        ScalarType::String,
        ScalarType::Int,
        ScalarType::Long,
        ScalarType::Float,
        ScalarType::Double,
        ScalarType::TimestampMillis,
    ];

    /// The canonical (lower-case) name of this type.
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Int => "int",
            ScalarType::Long => "long",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
            ScalarType::TimestampMillis => "timestamp-millis",
        }
    }

    /// Check if values of this type are numbers (timestamps included).
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ScalarType::String)
    }
}

impl FromStr for ScalarType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ScalarType::ALL
            .into_iter()
            .find(|t| t.name() == lower)
            .ok_or_else(|| TypeError(s.to_string()))
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
