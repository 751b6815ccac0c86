//! Distribution functions.
//!
//! A distribution maps a source value (the row index) from a source range
//! onto a magnitude in a destination range (the column's declared values).
//! Keeping the two ranges apart lets one table be regenerated at another
//! row count, and one distribution shape be reused by columns with
//! different value ranges.
//!
//! The result is a magnitude, not a column value: the caller still renders
//! it through the column's template and coerces it to the column type.

use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Error type for distribution lookup and application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DistributionError {
    /// No distribution with this name
    #[error("Undefined distribution function name: {0}")]
    Unknown(String),

    /// Source range is inverted
    #[error("srcMin is greater than srcMax: {min} > {max}")]
    SourceRange { min: i64, max: i64 },

    /// Destination range is inverted
    #[error("dstMin is greater than dstMax: {min} > {max}")]
    DestinationRange { min: i64, max: i64 },

    /// Result does not fit in 64 bits
    #[error("Distribution result out of range: {0}")]
    Overflow(i128),
}

/// Row-index-to-magnitude policy for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Distribution {
    /// Uniform draw from the destination range
    #[default]
    Random,

    /// Cycle upward through the destination range
    Ascending,

    /// Cycle through the destination range with negated magnitudes
    Descending,

    /// Step through the destination range in contiguous blocks of rows
    RunLength,

    /// Proportional map from source range to destination range
    LinearConv,
}

impl Distribution {
    /// All distributions.
    pub const ALL: [Distribution; 5] = [
        Distribution::Random,
        Distribution::Ascending,
        Distribution::Descending,
        Distribution::RunLength,
        Distribution::LinearConv,
    ];

    /// The canonical (lower-case) name.
    pub fn name(&self) -> &'static str {
        match self {
            Distribution::Random => "random",
            Distribution::Ascending => "ascending",
            Distribution::Descending => "descending",
            Distribution::RunLength => "runlength",
            Distribution::LinearConv => "linearconv",
        }
    }

    /// Whether the result depends on the row position.
    pub fn is_position_dependent(&self) -> bool {
        !matches!(self, Distribution::Random)
    }

    /// Apply the distribution.
    ///
    /// `src_val` is a value (usually the row index) within
    /// `[src_min, src_max]`, and the result lies in `[dst_min, dst_max]`
    /// (negated for [`Distribution::Descending`]). Only
    /// [`Distribution::Random`] draws from `rng`.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        src_min: i64,
        src_max: i64,
        src_val: i64,
        dst_min: i64,
        dst_max: i64,
    ) -> Result<i64, DistributionError> {
        check(src_min, src_max, dst_min, dst_max)?;

        let offset = src_val as i128 - src_min as i128;
        let src_range = src_max as i128 - src_min as i128;
        let dst_range = dst_max as i128 - dst_min as i128;

        let result = match self {
            Distribution::Random => return Ok(rng.random_range(dst_min..=dst_max)),
            Distribution::LinearConv => {
                if src_range == 0 {
                    return Ok(dst_max);
                }
                dst_min as i128 + offset * dst_range / src_range
            }
            Distribution::RunLength => {
                dst_min as i128 + (offset * (dst_range + 1)).div_euclid(src_range + 1)
            }
            Distribution::Ascending => dst_min as i128 + offset.rem_euclid(dst_range + 1),
            Distribution::Descending => -(dst_min as i128 + offset.rem_euclid(dst_range + 1)),
        };

        i64::try_from(result).map_err(|_| DistributionError::Overflow(result))
    }
}

impl FromStr for Distribution {
    type Err = DistributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "incremental" {
            return Ok(Distribution::Ascending);
        }
        Distribution::ALL
            .into_iter()
            .find(|d| d.name() == lower)
            .ok_or_else(|| DistributionError::Unknown(s.to_string()))
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ensure source and destination minimums don't exceed their maximums.
pub fn check(src_min: i64, src_max: i64, dst_min: i64, dst_max: i64) -> Result<(), DistributionError> {
    if src_min > src_max {
        return Err(DistributionError::SourceRange {
            min: src_min,
            max: src_max,
        });
    }
    if dst_min > dst_max {
        return Err(DistributionError::DestinationRange {
            min: dst_min,
            max: dst_max,
        });
    }
    Ok(())
}
