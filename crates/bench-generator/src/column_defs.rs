//! Column definitions for a generated table.
//!
//! Columns are declared by name, type and value template (ex. `[1-100]`,
//! `str[1-100]ing`), optionally with their own distribution. Values are
//! computed per `(column, row, total rows)`:
//!
//! ```text
//! row index ──► Distribution::apply ──► magnitude ──► ValueCache ──► Arc<BenchValue>
//!                 (row domain [0, n-1],               │ miss
//!                  column range [low, high])          ▼
//!                                              ValueTemplate::coerce
//! ```
//!
//! Literal-only columns skip both the distribution and the cache.

use crate::cache::{cache_key, ValueCache, DEFAULT_VALUE_CACHE_SIZE};
use crate::distribution::Distribution;
use crate::error::GeneratorError;
use crate::template::ValueTemplate;
use bench_core::{BenchValue, ScalarType};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Seed used for random distributions unless overridden.
pub const DEFAULT_SEED: u64 = 20221130;

/// One column's declaration.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    name: String,
    scalar_type: ScalarType,
    template: ValueTemplate,
    distribution: Option<Distribution>,
    literal: Option<Arc<BenchValue>>,
}

impl ColumnSpec {
    /// Parse and validate a column declaration.
    pub fn new(
        name: &str,
        scalar_type: &str,
        values: &str,
        distribution: Option<&str>,
    ) -> Result<Self, GeneratorError> {
        let scalar_type: ScalarType =
            scalar_type
                .parse()
                .map_err(|source| GeneratorError::InvalidType {
                    column: name.to_string(),
                    source,
                })?;
        let invalid_template = |source| GeneratorError::InvalidTemplate {
            column: name.to_string(),
            source,
        };
        let template = ValueTemplate::parse(values).map_err(invalid_template)?;
        template.validate(scalar_type).map_err(invalid_template)?;

        let literal = if template.is_literal() {
            let value = template
                .coerce_literal(scalar_type)
                .map_err(invalid_template)?;
            Some(Arc::new(value))
        } else {
            None
        };

        let distribution = distribution
            .map(str::parse::<Distribution>)
            .transpose()?;

        Ok(Self {
            name: name.to_string(),
            scalar_type,
            template,
            distribution,
            literal,
        })
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared scalar type.
    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    /// Parsed value template.
    pub fn template(&self) -> &ValueTemplate {
        &self.template
    }

    /// Distribution override, if one was declared.
    pub fn distribution(&self) -> Option<Distribution> {
        self.distribution
    }

    /// Number of distinct values this column can produce.
    pub fn cardinality(&self) -> u64 {
        self.template.cardinality()
    }

    /// Check that every value `distribution` can produce coerces to the type.
    fn check_distribution(&self, distribution: Distribution) -> Result<(), GeneratorError> {
        if distribution != Distribution::Descending || self.literal.is_some() {
            return Ok(());
        }
        self.template
            .validate_negated(self.scalar_type)
            .map_err(|source| GeneratorError::InvalidTemplate {
                column: self.name.clone(),
                source,
            })
    }
}

/// Ordered column declarations for one table.
///
/// Built with a consuming builder:
///
/// ```rust
/// use bench_generator::ColumnDefs;
///
/// let mut defs = ColumnDefs::new()
///     .add("sym", "string", "SYM[1-3]")?
///     .add_with_distribution("price", "int", "[100-102]", "ascending")?
///     .set_default_distribution("ascending")?;
///
/// assert_eq!(defs.next_value(0, 1, 10)?.to_string(), "SYM2");
/// # Ok::<(), bench_generator::GeneratorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ColumnDefs {
    columns: Vec<ColumnSpec>,
    default_distribution: Distribution,
    cache: ValueCache,
    seed: u64,
}

impl Default for ColumnDefs {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnDefs {
    /// Create an empty set using the default cache size and seed.
    pub fn new() -> Self {
        Self::with_cache_size(DEFAULT_VALUE_CACHE_SIZE)
    }

    /// Create an empty set caching up to `cache_size` values per column.
    pub fn with_cache_size(cache_size: usize) -> Self {
        Self {
            columns: Vec::new(),
            default_distribution: Distribution::Random,
            cache: ValueCache::new(cache_size),
            seed: DEFAULT_SEED,
        }
    }

    /// Set the seed for random distributions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Add a column that uses the default distribution.
    pub fn add(self, name: &str, scalar_type: &str, values: &str) -> Result<Self, GeneratorError> {
        self.push(ColumnSpec::new(name, scalar_type, values, None)?)
    }

    /// Add a column with its own distribution.
    pub fn add_with_distribution(
        self,
        name: &str,
        scalar_type: &str,
        values: &str,
        distribution: &str,
    ) -> Result<Self, GeneratorError> {
        self.push(ColumnSpec::new(name, scalar_type, values, Some(distribution))?)
    }

    /// Set the distribution used by columns without an override.
    ///
    /// Columns already declared are checked against the new default.
    pub fn set_default_distribution(mut self, distribution: &str) -> Result<Self, GeneratorError> {
        let distribution: Distribution = distribution.parse()?;
        for spec in self.columns.iter().filter(|c| c.distribution.is_none()) {
            spec.check_distribution(distribution)?;
        }
        self.default_distribution = distribution;
        Ok(self)
    }

    fn push(mut self, spec: ColumnSpec) -> Result<Self, GeneratorError> {
        if self.columns.iter().any(|c| c.name == spec.name) {
            return Err(GeneratorError::DuplicateColumn(spec.name));
        }
        spec.check_distribution(spec.distribution.unwrap_or(self.default_distribution))?;
        self.cache.add_column();
        self.columns.push(spec);
        Ok(self)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if no columns are declared.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get a column declaration by index.
    pub fn column(&self, index: usize) -> Option<&ColumnSpec> {
        self.columns.get(index)
    }

    /// All column declarations, in order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Distribution used by columns without an override.
    pub fn default_distribution(&self) -> Distribution {
        self.default_distribution
    }

    /// Distribution a column actually uses.
    pub fn effective_distribution(&self, index: usize) -> Option<Distribution> {
        self.columns
            .get(index)
            .map(|c| c.distribution.unwrap_or(self.default_distribution))
    }

    /// Seed for random distributions.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Value cache shared by the columns.
    pub fn cache(&self) -> &ValueCache {
        &self.cache
    }

    /// Column names, in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Column names paired with their types, in order.
    pub fn type_map(&self) -> Vec<(&str, ScalarType)> {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), c.scalar_type))
            .collect()
    }

    /// Comma-separated, double-quoted column names.
    pub fn quoted_columns(&self) -> String {
        self.columns
            .iter()
            .map(|c| format!("\"{}\"", c.name))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Largest number of distinct values any column can take.
    pub fn max_value_count(&self) -> u64 {
        self.columns
            .iter()
            .map(ColumnSpec::cardinality)
            .max()
            .unwrap_or(0)
    }

    /// Render the definitions as CSV.
    ///
    /// Line endings are always `\n`. The output is compared literally to
    /// decide whether existing generated data can be reused.
    pub fn describe(&self) -> String {
        let mut out = String::from("name,type,values,distribution\n");
        for c in &self.columns {
            out.push_str(&format!(
                "{},{},{},{}\n",
                c.name,
                c.scalar_type,
                c.template.as_str(),
                c.distribution.unwrap_or(self.default_distribution)
            ));
        }
        out
    }

    /// Compute the value of a column for a row.
    ///
    /// The result depends only on the arguments, the seed and which values
    /// are already cached.
    pub fn next_value(
        &mut self,
        column_index: usize,
        row_index: u64,
        total_row_count: u64,
    ) -> Result<Arc<BenchValue>, GeneratorError> {
        let count = self.columns.len();
        let spec = self
            .columns
            .get(column_index)
            .ok_or(GeneratorError::ColumnNotFound {
                index: column_index,
                count,
            })?;

        if let Some(literal) = &spec.literal {
            return Ok(Arc::clone(literal));
        }

        let out_of_range = GeneratorError::RowOutOfRange {
            row: row_index,
            total: total_row_count,
        };
        if row_index >= total_row_count {
            return Err(out_of_range);
        }
        let row = i64::try_from(row_index).map_err(|_| out_of_range)?;
        let last_row = i64::try_from(total_row_count - 1).unwrap_or(i64::MAX);

        let distribution = spec.distribution.unwrap_or(self.default_distribution);
        let (src_min, src_max) = if distribution.is_position_dependent() {
            (0, last_row)
        } else {
            (row, row)
        };
        let (dst_min, dst_max) = spec.template.range().unwrap_or((0, 0));

        let mut rng = StdRng::seed_from_u64(row_seed(self.seed, column_index, row_index));
        let magnitude = distribution.apply(&mut rng, src_min, src_max, row, dst_min, dst_max)?;

        // Only random draws may share a slot across signs
        let key = cache_key(
            magnitude,
            distribution == Distribution::Random && spec.scalar_type.is_numeric(),
        );
        if let Some(cached) = self.cache.get(column_index, key) {
            return Ok(cached);
        }

        let value = Arc::new(spec.template.coerce(spec.scalar_type, magnitude)?);
        self.cache.put(column_index, key, Arc::clone(&value));
        Ok(value)
    }
}

/// Derive the random seed for one cell.
fn row_seed(seed: u64, column: usize, row: u64) -> u64 {
    seed.wrapping_add((column as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F))
        .wrapping_add(row.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
