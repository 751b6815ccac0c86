//! Table generator producing benchmark rows.

use crate::cache::DEFAULT_VALUE_CACHE_SIZE;
use crate::column_defs::{ColumnDefs, DEFAULT_SEED};
use crate::distribution::Distribution;
use crate::error::GeneratorError;
use bench_core::{BenchRow, BenchSchema, TableSchema};
use tracing::debug;

/// Generates the rows of one table.
///
/// Every row is computed from its index, so generation can start anywhere
/// (see [`TableGenerator::with_start_index`]) and yields the same values as
/// a run from the beginning.
#[derive(Debug, Clone)]
pub struct TableGenerator {
    /// Table name
    table: String,
    /// Column definitions and their value cache
    columns: ColumnDefs,
    /// Total rows in the table
    row_count: u64,
    /// First row this generator produces
    start_index: u64,
    /// Next row to generate
    index: u64,
}

impl TableGenerator {
    /// Create a generator from already built column definitions.
    pub fn new(table: impl Into<String>, columns: ColumnDefs, row_count: u64) -> Self {
        Self {
            table: table.into(),
            columns,
            row_count,
            start_index: 0,
            index: 0,
        }
    }

    /// Create a generator for a table declared in a schema.
    pub fn from_schema(schema: &BenchSchema, table: &str) -> Result<Self, GeneratorError> {
        Self::from_schema_with_cache_size(schema, table, DEFAULT_VALUE_CACHE_SIZE)
    }

    /// Create a generator for a table declared in a schema, with a given
    /// per-column cache size.
    pub fn from_schema_with_cache_size(
        schema: &BenchSchema,
        table: &str,
        cache_size: usize,
    ) -> Result<Self, GeneratorError> {
        let table_schema = schema
            .get_table(table)
            .ok_or_else(|| GeneratorError::TableNotFound(table.to_string()))?;

        let columns = build_column_defs(
            table_schema,
            schema.seed.unwrap_or(DEFAULT_SEED),
            cache_size,
        )?;
        let row_count =
            resolve_row_count(table_schema, &columns, schema.effective_default_row_count());

        debug!(
            "Built {} column definitions for table '{}' ({} rows)",
            columns.len(),
            table,
            row_count
        );

        Ok(Self::new(table_schema.name.clone(), columns, row_count))
    }

    /// Override the row count.
    pub fn with_row_count(mut self, row_count: u64) -> Self {
        self.row_count = row_count;
        self
    }

    /// Multiply the row count by `factor`.
    ///
    /// Position-dependent distributions are computed over `[0, row_count - 1]`,
    /// so a scaled table keeps each column's shape and cardinality.
    pub fn with_scale_factor(mut self, factor: f64) -> Result<Self, GeneratorError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(GeneratorError::InvalidScaleFactor(factor));
        }
        let scaled = (self.row_count as f64 * factor).round();
        self.row_count = (scaled as u64).max(1);
        Ok(self)
    }

    /// Set the starting index for row generation.
    pub fn with_start_index(mut self, index: u64) -> Self {
        self.start_index = index;
        self.index = index;
        self
    }

    /// Table name.
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Column definitions.
    pub fn columns(&self) -> &ColumnDefs {
        &self.columns
    }

    /// Total rows in the table.
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// First row this generator produces.
    pub fn start_index(&self) -> u64 {
        self.start_index
    }

    /// Get the current row index.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    /// Rows left to generate.
    pub fn remaining(&self) -> u64 {
        self.row_count.saturating_sub(self.index)
    }

    /// Text identifying what this generator produces.
    ///
    /// Two generators with equal definitions produce identical tables. A
    /// generator that starts past row 0 records its start index, so its
    /// partial output never matches a full table.
    pub fn definition(&self) -> String {
        let mut out = format!("row.count={}\n", self.row_count);
        if self.start_index > 0 {
            out.push_str(&format!("start.index={}\n", self.start_index));
        }
        out.push_str(&format!("seed={}\n", self.columns.seed()));
        out.push_str(&self.columns.describe());
        out
    }

    /// Generate the next row, or `None` once the table is complete.
    pub fn next_row(&mut self) -> Result<Option<BenchRow>, GeneratorError> {
        if self.index >= self.row_count {
            return Ok(None);
        }

        let index = self.index;
        let values = (0..self.columns.len())
            .map(|column| self.columns.next_value(column, index, self.row_count))
            .collect::<Result<Vec<_>, _>>()?;

        self.index += 1;

        Ok(Some(BenchRow::new(self.table.clone(), index, values)))
    }

    /// Iterate over the remaining rows.
    pub fn rows(&mut self) -> BenchRowIterator<'_> {
        BenchRowIterator { generator: self }
    }
}

/// Iterator that lazily generates rows.
///
/// Stops after the first error.
pub struct BenchRowIterator<'a> {
    generator: &'a mut TableGenerator,
}

impl Iterator for BenchRowIterator<'_> {
    type Item = Result<BenchRow, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.generator.next_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => None,
            Err(e) => {
                self.generator.index = self.generator.row_count;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.generator.remaining() as usize;
        (remaining, Some(remaining))
    }
}

/// Build the column definitions declared by a table schema.
///
/// Fixed tables default to the `ascending` distribution; otherwise the
/// table's own default (or `random`) applies.
pub fn build_column_defs(
    table: &TableSchema,
    seed: u64,
    cache_size: usize,
) -> Result<ColumnDefs, GeneratorError> {
    let mut defs = ColumnDefs::with_cache_size(cache_size).with_seed(seed);

    if table.fixed {
        defs = defs.set_default_distribution(Distribution::Ascending.name())?;
    }
    if let Some(distribution) = &table.distribution {
        defs = defs.set_default_distribution(distribution)?;
    }

    for column in &table.columns {
        defs = match &column.distribution {
            Some(d) => defs.add_with_distribution(&column.name, &column.column_type, &column.values, d)?,
            None => defs.add(&column.name, &column.column_type, &column.values)?,
        };
    }
    Ok(defs)
}

/// Decide how many rows a table gets.
///
/// An explicit row count wins. Fixed tables are otherwise sized by their
/// widest column so every value appears once. Everything else falls back to
/// `default_row_count`.
pub fn resolve_row_count(table: &TableSchema, columns: &ColumnDefs, default_row_count: u64) -> u64 {
    if let Some(count) = table.row_count.filter(|&n| n > 0) {
        return count;
    }
    let count = if table.fixed {
        columns.max_value_count()
    } else {
        0
    };
    if count > 0 {
        return count;
    }
    default_row_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_core::BenchValue;

    fn test_schema() -> BenchSchema {
        let yaml = r#"
version: 1
seed: 42
default_row_count: 50

tables:
  - name: quotes
    distribution: ascending
    row_count: 12
    columns:
      - name: sym
        type: string
        values: "SYM[1-4]"
      - name: price
        type: int
        values: "[100-102]"
        distribution: descending
      - name: venue
        type: string
        values: "NYSE"

  - name: trades
    fixed: true
    columns:
      - name: id
        type: long
        values: "[1-20]"
      - name: qty
        type: int
        values: "[1-5]"

  - name: ticks
    columns:
      - name: v
        type: double
        values: "[1-10]"

  - name: broken
    columns:
      - name: v
        type: int
        values: "[10-1]"
"#;
        BenchSchema::from_yaml(yaml).unwrap()
    }

    #[test]
    fn test_generate_single_row() {
        let schema = test_schema();
        let mut generator = TableGenerator::from_schema(&schema, "quotes").unwrap();

        let row = generator.next_row().unwrap().unwrap();
        assert_eq!(row.table, "quotes");
        assert_eq!(row.index, 0);
        assert_eq!(row.get(0), Some(&BenchValue::String("SYM1".into())));
        assert_eq!(row.get(1), Some(&BenchValue::Int(-100)));
        assert_eq!(row.get(2), Some(&BenchValue::String("NYSE".into())));
    }

    #[test]
    fn test_generate_all_rows() {
        let schema = test_schema();
        let mut generator = TableGenerator::from_schema(&schema, "quotes").unwrap();
        assert_eq!(generator.row_count(), 12);

        let rows: Vec<BenchRow> = generator.rows().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 12);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.index, i as u64);
        }
        let syms: Vec<String> = rows.iter().map(|r| r.get(0).unwrap().to_string()).collect();
        assert_eq!(&syms[..5], &["SYM1", "SYM2", "SYM3", "SYM4", "SYM1"]);

        assert!(generator.next_row().unwrap().is_none());
        assert_eq!(generator.remaining(), 0);
    }

    #[test]
    fn test_deterministic_generation() {
        let schema = test_schema();
        let mut gen1 = TableGenerator::from_schema(&schema, "ticks").unwrap();
        let mut gen2 = TableGenerator::from_schema(&schema, "ticks").unwrap();

        let rows1: Vec<BenchRow> = gen1.rows().collect::<Result<_, _>>().unwrap();
        let rows2: Vec<BenchRow> = gen2.rows().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows1, rows2);
    }

    #[test]
    fn test_with_start_index() {
        let schema = test_schema();
        let mut full = TableGenerator::from_schema(&schema, "ticks").unwrap();
        let all: Vec<BenchRow> = full.rows().collect::<Result<_, _>>().unwrap();

        let mut resumed = TableGenerator::from_schema(&schema, "ticks")
            .unwrap()
            .with_start_index(30);
        let tail: Vec<BenchRow> = resumed.rows().collect::<Result<_, _>>().unwrap();

        assert_eq!(tail.len(), 20);
        assert_eq!(tail.as_slice(), &all[30..]);
    }

    #[test]
    fn test_row_count_resolution() {
        let schema = test_schema();

        // Explicit count
        let quotes = TableGenerator::from_schema(&schema, "quotes").unwrap();
        assert_eq!(quotes.row_count(), 12);

        // Fixed: widest column
        let trades = TableGenerator::from_schema(&schema, "trades").unwrap();
        assert_eq!(trades.row_count(), 20);
        assert_eq!(
            trades.columns().default_distribution(),
            Distribution::Ascending
        );

        // Schema default
        let ticks = TableGenerator::from_schema(&schema, "ticks").unwrap();
        assert_eq!(ticks.row_count(), 50);
        assert_eq!(ticks.columns().default_distribution(), Distribution::Random);
    }

    #[test]
    fn test_fixed_table_covers_every_value() {
        let schema = test_schema();
        let mut generator = TableGenerator::from_schema(&schema, "trades").unwrap();
        let ids: Vec<i64> = generator
            .rows()
            .map(|r| r.unwrap().get(0).unwrap().as_i64().unwrap())
            .collect();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_scale_factor() {
        let schema = test_schema();
        let generator = TableGenerator::from_schema(&schema, "quotes")
            .unwrap()
            .with_scale_factor(2.5)
            .unwrap();
        assert_eq!(generator.row_count(), 30);

        let tiny = TableGenerator::from_schema(&schema, "quotes")
            .unwrap()
            .with_scale_factor(0.001)
            .unwrap();
        assert_eq!(tiny.row_count(), 1);

        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                TableGenerator::from_schema(&schema, "quotes")
                    .unwrap()
                    .with_scale_factor(bad),
                Err(GeneratorError::InvalidScaleFactor(_))
            ));
        }
    }

    #[test]
    fn test_scaled_run_length_keeps_shape() {
        let defs = ColumnDefs::new()
            .add_with_distribution("v", "int", "[1-4]", "runlength")
            .unwrap();

        for rows in [8u64, 80] {
            let mut generator = TableGenerator::new("t", defs.clone(), rows);
            let values: Vec<i64> = generator
                .rows()
                .map(|r| r.unwrap().get(0).unwrap().as_i64().unwrap())
                .collect();
            let block = (rows / 4) as usize;
            for (i, v) in values.iter().enumerate() {
                assert_eq!(*v, (i / block) as i64 + 1);
            }
        }
    }

    #[test]
    fn test_definition() {
        let schema = test_schema();
        let generator = TableGenerator::from_schema(&schema, "quotes").unwrap();
        assert_eq!(
            generator.definition(),
            "row.count=12\nseed=42\n\
             name,type,values,distribution\n\
             sym,string,SYM[1-4],ascending\n\
             price,int,[100-102],descending\n\
             venue,string,NYSE,ascending\n"
        );
    }

    #[test]
    fn test_definition_records_start_index() {
        let schema = test_schema();
        let full = TableGenerator::from_schema(&schema, "quotes").unwrap();
        let mut partial = TableGenerator::from_schema(&schema, "quotes")
            .unwrap()
            .with_start_index(4);

        assert_eq!(partial.start_index(), 4);
        assert!(partial
            .definition()
            .starts_with("row.count=12\nstart.index=4\nseed=42\n"));
        assert_ne!(partial.definition(), full.definition());

        // Generating rows doesn't change the definition
        let before = partial.definition();
        assert_eq!(partial.rows().count(), 8);
        assert_eq!(partial.definition(), before);
    }

    #[test]
    fn test_table_not_found() {
        let schema = test_schema();
        let result = TableGenerator::from_schema(&schema, "nonexistent");
        assert!(matches!(result, Err(GeneratorError::TableNotFound(_))));
    }

    #[test]
    fn test_invalid_declaration_fails_before_generation() {
        let schema = test_schema();
        let result = TableGenerator::from_schema(&schema, "broken");
        assert!(matches!(result, Err(GeneratorError::InvalidTemplate { .. })));
    }

    #[test]
    fn test_start_past_end_yields_nothing() {
        let defs = ColumnDefs::new().add("v", "int", "[1-3]").unwrap();
        let mut generator = TableGenerator::new("t", defs, 3).with_start_index(5);
        assert_eq!(generator.rows().count(), 0);
    }
}
