//! CSV populator for generated tables.

use crate::error::CSVPopulatorError;
use bench_generator::TableGenerator;
use csv::Writer;
use std::ffi::OsString;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default buffer size for CSV writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Extension appended to the CSV path for the table definition file.
pub const DEFINITION_EXTENSION: &str = "def";

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of rows written.
    pub rows_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating data.
    pub generation_duration: Duration,
    /// Time spent writing data.
    pub write_duration: Duration,
    /// Output file size in bytes.
    pub file_size_bytes: u64,
    /// An up-to-date file already existed and was kept.
    pub skipped: bool,
}

impl PopulateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.file_size_bytes as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Path of the definition file written next to a CSV file.
pub fn definition_path(output_path: &Path) -> PathBuf {
    let mut path = OsString::from(output_path.as_os_str());
    path.push(".");
    path.push(DEFINITION_EXTENSION);
    PathBuf::from(path)
}

/// CSV populator that writes one generated table to a file.
pub struct CSVPopulator {
    generator: TableGenerator,
    include_header: bool,
    skip_existing: bool,
}

impl CSVPopulator {
    /// Create a new CSV populator.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let generator = TableGenerator::from_schema(&schema, "quotes")?;
    /// let populator = CSVPopulator::new(generator).with_skip_existing(true);
    /// ```
    pub fn new(generator: TableGenerator) -> Self {
        Self {
            generator,
            include_header: true,
            skip_existing: false,
        }
    }

    /// Set whether to include a header row in the CSV output.
    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    /// Keep an existing file whose definition file matches this table.
    pub fn with_skip_existing(mut self, skip_existing: bool) -> Self {
        self.skip_existing = skip_existing;
        self
    }

    /// Get a reference to the table generator.
    pub fn generator(&self) -> &TableGenerator {
        &self.generator
    }

    /// Check whether `output_path` already holds this exact table.
    pub fn is_up_to_date(&self, output_path: &Path) -> Result<bool, CSVPopulatorError> {
        let def_path = definition_path(output_path);
        if !output_path.exists() || !def_path.exists() {
            return Ok(false);
        }
        let existing = std::fs::read_to_string(&def_path)?;
        Ok(existing == self.generator.definition())
    }

    /// Generate the table into a CSV file.
    ///
    /// Writes the rows from the generator's current index to the end of the
    /// table, then `<output_path>.def` holding the table definition.
    ///
    /// # Returns
    ///
    /// Metrics about the populate operation.
    pub fn populate<P: AsRef<Path>>(
        &mut self,
        output_path: P,
    ) -> Result<PopulateMetrics, CSVPopulatorError> {
        let start_time = Instant::now();
        let mut metrics = PopulateMetrics::default();
        let output_path = output_path.as_ref();
        let table_name = self.generator.table_name().to_string();
        let def_path = definition_path(output_path);

        if self.skip_existing && self.is_up_to_date(output_path)? {
            info!(
                "Skipping table '{}': '{}' is up to date",
                table_name,
                output_path.display()
            );
            metrics.file_size_bytes = std::fs::metadata(output_path)?.len();
            metrics.total_duration = start_time.elapsed();
            metrics.skipped = true;
            return Ok(metrics);
        }

        // A stale definition must not vouch for a partially written file
        if def_path.exists() {
            std::fs::remove_file(&def_path)?;
        }

        info!(
            "Generating CSV file '{}' with {} rows for table '{}'",
            output_path.display(),
            self.generator.remaining(),
            table_name
        );

        // Create writer
        let file = File::create(output_path)?;
        let buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut writer = Writer::from_writer(buf_writer);

        let mut generation_time = Duration::ZERO;
        let mut write_time = Duration::ZERO;

        // Write header if requested
        if self.include_header {
            let write_start = Instant::now();
            writer.write_record(self.generator.columns().column_names())?;
            write_time += write_start.elapsed();
        }

        loop {
            let gen_start = Instant::now();
            let Some(row) = self.generator.next_row()? else {
                break;
            };
            generation_time += gen_start.elapsed();

            let write_start = Instant::now();
            writer.write_record(row.to_strings())?;
            write_time += write_start.elapsed();

            metrics.rows_written += 1;

            if metrics.rows_written % 10000 == 0 {
                debug!("Written {} rows", metrics.rows_written);
            }
        }

        // Flush and get file size
        writer.flush()?;
        drop(writer);

        std::fs::write(&def_path, self.generator.definition())?;

        metrics.file_size_bytes = std::fs::metadata(output_path)?.len();
        metrics.total_duration = start_time.elapsed();
        metrics.generation_duration = generation_time;
        metrics.write_duration = write_time;

        info!(
            "CSV generation complete: {} rows, {} bytes in {:?} ({:.2} rows/sec)",
            metrics.rows_written,
            metrics.file_size_bytes,
            metrics.total_duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }
}
