// Ingest executor - drives the mapping entries against the sink
use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use crate::csv_source::RowReader;
use crate::error::{IngestError, RunError};
use crate::ingest::IngestResult;
use crate::mapping::Mapping;
use crate::sink::GraphSink;

/// Executes a [`Mapping`] against a graph sink, strictly in declared order.
///
/// One CSV open at a time, one statement in flight at a time, no retries.
/// A single failed write aborts the whole run; writes already issued stay
/// committed. Idempotence is up to the statements themselves: unconditional
/// `CREATE` doubles the data on a re-run, `MERGE` does not.
pub struct Ingestor {
    mapping: Mapping,
    data_dir: PathBuf,
}

impl Ingestor {
    /// Create an ingestor. CSV sources are resolved against `data_dir`,
    /// conventionally the mapping file's directory.
    pub fn new(mapping: Mapping, data_dir: impl Into<PathBuf>) -> Self {
        Ingestor {
            mapping,
            data_dir: data_dir.into(),
        }
    }

    /// Run init statements, then every entry in declared order.
    ///
    /// Returns one [`IngestResult`] per entry, in mapping order.
    pub async fn run(&self, sink: &dyn GraphSink) -> Result<Vec<IngestResult>, RunError> {
        let start_time = Instant::now();

        if !self.mapping.init.is_empty() {
            info!("Running {} init statements...", self.mapping.init.len());
            for (idx, statement) in self.mapping.init.iter().enumerate() {
                sink.execute(statement, &[])
                    .await
                    .map_err(|e| IngestError::Init {
                        index: idx + 1,
                        message: e.to_string(),
                    })?;
            }
            info!("✓ Init statements applied");
        }

        let mut results = Vec::with_capacity(self.mapping.entries.len());

        for entry in &self.mapping.entries {
            info!("Loading {} from {}...", entry.label, entry.source);

            let path = self.data_dir.join(&entry.source);
            let bindings: Vec<(String, String)> = entry
                .parameters
                .iter()
                .map(|(parameter, column)| (parameter.clone(), column.clone()))
                .collect();

            let mut reader = RowReader::open(&path, &bindings)?;
            let mut count = 0u64;

            while let Some(row) = reader.next_row() {
                let row = row?;
                sink.execute(&entry.statement, &row.params)
                    .await
                    .map_err(|e| IngestError::Write {
                        path: entry.source.clone(),
                        line: row.line,
                        message: e.to_string(),
                    })?;
                count += 1;
            }

            info!("✓ Loaded {} rows for {}", count, entry.label);
            results.push(IngestResult {
                label: entry.label.clone(),
                count,
            });
        }

        info!("Ingest finished in {:.2}s", start_time.elapsed().as_secs_f64());
        Ok(results)
    }

    /// Log the label -> count table, in mapping order. Observational only.
    pub fn report(results: &[IngestResult]) {
        info!("=== Ingest Complete ===");
        for result in results {
            info!("{}: {}", result.label, result.count);
        }
    }
}
