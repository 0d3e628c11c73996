pub mod executor;

pub use executor::Ingestor;

/// Per-entry outcome used only for the final report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestResult {
    pub label: String,
    pub count: u64,
}
