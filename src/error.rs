use thiserror::Error;

/// Mapping file is malformed or internally inconsistent. Raised before any
/// CSV is opened and before any write is issued.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read mapping file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse mapping file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("entry '{label}': statement references ${parameter} but no column is bound to it")]
    UnboundParameter { label: String, parameter: String },
    #[error("entry '{label}': '{field}' must not be empty")]
    EmptyField { label: String, field: &'static str },
    #[error("{0} not set")]
    MissingEnv(&'static str),
}

/// A CSV source cannot satisfy its mapping entry. Aborts the entry before
/// any of its writes; earlier entries stay committed, there is no rollback.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to open CSV file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("CSV file {path} has no column '{column}' required by the mapping")]
    MissingColumn { path: String, column: String },
    #[error("failed to read record at {path} line {line}: {source}")]
    Record {
        path: String,
        line: u64,
        #[source]
        source: csv::Error,
    },
}

/// A write statement failed mid-run. Aborts the run immediately; writes
/// already issued remain in the store.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("init statement {index} failed: {message}")]
    Init { index: usize, message: String },
    #[error("write failed for {path} line {line}: {message}")]
    Write {
        path: String,
        line: u64,
        message: String,
    },
}

/// Umbrella error for a full ingest run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
}
