//! One-shot CSV to Neo4j ingestion driven by a declarative YAML mapping.
//!
//! A mapping file binds each CSV source to a parameterized Cypher write
//! statement. The [`Ingestor`] executes the entries strictly in declared
//! order, one statement per row, and reports a per-label row count at the
//! end. There is no retry and no rollback: the target store is assumed to
//! be a disposable demo instance recreated between runs.

pub mod config;
pub mod csv_source;
pub mod error;
pub mod ingest;
pub mod mapping;
pub mod neo4j;
pub mod sink;

// Re-export commonly used types
pub use ingest::{IngestResult, Ingestor};
pub use mapping::{Mapping, MappingEntry};
pub use sink::{GraphSink, MemorySink, SinkError};
