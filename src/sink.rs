//! Graph-store seam for the ingest loop.
//!
//! This module provides:
//! - [`GraphSink`] trait abstracting the write side of the graph store
//! - [`MemorySink`] mock that records executed statements for tests
//!
//! The production implementation is [`crate::neo4j::Neo4jSink`].

use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("neo4j error: {0}")]
    Neo4j(#[from] neo4rs::Error),
    #[error("{0}")]
    Rejected(String),
}

/// Write side of a graph store.
///
/// The ingest loop only ever issues parameterized write statements and
/// observes success or failure, so the store behind this trait can be a
/// live Neo4j instance or an in-memory recorder. Statements are executed
/// one at a time; implementations do not need to support interleaving.
#[async_trait]
pub trait GraphSink: Send + Sync {
    /// Execute one parameterized write statement.
    async fn execute(&self, statement: &str, params: &[(String, String)]) -> Result<(), SinkError>;
}

/// A statement executed against a [`MemorySink`], as recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedStatement {
    pub statement: String,
    pub params: Vec<(String, String)>,
}

/// Mock sink that records every executed statement in order.
///
/// Use this for testing the ingest loop without a running Neo4j instance.
/// [`MemorySink::fail_after`] injects a write failure at a chosen point.
#[derive(Default)]
pub struct MemorySink {
    executed: RwLock<Vec<ExecutedStatement>>,
    fail_after: RwLock<Option<usize>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every execute call past the first `n` fail.
    pub fn fail_after(&self, n: usize) {
        *self.fail_after.write().unwrap() = Some(n);
    }

    /// Statements executed so far, in execution order.
    pub fn executed(&self) -> Vec<ExecutedStatement> {
        self.executed.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.executed.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.executed.read().unwrap().is_empty()
    }
}

#[async_trait]
impl GraphSink for MemorySink {
    async fn execute(&self, statement: &str, params: &[(String, String)]) -> Result<(), SinkError> {
        let mut executed = self.executed.write().unwrap();

        if let Some(limit) = *self.fail_after.read().unwrap() {
            if executed.len() >= limit {
                return Err(SinkError::Rejected("injected write failure".to_string()));
            }
        }

        executed.push(ExecutedStatement {
            statement: statement.to_string(),
            params: params.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_statements_in_order() {
        let sink = MemorySink::new();
        sink.execute("CREATE (a:Account)", &[("id".to_string(), "A1".to_string())])
            .await
            .unwrap();
        sink.execute("CREATE (c:Contact)", &[]).await.unwrap();

        let executed = sink.executed();
        assert_eq!(executed.len(), 2);
        assert_eq!(executed[0].statement, "CREATE (a:Account)");
        assert_eq!(executed[1].statement, "CREATE (c:Contact)");
    }

    #[tokio::test]
    async fn fail_after_injects_failures() {
        let sink = MemorySink::new();
        sink.fail_after(1);

        sink.execute("CREATE (a)", &[]).await.unwrap();
        let err = sink.execute("CREATE (b)", &[]).await.unwrap_err();

        assert!(matches!(err, SinkError::Rejected(_)));
        assert_eq!(sink.len(), 1);
    }
}
