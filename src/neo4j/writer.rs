// Neo4j-backed graph sink
use async_trait::async_trait;
use neo4rs::{Graph, Query};

use crate::sink::{GraphSink, SinkError};

/// Production [`GraphSink`] issuing each statement against a Neo4j driver.
pub struct Neo4jSink {
    graph: Graph,
}

impl Neo4jSink {
    pub fn new(graph: Graph) -> Self {
        Neo4jSink { graph }
    }
}

#[async_trait]
impl GraphSink for Neo4jSink {
    async fn execute(&self, statement: &str, params: &[(String, String)]) -> Result<(), SinkError> {
        let mut query = Query::new(statement.to_string());
        for (name, value) in params {
            query = query.param(name, value.clone());
        }

        self.graph.run(query).await?;
        Ok(())
    }
}
