// Neo4j connection setup
use neo4rs::Graph;

use crate::config::Neo4jConfig;
use crate::sink::SinkError;

/// Connect to Neo4j and return a Graph instance
pub fn connect(config: &Neo4jConfig) -> Result<Graph, SinkError> {
    let graph = Graph::new(&config.uri, &config.user, &config.password)?;

    Ok(graph)
}
