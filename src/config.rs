// Environment-driven configuration
use std::env;

use crate::error::ConfigError;

pub const DEFAULT_MAPPING_FILE: &str = "ingest.yaml";

/// Neo4j connection settings, read once from the environment and passed
/// explicitly to [`crate::neo4j::connect`]. Never consulted as ambient state
/// past this point, so the core stays testable against an in-memory sink.
#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Neo4jConfig {
    /// Read `NEO4J_URI`, `NEO4J_USERNAME` and `NEO4J_PASSWORD`.
    ///
    /// The URI is required; credentials default to empty for auth-disabled
    /// local instances.
    pub fn from_env() -> Result<Self, ConfigError> {
        let uri = env::var("NEO4J_URI").map_err(|_| ConfigError::MissingEnv("NEO4J_URI"))?;
        let user = env::var("NEO4J_USERNAME").unwrap_or_default();
        let password = env::var("NEO4J_PASSWORD").unwrap_or_default();

        Ok(Neo4jConfig {
            uri,
            user,
            password,
        })
    }
}
