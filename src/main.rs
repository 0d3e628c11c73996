use std::env;
use std::path::Path;

use anyhow::Result;
use csv_neo4j_ingest::config::{Neo4jConfig, DEFAULT_MAPPING_FILE};
use csv_neo4j_ingest::neo4j::{self, Neo4jSink};
use csv_neo4j_ingest::{mapping, Ingestor};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_target(false)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    if let Err(e) = run().await {
        error!("Ingest failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let mapping_path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or(DEFAULT_MAPPING_FILE);

    info!("Loading mapping from {}", mapping_path);
    let mapping = mapping::load(Path::new(mapping_path))?;
    info!("✓ Loaded {} entries", mapping.entries.len());

    let config = Neo4jConfig::from_env()?;
    info!("Connecting to Neo4j at {}", config.uri);
    let graph = neo4j::connect(&config)?;
    let sink = Neo4jSink::new(graph);
    info!("✓ Connected to Neo4j");

    // CSV sources live next to the mapping file
    let data_dir = Path::new(mapping_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let ingestor = Ingestor::new(mapping, data_dir);
    let results = ingestor.run(&sink).await?;
    Ingestor::report(&results);

    Ok(())
}
