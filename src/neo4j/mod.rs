pub mod connection;
pub mod writer;

pub use connection::connect;
pub use writer::Neo4jSink;
