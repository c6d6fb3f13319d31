pub mod alias;
pub mod cost;
pub mod error;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod resolver;
