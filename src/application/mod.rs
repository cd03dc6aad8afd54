pub mod arbiter;
pub mod ingest;
pub mod presenter;
pub mod resolve;
