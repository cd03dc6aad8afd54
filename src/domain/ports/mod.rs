pub mod asset_store;
pub mod candidate_store;
pub mod embedding_port;
pub mod language_model;
