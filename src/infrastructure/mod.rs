pub mod embeddings;
pub mod http;
pub mod llm;
pub mod sqlite;
pub mod storage;
