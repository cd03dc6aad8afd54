pub mod choice;
pub mod query;
pub mod resolution;
