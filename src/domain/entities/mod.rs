pub mod candidate;
pub mod recommendation;
