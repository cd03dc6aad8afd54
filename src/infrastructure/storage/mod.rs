pub mod local;
pub mod signing;
