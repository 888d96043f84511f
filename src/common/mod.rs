pub mod errors;
pub mod random;
pub mod types;
