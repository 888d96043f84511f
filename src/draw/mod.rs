//! Draw execution boundary
//!
//! - [`AlgorithmRegistry`]: mode → algorithm, fixed at startup
//! - [`StrategyRepository`]: strategy definitions and exclusions from the platform
//! - [`DrawExecutor`]: resolves mode, lazily builds tables and draws

mod exec;
mod registry;
mod repository;

pub use exec::{DrawExec, DrawExecutor};
pub use registry::AlgorithmRegistry;
pub use repository::{InMemoryStrategyRepository, StrategyRepository};

#[cfg(test)]
pub(crate) use repository::MockStrategyRepository;
