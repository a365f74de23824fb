//! Utilities for testing thread-safe collections.
pub mod linearizability;
pub mod specifications;

pub use linearizability::history::{Action, History, ProcessId};
pub use linearizability::WGLChecker;

pub use specifications::Specification;
