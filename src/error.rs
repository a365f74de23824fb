//! Errors returned by container operations.
use thiserror::Error;

/// An error raised by an operation on a container.
///
/// Errors are always detected while the container's lock is held, so they
/// describe the state of the container at the instant the operation ran,
/// not the state observed by the caller beforehand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// An index was outside the valid bounds of a sequence.
    #[error("index {index} is out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// An element was requested from an empty container.
    #[error("container is empty")]
    EmptyContainer,
}

/// A specialized [`Result`](std::result::Result) for container operations.
pub type Result<T> = std::result::Result<T, Error>;
