//! Thread-safe collections, written in Rust.
//!
//! This crate provides an ordered sequence ([`SyncVec`]), a key-value map
//! ([`SyncMap`]) and a set ([`SyncSet`]) that can be read and mutated from
//! many threads at once without any locking by the caller.
//!
//! Each container owns its elements inside a [`Store`](store::Store), which
//! guards them with a reader/writer lock. Every operation acquires that lock
//! exactly once, so operations that read and then modify a container, such
//! as [`SyncVec::pop_last`] or [`SyncSet::merge_newer`], are atomic. Values
//! leave a container only as copies, never as references into it.
//!
//! These containers are **not** lock-free.
pub mod error;
pub mod map;
pub mod sequence;
pub mod set;
pub mod store;
pub(crate) mod sync;

pub use error::{Error, Result};
pub use map::SyncMap;
pub use sequence::SyncVec;
pub use set::SyncSet;
