//! A lock-protected holder for a backing collection.
//!
//! See [`Store`].
use std::fmt;
use std::sync::PoisonError;

use crate::sync::RwLock;

/// A backing value protected by a reader/writer lock.
///
/// [`read`](Store::read) and [`write`](Store::write) are the only way to
/// reach the value. Each runs a closure while holding the lock and returns
/// whatever the closure returns, so a multi-step operation expressed as one
/// closure is executed as a single critical section.
///
/// Any number of readers may hold the lock at once, while a writer excludes
/// everybody else. This object is **not** lock-free.
///
/// # Examples
///
/// Popping from a shared stack is atomic with respect to other writers.
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use syncol::store::Store;
///
/// let store = Arc::new(Store::new(vec![1, 2, 3]));
///
/// let store_clone = store.clone();
/// let thread = thread::spawn(move || store_clone.write(|stack| stack.pop()));
///
/// let popped = thread.join().unwrap();
/// assert_eq!(popped, Some(3));
/// assert_eq!(store.read(|stack| stack.len()), 2);
/// ```
///
/// # Poisoning
///
/// If a closure panics while the lock is held, the lock is released as the
/// stack unwinds. The store ignores the resulting poison flag, and later
/// operations observe whatever state the panicking closure left behind.
pub struct Store<T> {
    lock: RwLock<T>,
}

impl<T> Store<T> {
    /// Creates a store holding the given value.
    pub fn new(value: T) -> Self {
        Self {
            lock: RwLock::new(value),
        }
    }

    /// Runs `op` against the value while holding a shared lock.
    ///
    /// # Examples
    ///
    /// ```
    /// use syncol::store::Store;
    ///
    /// let store = Store::new(vec!["a", "b"]);
    /// assert_eq!(store.read(|v| v.len()), 2);
    /// ```
    pub fn read<R>(&self, op: impl FnOnce(&T) -> R) -> R {
        let guard = self.lock.read().unwrap_or_else(PoisonError::into_inner);
        op(&guard)
    }

    /// Runs `op` against the value while holding an exclusive lock.
    ///
    /// # Examples
    ///
    /// ```
    /// use syncol::store::Store;
    ///
    /// let store = Store::new(0);
    /// let previous = store.write(|n| std::mem::replace(n, 42));
    /// assert_eq!(previous, 0);
    /// assert_eq!(store.read(|n| *n), 42);
    /// ```
    pub fn write<R>(&self, op: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);
        op(&mut guard)
    }

    /// Consumes the store, returning the value it held.
    pub fn into_inner(self) -> T {
        self.lock
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Store<T> {
    /// Returns a copy of the value, taken under a shared lock.
    pub fn snapshot(&self) -> T {
        self.read(T::clone)
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> Clone for Store<T> {
    /// Creates an independently locked store seeded with a snapshot.
    fn clone(&self) -> Self {
        Self::new(self.snapshot())
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read(|value| f.debug_struct("Store").field("value", value).finish())
    }
}
