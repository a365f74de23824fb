//! A thread-safe set.
//!
//! See [`SyncSet`].
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::store::Store;

pub mod merge;
use self::merge::Delta;

/// A set of unique elements that can be shared between threads.
///
/// Besides the usual membership operations, a `SyncSet` can reconcile
/// itself with a change made elsewhere to an earlier copy of it. See
/// [`merge_newer`](SyncSet::merge_newer).
pub struct SyncSet<T> {
    store: Store<HashSet<T>>,
}

impl<T> SyncSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            store: Store::new(HashSet::new()),
        }
    }

    /// Creates an empty set with room for at least `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Store::new(HashSet::with_capacity(capacity)),
        }
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.store.read(HashSet::len)
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.store.read(HashSet::is_empty)
    }

    /// Removes every element.
    pub fn clear(&self) {
        self.store.write(HashSet::clear)
    }

    /// Consumes the set, returning its elements.
    pub fn into_inner(self) -> HashSet<T> {
        self.store.into_inner()
    }
}

impl<T: Eq + Hash> SyncSet<T> {
    /// Returns `true` if the set contains `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.store.read(|set| set.contains(value))
    }

    /// Adds `value`, returning whether it was newly added.
    pub fn insert(&self, value: T) -> bool {
        self.store.write(|set| set.insert(value))
    }

    /// Removes `value`, returning whether it was present.
    pub fn remove<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.store.write(|set| set.remove(value))
    }
}

impl<T: Clone> SyncSet<T> {
    /// Returns a copy of an arbitrary element, or `None` if the set is empty.
    pub fn any(&self) -> Option<T> {
        self.store.read(|set| set.iter().next().cloned())
    }

    /// Returns a snapshot of the set's elements.
    pub fn to_set(&self) -> HashSet<T> {
        self.store.snapshot()
    }

    /// Returns a snapshot of the set's elements, in arbitrary order.
    pub fn to_vec(&self) -> Vec<T> {
        self.store.read(|set| set.iter().cloned().collect())
    }

    /// Returns an independently locked copy of the set.
    pub fn duplicate(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T: Clone + Eq + Hash> SyncSet<T> {
    /// Applies the change from `original` to `newer` onto this set, and
    /// returns an independent copy of the result.
    ///
    /// This supports handing a snapshot of the set to someone else, who
    /// modifies it and hands it back, while this set may have kept changing
    /// in the meantime. Changes made here that the other party did not touch
    /// are kept.
    ///
    /// Elements removed between `original` and `newer` are removed first,
    /// then elements added between them are added, all within one critical
    /// section. On conflict the external change wins: an element removed
    /// externally is removed even if it was re-added here, and an element
    /// added externally is present even if it was removed here.
    ///
    /// `original` and `newer` are read before this set is locked, so either
    /// may be this set itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use syncol::SyncSet;
    ///
    /// let original = SyncSet::from_iter(['a', 'b', 'c']);
    /// let newer = SyncSet::from_iter(['a', 'c', 'd']);
    /// let current = SyncSet::from_iter(['a', 'b', 'e']);
    ///
    /// let merged = current.merge_newer(&newer, &original);
    ///
    /// assert_eq!(merged, SyncSet::from_iter(['a', 'd', 'e']));
    /// assert_eq!(current, merged);
    /// ```
    pub fn merge_newer(&self, newer: &Self, original: &Self) -> Self {
        let delta = Delta::between(&original.to_set(), &newer.to_set());
        debug!(
            added = delta.added.len(),
            removed = delta.removed.len(),
            "merging newer set"
        );
        let merged = self.store.write(|set| {
            delta.apply(set);
            set.clone()
        });
        Self::from(merged)
    }
}

impl<T> Default for SyncSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SyncSet<T> {
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

impl<T> From<HashSet<T>> for SyncSet<T> {
    fn from(set: HashSet<T>) -> Self {
        Self {
            store: Store::new(set),
        }
    }
}

impl<T: Eq + Hash> From<Vec<T>> for SyncSet<T> {
    /// Creates a set from the elements of `values`, dropping duplicates.
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Eq + Hash> FromIterator<T> for SyncSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<HashSet<T>>())
    }
}

impl<T: Clone + Eq + Hash> PartialEq for SyncSet<T> {
    fn eq(&self, other: &Self) -> bool {
        let theirs = other.to_set();
        self.store.read(|ours| *ours == theirs)
    }
}

impl<T: Clone + Eq + Hash> Eq for SyncSet<T> {}

impl<T: fmt::Debug> fmt::Debug for SyncSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.store.read(|set| f.debug_set().entries(set.iter()).finish())
    }
}

impl<T: Serialize> Serialize for SyncSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.store.read(|set| set.serialize(serializer))
    }
}

impl<'de, T: Deserialize<'de> + Eq + Hash> Deserialize<'de> for SyncSet<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        HashSet::deserialize(deserializer).map(Self::from)
    }
}
