//! Three-way merging of sets.
use std::collections::HashSet;
use std::hash::Hash;

/// The change between two versions of a set.
///
/// A delta is computed from an `original` set and a `newer` version of it,
/// and can then be replayed onto a third set that may have diverged from
/// `original` in the meantime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta<T: Eq + Hash> {
    /// Elements of `newer` that were not in `original`.
    pub added: HashSet<T>,
    /// Elements of `original` that are not in `newer`.
    pub removed: HashSet<T>,
}

impl<T: Clone + Eq + Hash> Delta<T> {
    /// Returns the change that turns `original` into `newer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashSet;
    /// use syncol::set::merge::Delta;
    ///
    /// let original = HashSet::from(['a', 'b', 'c']);
    /// let newer = HashSet::from(['a', 'c', 'd']);
    ///
    /// let delta = Delta::between(&original, &newer);
    /// assert_eq!(delta.added, HashSet::from(['d']));
    /// assert_eq!(delta.removed, HashSet::from(['b']));
    /// ```
    pub fn between(original: &HashSet<T>, newer: &HashSet<T>) -> Self {
        Self {
            added: newer.difference(original).cloned().collect(),
            removed: original.difference(newer).cloned().collect(),
        }
    }
}

impl<T: Eq + Hash> Delta<T> {
    /// Returns `true` if the two versions were equal.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Replays the change onto `current`.
    ///
    /// Every removed element is taken out of `current` first, and then every
    /// added element is put in. The delta therefore wins any conflict with
    /// changes already made to `current`: an element it removed is gone even
    /// if `current` had re-added it, and an element it added is present even
    /// if `current` had dropped it.
    pub fn apply(self, current: &mut HashSet<T>) {
        for element in &self.removed {
            current.remove(element);
        }
        current.extend(self.added);
    }
}
