//! A thread-safe ordered sequence.
//!
//! See [`SyncVec`].
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::store::Store;

/// An ordered sequence that can be shared between threads.
///
/// Every operation acquires the sequence's lock exactly once. Operations
/// that inspect and then modify the sequence, such as
/// [`pop_last`](SyncVec::pop_last), do so within one critical section, so no
/// other thread can observe or interleave with an intermediate state.
///
/// Elements are returned by value. A `SyncVec` never hands out references
/// into its backing storage.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use syncol::SyncVec;
///
/// let queue: Arc<SyncVec<u32>> = Arc::new(SyncVec::new());
///
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let queue = queue.clone();
///         thread::spawn(move || queue.push(i))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(queue.len(), 4);
/// ```
pub struct SyncVec<T> {
    store: Store<Vec<T>>,
}

impl<T> SyncVec<T> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self {
            store: Store::new(Vec::new()),
        }
    }

    /// Creates an empty sequence with room for at least `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Store::new(Vec::with_capacity(capacity)),
        }
    }

    /// Returns the number of elements in the sequence.
    pub fn len(&self) -> usize {
        self.store.read(Vec::len)
    }

    /// Returns `true` if the sequence contains no elements.
    pub fn is_empty(&self) -> bool {
        self.store.read(Vec::is_empty)
    }

    /// Appends an element to the back of the sequence.
    pub fn push(&self, value: T) {
        self.store.write(|v| v.push(value))
    }

    /// Appends every element of `values`, in order, as one operation.
    ///
    /// No other thread observes a state in which only some of the values
    /// have been appended.
    ///
    /// The values are collected before the lock is taken, so `values` may
    /// itself read from this sequence.
    pub fn extend<I: IntoIterator<Item = T>>(&self, values: I) {
        let values: Vec<T> = values.into_iter().collect();
        self.store.write(|v| v.extend(values))
    }

    /// Inserts an element at position `index`, shifting later elements back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use syncol::{Error, SyncVec};
    ///
    /// let sequence = SyncVec::from(vec!['a', 'c']);
    /// sequence.insert(1, 'b').unwrap();
    /// assert_eq!(sequence.to_vec(), vec!['a', 'b', 'c']);
    ///
    /// assert_eq!(
    ///     sequence.insert(4, 'z'),
    ///     Err(Error::IndexOutOfRange { index: 4, len: 3 })
    /// );
    /// ```
    pub fn insert(&self, index: usize, value: T) -> Result<()> {
        self.store.write(|v| {
            if index > v.len() {
                return Err(Error::IndexOutOfRange {
                    index,
                    len: v.len(),
                });
            }
            v.insert(index, value);
            Ok(())
        })
    }

    /// Replaces the element at `index`, returning the element it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn replace(&self, index: usize, value: T) -> Result<T> {
        self.store.write(|v| {
            let len = v.len();
            v.get_mut(index)
                .map(|slot| std::mem::replace(slot, value))
                .ok_or(Error::IndexOutOfRange { index, len })
        })
    }

    /// Removes the last element, if there is one.
    pub fn remove_last(&self) {
        self.store.write(|v| {
            v.pop();
        })
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn remove_at(&self, index: usize) -> Result<T> {
        self.store.write(|v| {
            if index >= v.len() {
                return Err(Error::IndexOutOfRange {
                    index,
                    len: v.len(),
                });
            }
            Ok(v.remove(index))
        })
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the sequence is empty at the
    /// moment the lock is acquired.
    ///
    /// # Examples
    ///
    /// ```
    /// use syncol::{Error, SyncVec};
    ///
    /// let sequence = SyncVec::from(vec![1]);
    /// assert_eq!(sequence.pop_last(), Ok(1));
    /// assert_eq!(sequence.pop_last(), Err(Error::EmptyContainer));
    /// ```
    pub fn pop_last(&self) -> Result<T> {
        self.store.write(|v| v.pop().ok_or(Error::EmptyContainer))
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the sequence is empty at the
    /// moment the lock is acquired.
    pub fn pop_first(&self) -> Result<T> {
        self.store.write(|v| {
            if v.is_empty() {
                Err(Error::EmptyContainer)
            } else {
                Ok(v.remove(0))
            }
        })
    }

    /// Consumes the sequence, returning its elements.
    pub fn into_inner(self) -> Vec<T> {
        self.store.into_inner()
    }
}

impl<T: Clone> SyncVec<T> {
    /// Returns a copy of the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<T> {
        self.store.read(|v| {
            v.get(index).cloned().ok_or(Error::IndexOutOfRange {
                index,
                len: v.len(),
            })
        })
    }

    /// Returns a copy of the first element, or `None` if the sequence is empty.
    pub fn first(&self) -> Option<T> {
        self.store.read(|v| v.first().cloned())
    }

    /// Returns a copy of the last element, or `None` if the sequence is empty.
    pub fn last(&self) -> Option<T> {
        self.store.read(|v| v.last().cloned())
    }

    /// Returns a snapshot of the sequence's elements, in order.
    pub fn to_vec(&self) -> Vec<T> {
        self.store.snapshot()
    }

    /// Returns an independently locked copy of the sequence.
    pub fn duplicate(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T: PartialEq> SyncVec<T> {
    /// Removes the first element equal to `value`.
    ///
    /// Returns whether an element was removed. Removing an absent value
    /// leaves the sequence unchanged.
    pub fn remove(&self, value: &T) -> bool {
        self.store.write(|v| match v.iter().position(|x| x == value) {
            Some(index) => {
                v.remove(index);
                true
            }
            None => false,
        })
    }
}

impl<T: Clone + Eq + Hash> SyncVec<T> {
    /// Returns a snapshot of the sequence's distinct elements.
    pub fn to_set(&self) -> HashSet<T> {
        self.store.read(|v| v.iter().cloned().collect())
    }
}

impl<T> Default for SyncVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SyncVec<T> {
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

impl<T> From<Vec<T>> for SyncVec<T> {
    fn from(values: Vec<T>) -> Self {
        Self {
            store: Store::new(values),
        }
    }
}

impl<T> From<HashSet<T>> for SyncVec<T> {
    /// Creates a sequence holding the elements of `set` in arbitrary order.
    fn from(set: HashSet<T>) -> Self {
        set.into_iter().collect()
    }
}

impl<T> FromIterator<T> for SyncVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T: Clone + PartialEq> PartialEq for SyncVec<T> {
    fn eq(&self, other: &Self) -> bool {
        let theirs = other.to_vec();
        self.store.read(|ours| *ours == theirs)
    }
}

impl<T: Clone + Eq> Eq for SyncVec<T> {}

impl<T: fmt::Debug> fmt::Debug for SyncVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.store.read(|v| f.debug_list().entries(v.iter()).finish())
    }
}

impl<T: Serialize> Serialize for SyncVec<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.store.read(|v| v.serialize(serializer))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for SyncVec<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> SyncVec<char> {
        SyncVec::from(vec!['a', 'b', 'c'])
    }

    mod get {
        use super::*;

        #[test]
        fn returns_element_at_index() {
            assert_eq!(abc().get(1), Ok('b'));
        }

        #[test]
        fn fails_at_len() {
            assert_eq!(
                abc().get(3),
                Err(Error::IndexOutOfRange { index: 3, len: 3 })
            );
        }
    }

    mod insert {
        use super::*;

        #[test]
        fn get_returns_inserted_value_and_len_grows_by_one() {
            let sequence = abc();
            for index in 0..=sequence.len() {
                let len = sequence.len();
                sequence.insert(index, 'x').unwrap();
                assert_eq!(sequence.get(index), Ok('x'));
                assert_eq!(sequence.len(), len + 1);
            }
        }

        #[test]
        fn accepts_index_equal_to_len() {
            let sequence = abc();
            sequence.insert(3, 'd').unwrap();
            assert_eq!(sequence.last(), Some('d'));
        }

        #[test]
        fn rejects_index_past_len() {
            let sequence = abc();
            assert_eq!(
                sequence.insert(4, 'x'),
                Err(Error::IndexOutOfRange { index: 4, len: 3 })
            );
            assert_eq!(sequence.len(), 3);
        }
    }

    mod replace {
        use super::*;

        #[test]
        fn returns_previous_element() {
            let sequence = abc();
            assert_eq!(sequence.replace(0, 'z'), Ok('a'));
            assert_eq!(sequence.to_vec(), vec!['z', 'b', 'c']);
        }

        #[test]
        fn rejects_index_equal_to_len() {
            assert_eq!(
                abc().replace(3, 'z'),
                Err(Error::IndexOutOfRange { index: 3, len: 3 })
            );
        }
    }

    mod remove {
        use super::*;

        #[test]
        fn removes_only_first_match() {
            let sequence = SyncVec::from(vec![1, 2, 1]);
            assert!(sequence.remove(&1));
            assert_eq!(sequence.to_vec(), vec![2, 1]);
        }

        #[test]
        fn absent_value_is_a_no_op() {
            let sequence = abc();
            assert!(!sequence.remove(&'z'));
            assert_eq!(sequence.to_vec(), vec!['a', 'b', 'c']);
        }

        #[test]
        fn remove_last_on_empty_is_a_no_op() {
            let sequence: SyncVec<u8> = SyncVec::new();
            sequence.remove_last();
            assert!(sequence.is_empty());
        }

        #[test]
        fn remove_at_returns_removed_element() {
            let sequence = abc();
            assert_eq!(sequence.remove_at(1), Ok('b'));
            assert_eq!(sequence.to_vec(), vec!['a', 'c']);
        }

        #[test]
        fn remove_at_rejects_invalid_index() {
            assert_eq!(
                abc().remove_at(5),
                Err(Error::IndexOutOfRange { index: 5, len: 3 })
            );
        }
    }

    mod pop {
        use super::*;

        #[test]
        fn pop_last_returns_what_get_returned() {
            let sequence = abc();
            let len = sequence.len();
            let expected = sequence.get(len - 1).unwrap();
            assert_eq!(sequence.pop_last(), Ok(expected));
            assert_eq!(sequence.len(), len - 1);
        }

        #[test]
        fn pop_first_returns_front() {
            let sequence = abc();
            assert_eq!(sequence.pop_first(), Ok('a'));
            assert_eq!(sequence.to_vec(), vec!['b', 'c']);
        }

        #[test]
        fn pops_fail_when_empty() {
            let sequence: SyncVec<u8> = SyncVec::new();
            assert_eq!(sequence.pop_last(), Err(Error::EmptyContainer));
            assert_eq!(sequence.pop_first(), Err(Error::EmptyContainer));
        }
    }

    mod snapshot {
        use super::*;

        #[test]
        fn is_not_affected_by_later_mutation() {
            let sequence = abc();
            let snapshot = sequence.to_vec();
            sequence.push('d');
            assert_eq!(snapshot, vec!['a', 'b', 'c']);
        }

        #[test]
        fn to_set_collapses_duplicates() {
            let sequence = SyncVec::from(vec![1, 1, 2]);
            assert_eq!(sequence.to_set(), HashSet::from([1, 2]));
        }

        #[test]
        fn duplicate_is_independent() {
            let sequence = abc();
            let copy = sequence.duplicate();
            copy.push('d');
            assert_eq!(sequence.len(), 3);
            assert_eq!(copy.len(), 4);
        }
    }

    mod extend {
        use super::*;

        #[test]
        fn appends_in_order() {
            let sequence = abc();
            sequence.extend(vec!['d', 'e']);
            assert_eq!(sequence.to_vec(), vec!['a', 'b', 'c', 'd', 'e']);
        }

        #[test]
        fn values_may_read_from_the_same_sequence() {
            let sequence = SyncVec::from(vec![1, 2]);
            sequence.extend((0..2).map(|_| sequence.len()));
            assert_eq!(sequence.to_vec(), vec![1, 2, 2, 2]);
        }
    }

    #[test]
    fn peeks_do_not_remove() {
        let sequence = abc();
        assert_eq!(sequence.first(), Some('a'));
        assert_eq!(sequence.last(), Some('c'));
        assert_eq!(sequence.len(), 3);
    }

    #[test]
    fn debug_lists_elements() {
        assert_eq!(format!("{:?}", abc()), "['a', 'b', 'c']");
    }
}
