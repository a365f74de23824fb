//! A sequential specification of a set.
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::specifications::Specification;

use SetOperation::{Contains, Insert, Len, Remove};

/// An operation for a set.
///
/// The trailing [`Option`] of each operation holds its return value, or
/// `None` if the return value is not-yet-known.
#[derive(Debug, Clone)]
pub enum SetOperation<T> {
    /// Add a value, returning whether it was newly added.
    Insert(T, Option<bool>),
    /// Remove a value, returning whether it was present.
    Remove(T, Option<bool>),
    /// Return whether a value is present.
    Contains(T, Option<bool>),
    /// Return the number of elements in the set.
    Len(Option<usize>),
}

/// A specification of a set containing values of type `T`.
///
/// The state is kept ordered so that equal sets hash equally.
pub struct SetSpecification<T> {
    data_type: PhantomData<T>,
}

impl<T: Clone + Debug + Ord + Hash> Specification for SetSpecification<T> {
    type State = BTreeSet<T>;
    type Operation = SetOperation<T>;

    fn init() -> Self::State {
        BTreeSet::new()
    }

    fn apply(operation: &Self::Operation, state: &Self::State) -> (bool, Self::State) {
        match operation {
            Insert(value, result) => match result {
                Some(inserted) => {
                    let mut new_state = state.clone();
                    let valid = new_state.insert(value.clone()) == *inserted;
                    (valid, if valid { new_state } else { state.clone() })
                }
                None => panic!("Cannot apply Insert with an unknown return value."),
            },
            Remove(value, result) => match result {
                Some(removed) => {
                    let mut new_state = state.clone();
                    let valid = new_state.remove(value) == *removed;
                    (valid, if valid { new_state } else { state.clone() })
                }
                None => panic!("Cannot apply Remove with an unknown return value."),
            },
            Contains(value, result) => match result {
                Some(present) => (state.contains(value) == *present, state.clone()),
                None => panic!("Cannot apply Contains with an unknown return value."),
            },
            Len(result) => match result {
                Some(len) => (*len == state.len(), state.clone()),
                None => panic!("Cannot apply Len with an unknown return value."),
            },
        }
    }
}
