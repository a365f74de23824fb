//! A sequential specification of a key-value map.
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::specifications::Specification;

use MapOperation::{Get, Insert, Len, Remove};

/// An operation for a key-value map.
///
/// The trailing [`Option`] of each operation holds its return value, or
/// `None` if the return value is not-yet-known.
#[derive(Debug, Clone)]
pub enum MapOperation<K, V> {
    /// Associate a value with a key, returning the value it replaced.
    Insert(K, V, Option<Option<V>>),
    /// Remove a key, returning its value.
    Remove(K, Option<Option<V>>),
    /// Return the value associated with a key.
    Get(K, Option<Option<V>>),
    /// Return the number of entries in the map.
    Len(Option<usize>),
}

/// A specification of a map from keys of type `K` to values of type `V`.
pub struct MapSpecification<K, V> {
    data_type: PhantomData<(K, V)>,
}

impl<K, V> Specification for MapSpecification<K, V>
where
    K: Clone + Debug + Ord + Hash,
    V: Clone + Debug + Eq + Hash,
{
    type State = BTreeMap<K, V>;
    type Operation = MapOperation<K, V>;

    fn init() -> Self::State {
        BTreeMap::new()
    }

    fn apply(operation: &Self::Operation, state: &Self::State) -> (bool, Self::State) {
        match operation {
            Insert(key, value, result) => match result {
                Some(previous) => {
                    let mut new_state = state.clone();
                    let valid = new_state.insert(key.clone(), value.clone()) == *previous;
                    (valid, if valid { new_state } else { state.clone() })
                }
                None => panic!("Cannot apply Insert with an unknown return value."),
            },
            Remove(key, result) => match result {
                Some(previous) => {
                    let mut new_state = state.clone();
                    let valid = new_state.remove(key) == *previous;
                    (valid, if valid { new_state } else { state.clone() })
                }
                None => panic!("Cannot apply Remove with an unknown return value."),
            },
            Get(key, result) => match result {
                Some(value) => (state.get(key) == value.as_ref(), state.clone()),
                None => panic!("Cannot apply Get with an unknown return value."),
            },
            Len(result) => match result {
                Some(len) => (*len == state.len(), state.clone()),
                None => panic!("Cannot apply Len with an unknown return value."),
            },
        }
    }
}
