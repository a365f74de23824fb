//! A sequential specification of an ordered sequence.
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::specifications::Specification;

use SequenceOperation::{Len, PopFirst, PopLast, Push};

/// An operation for an ordered sequence.
///
/// Operations that return a value carry an [`Option`], which is `None` when
/// the return value is not-yet-known. The value returned by a pop is itself
/// `None` when the sequence was empty.
#[derive(Debug, Clone)]
pub enum SequenceOperation<T> {
    /// Append a value to the back of the sequence.
    Push(T),
    /// Remove and return the front of the sequence.
    PopFirst(Option<Option<T>>),
    /// Remove and return the back of the sequence.
    PopLast(Option<Option<T>>),
    /// Return the number of elements in the sequence.
    Len(Option<usize>),
}

/// A specification of an ordered sequence containing values of type `T`.
///
/// # Examples
///
/// ```
/// use syncol_utils::specifications::Specification;
/// use syncol_utils::specifications::sequence::{
///     SequenceOperation::{PopLast, Push},
///     SequenceSpecification,
/// };
///
/// type Spec = SequenceSpecification<u32>;
///
/// let (_, state) = Spec::apply(&Push(1), &Spec::init());
/// let (valid, state) = Spec::apply(&PopLast(Some(Some(1))), &state);
/// assert!(valid);
///
/// // Popping from an empty sequence must report that it was empty.
/// let (valid, _) = Spec::apply(&PopLast(Some(Some(1))), &state);
/// assert!(!valid);
/// ```
pub struct SequenceSpecification<T> {
    data_type: PhantomData<T>,
}

impl<T: Clone + Debug + Eq + Hash> Specification for SequenceSpecification<T> {
    type State = Vec<T>;
    type Operation = SequenceOperation<T>;

    fn init() -> Self::State {
        Vec::new()
    }

    fn apply(operation: &Self::Operation, state: &Self::State) -> (bool, Self::State) {
        match operation {
            Push(value) => {
                let mut new_state = state.clone();
                new_state.push(value.clone());
                (true, new_state)
            }
            PopFirst(result) => match result {
                Some(popped) => {
                    let mut new_state = state.clone();
                    let front = if new_state.is_empty() {
                        None
                    } else {
                        Some(new_state.remove(0))
                    };
                    if front == *popped {
                        (true, new_state)
                    } else {
                        (false, state.clone())
                    }
                }
                None => panic!("Cannot apply PopFirst with an unknown return value."),
            },
            PopLast(result) => match result {
                Some(popped) => {
                    let mut new_state = state.clone();
                    if new_state.pop() == *popped {
                        (true, new_state)
                    } else {
                        (false, state.clone())
                    }
                }
                None => panic!("Cannot apply PopLast with an unknown return value."),
            },
            Len(result) => match result {
                Some(len) => (*len == state.len(), state.clone()),
                None => panic!("Cannot apply Len with an unknown return value."),
            },
        }
    }
}
