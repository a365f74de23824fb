//! Checking [linearizability](https://en.wikipedia.org/wiki/Linearizability) of a
//! history of operations applied to a shared collection.
//!
//! For more information, see the documentation of the [`WGLChecker`] and [`History`] structs.
use std::collections::HashSet;
use std::marker::PhantomData;

use crate::linearizability::history::{Entry, History};
use crate::specifications::Specification;

pub mod history;

/// A linearizability checker.
///
/// An implementation of the algorithm originally defined by Jeannette Wing and Chun Gong
/// [\[WG93\]](https://www.cs.cmu.edu/~wing/publications/WingGong93.pdf), and
/// extended by Gavin Lowe [\[L17\]](http://www.cs.ox.ac.uk/people/gavin.lowe/LinearizabiltyTesting/).
/// This particular implementation is based on the description given by Alex Horn
/// and Daniel Kroenig [\[HK15\]](https://arxiv.org/abs/1504.00204).
///
/// Given a history of operations, the algorithm works by linearizing each operation
/// as soon as possible. When an operation cannot be linearized, it backtracks and
/// proceeds with the next operation. Memoization occurs by caching each partial
/// linearization, and preventing the algorithm from continuing its search when it
/// is already known that the state of the object and remaining operations have no
/// valid linearization.
///
/// # Examples
///
/// Using the [`SetSpecification`](crate::specifications::set::SetSpecification),
/// the call of an insert is modeled by `Call(Insert(x, None))`, and a response
/// reporting that `x` was newly added by `Response(Insert(x, Some(true)))`.
/// The [`Option`] is needed because the return value cannot be known until
/// the operation responds.
///
/// ```
/// use syncol_utils::linearizability::{WGLChecker, history::{History, Action::{Call, Response}}};
/// use syncol_utils::specifications::set::{SetOperation::{Contains, Insert}, SetSpecification};
///
/// type SetChecker = WGLChecker<SetSpecification<u32>>;
///
/// // A membership test that overlaps an insert may see either state.
/// // P0 |--------------| Insert(1)
/// // P1    |---|         Contains(1) -> true
/// let history = History::from_actions(vec![
///     (0, Call(Insert(1, None))),
///     (1, Call(Contains(1, None))),
///     (1, Response(Contains(1, Some(true)))),
///     (0, Response(Insert(1, Some(true)))),
/// ]);
/// assert!(SetChecker::is_linearizable(history));
///
/// // But once the insert has returned, the value must be visible.
/// // P0 |---|            Insert(1)
/// // P1       |---|      Contains(1) -> false
/// let history = History::from_actions(vec![
///     (0, Call(Insert(1, None))),
///     (0, Response(Insert(1, Some(true)))),
///     (1, Call(Contains(1, None))),
///     (1, Response(Contains(1, Some(false)))),
/// ]);
/// assert!(!SetChecker::is_linearizable(history));
/// ```
///
/// # Implementations in Other Languages
///
/// For an implementation in C++, see [`linearizability-checker`](https://github.com/ahorn/linearizability-checker).
/// For an implementation in Go, see [`porcupine`](https://github.com/anishathalye/porcupine).
pub struct WGLChecker<S: Specification> {
    data_type: PhantomData<S>,
}

type OperationEntry<S> = Entry<<S as Specification>::Operation>;
type OperationCall<S> = (
    (OperationEntry<S>, OperationEntry<S>),
    <S as Specification>::State,
);

impl<S: Specification> WGLChecker<S> {
    /// Returns whether the history of operations is linearizable with respect to the specification.
    pub fn is_linearizable(mut history: History<S::Operation>) -> bool {
        let mut state = S::init();
        let mut linearized = vec![false; history.len()];
        let mut calls: Vec<OperationCall<S>> = Vec::new();
        let mut cache: HashSet<(Vec<bool>, S::State)> = HashSet::new();
        let mut curr = 0;
        loop {
            if history.is_empty() {
                return true;
            }
            match &history[curr] {
                Entry::Call(call) => match &history[history.index_of_id(call.response)] {
                    Entry::Call(_) => panic!("Response cannot be a call entry"),
                    Entry::Response(response) => {
                        let (is_valid, new_state) = S::apply(&response.operation, &state);
                        let mut changed = false;
                        if is_valid {
                            let mut tmp_linearized = linearized.clone();
                            tmp_linearized[call.id] = true;
                            changed = cache.insert((tmp_linearized, new_state.clone()));
                        }
                        if changed {
                            linearized[call.id] = true;
                            let call = history.lift(curr);
                            calls.push((call, state));
                            state = new_state;
                            curr = 0;
                        } else {
                            curr += 1;
                        }
                    }
                },
                Entry::Response(_) => match calls.pop() {
                    None => return false,
                    Some(((call, response), old_state)) => {
                        state = old_state;
                        linearized[call.id()] = false;
                        let (call_index, _) = history.unlift(call, response);
                        curr = call_index + 1;
                    }
                },
            }
        }
    }
}
