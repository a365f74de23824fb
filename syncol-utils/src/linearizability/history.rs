//! Histories of operations performed on a shared object.
//!
//! A history is a sequence of [`Entry`] values, each marking either the call
//! of an operation by some process or the response it eventually received.
use std::collections::HashMap;
use std::ops::Index;

/// An identifier for a process (or thread).
pub type ProcessId = usize;

type EntryId = usize;

/// Something a process did to a shared object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<T> {
    /// The process started performing an operation.
    Call(T),
    /// The operation the process started has finished.
    Response(T),
}

/// The call of an operation, together with a link to its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEntry<T> {
    pub id: EntryId,
    pub operation: T,
    pub response: EntryId,
}

/// The response to an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEntry<T> {
    pub id: EntryId,
    pub operation: T,
}

/// An entry in a [`History`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<T> {
    Call(CallEntry<T>),
    Response(ResponseEntry<T>),
}

impl<T> Entry<T> {
    pub fn id(&self) -> EntryId {
        match self {
            Entry::Call(call) => call.id,
            Entry::Response(response) => response.id,
        }
    }
}

/// A complete history of operations, in the order in which they occured.
///
/// Entries can be temporarily [lifted](History::lift) out of the history and
/// later put back exactly where they came from with
/// [`unlift`](History::unlift).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History<T> {
    entries: Vec<Entry<T>>,
    // When an entry is removed from this history, its index is recorded here.
    removed_from: Vec<Option<usize>>,
}

impl<T> History<T> {
    /// Creates a history from a sequence of actions.
    ///
    /// Each call is paired with the next response made by the same process.
    ///
    /// # Panics
    ///
    /// Panics if a process calls an operation while its previous call is
    /// still outstanding, if a response has no matching call, or if a call
    /// never receives a response.
    pub fn from_actions(actions: Vec<(ProcessId, Action<T>)>) -> Self {
        let mut outstanding: HashMap<ProcessId, EntryId> = HashMap::new();
        let mut responses: Vec<Option<EntryId>> = vec![None; actions.len()];
        for (id, (process, action)) in actions.iter().enumerate() {
            match action {
                Action::Call(_) => {
                    if outstanding.insert(*process, id).is_some() {
                        panic!("Process {process} made a call before its previous call returned");
                    }
                }
                Action::Response(_) => match outstanding.remove(process) {
                    Some(call) => responses[call] = Some(id),
                    None => panic!("Process {process} received a response without a call"),
                },
            }
        }
        if let Some(process) = outstanding.keys().next() {
            panic!("Process {process} made a call that never returned");
        }

        let num_entries = actions.len();
        let entries = actions
            .into_iter()
            .enumerate()
            .map(|(id, (_, action))| match action {
                Action::Call(operation) => Entry::Call(CallEntry {
                    id,
                    operation,
                    response: responses[id].expect("every call was paired with a response"),
                }),
                Action::Response(operation) => Entry::Response(ResponseEntry { id, operation }),
            })
            .collect();
        Self {
            entries,
            removed_from: vec![None; num_entries],
        }
    }

    /// Returns the current index of the entry with the given id.
    ///
    /// # Panics
    ///
    /// Panics if no such entry is currently in the history.
    pub fn index_of_id(&self, id: EntryId) -> usize {
        match self.iter().position(|entry| entry.id() == id) {
            Some(index) => index,
            None => panic!("Entry {id} is not in the history"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Removes the call entry at index `i`, along with its response.
    ///
    /// # Panics
    ///
    /// Panics if the entry at index `i` is not a call.
    pub fn lift(&mut self, i: usize) -> (Entry<T>, Entry<T>) {
        let call = self.remove(i);
        let response_id = match &call {
            Entry::Call(entry) => entry.response,
            Entry::Response(entry) => panic!("Cannot lift response entry {}", entry.id),
        };
        let response = self.remove(self.index_of_id(response_id));
        (call, response)
    }

    /// Re-inserts a call and response that were previously lifted, returning
    /// the indices they were placed at.
    ///
    /// # Panics
    ///
    /// Panics if either entry was not previously lifted from this history.
    pub fn unlift(&mut self, call: Entry<T>, response: Entry<T>) -> (usize, usize) {
        let response_index = self.insert(response);
        let call_index = self.insert(call);
        (call_index, response_index)
    }

    fn insert(&mut self, entry: Entry<T>) -> usize {
        match self.removed_from[entry.id()].take() {
            Some(index) => {
                self.entries.insert(index, entry);
                index
            }
            None => panic!("Index that entry {} was removed from is unknown", entry.id()),
        }
    }

    fn remove(&mut self, i: usize) -> Entry<T> {
        let entry = self.entries.remove(i);
        self.removed_from[entry.id()] = Some(i);
        entry
    }
}

impl<T> Index<usize> for History<T> {
    type Output = Entry<T>;

    fn index(&self, i: usize) -> &Self::Output {
        self.entries.index(i)
    }
}
