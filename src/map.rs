//! A thread-safe key-value map.
//!
//! See [`SyncMap`].
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::store::Store;

pub(crate) mod dispatch;
use self::dispatch::Dispatcher;

/// A map from keys to values that can be shared between threads.
///
/// Each synchronous operation acquires the map's lock exactly once, and
/// values are returned by copy.
///
/// Read-style queries also come in an asynchronous flavour, e.g.
/// [`get_async`](SyncMap::get_async), which return immediately and deliver
/// their result to a callback. Asynchronous queries on one map run one at a
/// time, in the order they were made, on a background thread belonging to
/// that map. No ordering is promised between them and synchronous calls made
/// concurrently from other threads.
///
/// # Examples
///
/// A missing key and a key holding an "empty" value are told apart.
///
/// ```
/// use syncol::SyncMap;
///
/// let nicknames: SyncMap<&str, Option<&str>> = SyncMap::new();
/// nicknames.insert("ada", Some("countess"));
/// nicknames.insert("alan", None);
///
/// assert_eq!(nicknames.get("ada"), Some(Some("countess")));
/// assert_eq!(nicknames.get("alan"), Some(None));
/// assert_eq!(nicknames.get("grace"), None);
/// ```
pub struct SyncMap<K, V> {
    store: Arc<Store<HashMap<K, V>>>,
    dispatcher: Dispatcher,
}

impl<K, V> SyncMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::from(HashMap::new())
    }

    /// Creates an empty map with room for at least `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from(HashMap::with_capacity(capacity))
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.store.read(HashMap::len)
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.store.read(HashMap::is_empty)
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.store.write(HashMap::clear)
    }
}

impl<K: Eq + Hash, V> SyncMap<K, V> {
    /// Returns `true` if the map contains `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.store.read(|map| map.contains_key(key))
    }

    /// Associates `value` with `key`, returning the value it replaced.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.store.write(|map| map.insert(key, value))
    }

    /// Inserts every entry of `other` as one operation, overwriting values
    /// of keys that are already present.
    ///
    /// The entries are collected before the lock is taken, so `other` may
    /// itself read from this map.
    pub fn merge<I: IntoIterator<Item = (K, V)>>(&self, other: I) {
        let entries: Vec<(K, V)> = other.into_iter().collect();
        self.store.write(|map| map.extend(entries))
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.store.write(|map| map.remove(key))
    }

    /// Removes every key in `keys` as one operation. Absent keys are ignored.
    ///
    /// The keys are collected before the lock is taken.
    pub fn remove_all<'a, Q, I>(&self, keys: I)
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        let keys: Vec<&Q> = keys.into_iter().collect();
        self.store.write(|map| {
            for key in keys {
                map.remove(key);
            }
        })
    }
}

impl<K: Eq + Hash, V: Clone> SyncMap<K, V> {
    /// Returns a copy of the value associated with `key`, or `None` if the
    /// map does not contain `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.store.read(|map| map.get(key).cloned())
    }
}

impl<K: Clone, V: Clone> SyncMap<K, V> {
    /// Returns a snapshot of every key, in arbitrary order.
    pub fn keys(&self) -> Vec<K> {
        self.store.read(|map| map.keys().cloned().collect())
    }

    /// Returns a snapshot of every value, in arbitrary order.
    pub fn values(&self) -> Vec<V> {
        self.store.read(|map| map.values().cloned().collect())
    }

    /// Returns a snapshot of the map's entries.
    pub fn to_map(&self) -> HashMap<K, V> {
        self.store.snapshot()
    }

    /// Returns an independently locked copy of the map, with its own
    /// background queue.
    pub fn duplicate(&self) -> Self {
        Self::from(self.to_map())
    }
}

impl<K: Clone, V: PartialEq> SyncMap<K, V> {
    /// Returns every key whose value equals `value`.
    pub fn keys_for_value(&self, value: &V) -> Vec<K> {
        self.store.read(|map| {
            map.iter()
                .filter(|(_, v)| *v == value)
                .map(|(k, _)| k.clone())
                .collect()
        })
    }
}

impl<K, V> SyncMap<K, V>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Queues a count of the map's entries and passes it to `callback`.
    ///
    /// Returns without waiting for the count to be taken.
    pub fn len_async<F>(&self, callback: F)
    where
        F: FnOnce(usize) + Send + 'static,
    {
        let store = self.store.clone();
        self.dispatcher
            .submit(Box::new(move || callback(store.read(HashMap::len))));
    }
}

impl<K, V> SyncMap<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Queues a lookup of `key` and passes the key, together with a copy of
    /// its value or `None` if absent, to `callback`.
    ///
    /// Returns without waiting for the lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::mpsc;
    /// use syncol::SyncMap;
    ///
    /// let map = SyncMap::from_iter([("answer", 42)]);
    /// let (tx, rx) = mpsc::channel();
    ///
    /// map.get_async("answer", move |key, value| tx.send((key, value)).unwrap());
    ///
    /// assert_eq!(rx.recv().unwrap(), ("answer", Some(42)));
    /// ```
    pub fn get_async<F>(&self, key: K, callback: F)
    where
        F: FnOnce(K, Option<V>) + Send + 'static,
    {
        let store = self.store.clone();
        self.dispatcher.submit(Box::new(move || {
            let value = store.read(|map| map.get(&key).cloned());
            callback(key, value)
        }));
    }

    /// Queues a snapshot of every value and passes it to `callback`.
    ///
    /// Returns without waiting for the snapshot.
    pub fn values_async<F>(&self, callback: F)
    where
        F: FnOnce(Vec<V>) + Send + 'static,
    {
        let store = self.store.clone();
        self.dispatcher.submit(Box::new(move || {
            let values = store.read(|map| map.values().cloned().collect());
            callback(values)
        }));
    }
}

impl<K, V> Default for SyncMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for SyncMap<K, V> {
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

impl<K, V> From<HashMap<K, V>> for SyncMap<K, V> {
    fn from(map: HashMap<K, V>) -> Self {
        Self {
            store: Arc::new(Store::new(map)),
            dispatcher: Dispatcher::new(),
        }
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for SyncMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<HashMap<K, V>>())
    }
}

impl<K, V> PartialEq for SyncMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        let theirs = other.to_map();
        self.store.read(|ours| *ours == theirs)
    }
}

impl<K: Clone + Eq + Hash, V: Clone + Eq> Eq for SyncMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SyncMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.store.read(|map| f.debug_map().entries(map.iter()).finish())
    }
}

impl<K: Serialize, V: Serialize> Serialize for SyncMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.store.read(|map| map.serialize(serializer))
    }
}

impl<'de, K, V> Deserialize<'de> for SyncMap<K, V>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        HashMap::deserialize(deserializer).map(Self::from)
    }
}
