//! Memoized per-graph attributes

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::community::Communities;
use crate::error::Result;
use crate::graph::{NodeKey, NodeMap};
use crate::roles::Role;

/// A single cached value, tagged with the key it was computed for.
///
/// The lock is held across check, compute and write so that concurrent
/// callers compute a value at most once.
pub(crate) struct Memo<K, T> {
    slot: Mutex<Option<(K, Arc<T>)>>,
}

impl<K: PartialEq, T> Memo<K, T> {
    pub(crate) fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    // The slot only ever holds a complete value, so a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, Option<(K, Arc<T>)>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached value regardless of the key it was computed for
    pub(crate) fn peek(&self) -> Option<Arc<T>> {
        self.lock().as_ref().map(|(_, value)| Arc::clone(value))
    }

    /// Return the value cached for `key`, computing and storing it on a miss.
    ///
    /// A value cached under a different key is replaced.
    pub(crate) fn get_or_try_insert_with<F>(&self, key: K, compute: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        let mut slot = self.lock();
        if let Some((cached_key, value)) = slot.as_ref() {
            if *cached_key == key {
                return Ok(Arc::clone(value));
            }
        }

        let value = Arc::new(compute()?);
        *slot = Some((key, Arc::clone(&value)));
        Ok(value)
    }

    pub(crate) fn clear(&self) {
        *self.lock() = None;
    }
}

/// Size of a stage result, reported to progress observers
pub(crate) trait StageOutput {
    fn entries(&self) -> usize;
}

impl<K: Eq + Hash, V> StageOutput for HashMap<K, V> {
    fn entries(&self) -> usize {
        self.len()
    }
}

impl<N: NodeKey> StageOutput for Communities<N> {
    fn entries(&self) -> usize {
        self.len()
    }
}

/// The four derived attributes a graph carries.
///
/// Community assignment does not depend on the caller's weight key; the
/// other three are keyed by it.
pub(crate) struct NodeAttributes<N: NodeKey> {
    pub(crate) communities: Memo<(), Communities<N>>,
    pub(crate) within_degrees: Memo<String, NodeMap<N, f64>>,
    pub(crate) participation: Memo<String, NodeMap<N, f64>>,
    pub(crate) roles: Memo<String, NodeMap<N, Role>>,
}

impl<N: NodeKey> NodeAttributes<N> {
    pub(crate) fn new() -> Self {
        Self {
            communities: Memo::new(),
            within_degrees: Memo::new(),
            participation: Memo::new(),
            roles: Memo::new(),
        }
    }

    pub(crate) fn clear(&self) {
        self.roles.clear();
        self.participation.clear();
        self.within_degrees.clear();
        self.communities.clear();
    }
}
