//! Capability descriptors and the containers that can back them.
//!
//! A descriptor is the only thing a subject or observer knows about its
//! registry: a set of subscriber identities (`AbstractSet`) or a table of
//! handlers keyed by subject identity (`AbstractMap`, or the read-only
//! `AbstractConstMap`). Which container sits behind a descriptor, and who
//! owns it, is decided by the view adapters ([`SetView`](crate::SetView) and friends)
//! and the data adapters ([`SetData`](crate::SetData) and friends).
//!
//! Every operation takes `&self`. Subjects notify observers from inside
//! `signal`, and those observers may detach themselves (or others) while the
//! notification is still running, so the registry must accept mutation
//! during iteration.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::{BuildHasher, Hash};

use indexmap::{IndexMap, IndexSet};

use crate::ObserverError;

// -------------------------------------------------------------------------------------------------
// Descriptors
// -------------------------------------------------------------------------------------------------

/// Set-shaped capability descriptor.
pub trait AbstractSet<T> {
    /// Adds `item`. Returns `true` iff it was not present before.
    fn append(&self, item: T) -> bool;

    /// Removes `item`. Returns `true` iff it was present before.
    fn remove(&self, item: &T) -> bool;

    /// Visits every item currently present.
    ///
    /// The visitor may append or remove items while the walk is running. An
    /// item removed during the walk is not visited afterwards; whether an
    /// item appended during the walk is visited is unspecified.
    fn signal(&self, visit: &mut dyn FnMut(T));

    /// Number of items, counted through `signal`.
    fn len(&self) -> usize {
        let mut count = 0;
        self.signal(&mut |_| count += 1);
        count
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only map-shaped capability descriptor.
pub trait AbstractConstMap<K, V> {
    /// Returns a copy of the value stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError::KeyNotFound`] if `key` is absent.
    fn lookup(&self, key: &K) -> Result<V, ObserverError>;

    /// Visits every entry currently present, with the same mutation rules as
    /// [`AbstractSet::signal`].
    fn signal(&self, visit: &mut dyn FnMut(K, V));

    /// Number of entries, counted through `signal`.
    fn len(&self) -> usize {
        let mut count = 0;
        self.signal(&mut |_, _| count += 1);
        count
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Map-shaped capability descriptor.
pub trait AbstractMap<K, V>: AbstractConstMap<K, V> {
    /// Inserts or overwrites the value for `key`.
    fn define(&self, key: K, value: V);

    /// Removes the entry for `key`. Returns `true` iff it was present.
    fn remove(&self, key: &K) -> bool;
}

// -------------------------------------------------------------------------------------------------
// Containers
// -------------------------------------------------------------------------------------------------

/// A concrete set container a descriptor can be built over.
pub trait SetStore<T> {
    fn insert_item(&mut self, item: T) -> bool;
    fn remove_item(&mut self, item: &T) -> bool;
    fn contains_item(&self, item: &T) -> bool;
    /// Copies the current items out, in the container's iteration order.
    fn snapshot(&self) -> Vec<T>;
}

impl<T: Clone + Eq + Hash, S: BuildHasher> SetStore<T> for HashSet<T, S> {
    fn insert_item(&mut self, item: T) -> bool {
        self.insert(item)
    }

    fn remove_item(&mut self, item: &T) -> bool {
        self.remove(item)
    }

    fn contains_item(&self, item: &T) -> bool {
        self.contains(item)
    }

    fn snapshot(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Clone + Ord> SetStore<T> for BTreeSet<T> {
    fn insert_item(&mut self, item: T) -> bool {
        self.insert(item)
    }

    fn remove_item(&mut self, item: &T) -> bool {
        self.remove(item)
    }

    fn contains_item(&self, item: &T) -> bool {
        self.contains(item)
    }

    fn snapshot(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Clone + Eq + Hash, S: BuildHasher> SetStore<T> for IndexSet<T, S> {
    fn insert_item(&mut self, item: T) -> bool {
        self.insert(item)
    }

    // shift_remove keeps the remaining items in subscription order
    fn remove_item(&mut self, item: &T) -> bool {
        self.shift_remove(item)
    }

    fn contains_item(&self, item: &T) -> bool {
        self.contains(item)
    }

    fn snapshot(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

/// A concrete map container a descriptor can be built over.
pub trait MapStore<K, V> {
    fn insert_entry(&mut self, key: K, value: V);
    fn remove_entry(&mut self, key: &K) -> bool;
    fn get_entry(&self, key: &K) -> Option<V>;
    fn contains_entry(&self, key: &K) -> bool;
    /// Copies the current entries out, in the container's iteration order.
    fn snapshot(&self) -> Vec<(K, V)>;
}

impl<K: Clone + Eq + Hash, V: Clone, S: BuildHasher> MapStore<K, V> for HashMap<K, V, S> {
    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn remove_entry(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    fn get_entry(&self, key: &K) -> Option<V> {
        self.get(key).cloned()
    }

    fn contains_entry(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn snapshot(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K: Clone + Ord, V: Clone> MapStore<K, V> for BTreeMap<K, V> {
    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn remove_entry(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    fn get_entry(&self, key: &K) -> Option<V> {
        self.get(key).cloned()
    }

    fn contains_entry(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn snapshot(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K: Clone + Eq + Hash, V: Clone, S: BuildHasher> MapStore<K, V> for IndexMap<K, V, S> {
    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn remove_entry(&mut self, key: &K) -> bool {
        self.shift_remove(key).is_some()
    }

    fn get_entry(&self, key: &K) -> Option<V> {
        self.get(key).cloned()
    }

    fn contains_entry(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn snapshot(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

// -------------------------------------------------------------------------------------------------
// Shared operations over a container cell
// -------------------------------------------------------------------------------------------------
//
// Views borrow the cell, data adapters own it; both run the same code. No
// borrow of the cell is held while a visitor runs.

pub(crate) fn set_append<T, C: SetStore<T> + ?Sized>(cell: &RefCell<C>, item: T) -> bool {
    cell.borrow_mut().insert_item(item)
}

pub(crate) fn set_remove<T, C: SetStore<T> + ?Sized>(cell: &RefCell<C>, item: &T) -> bool {
    cell.borrow_mut().remove_item(item)
}

pub(crate) fn set_signal<T, C: SetStore<T> + ?Sized>(
    cell: &RefCell<C>,
    visit: &mut dyn FnMut(T),
) {
    let items = cell.borrow().snapshot();
    for item in items {
        let present = cell.borrow().contains_item(&item);
        if present {
            visit(item);
        }
    }
}

pub(crate) fn map_define<K, V, C: MapStore<K, V> + ?Sized>(cell: &RefCell<C>, key: K, value: V) {
    cell.borrow_mut().insert_entry(key, value);
}

pub(crate) fn map_remove<K, V, C: MapStore<K, V> + ?Sized>(cell: &RefCell<C>, key: &K) -> bool {
    cell.borrow_mut().remove_entry(key)
}

pub(crate) fn map_lookup<K, V, C: MapStore<K, V> + ?Sized>(
    map: &C,
    key: &K,
) -> Result<V, ObserverError> {
    map.get_entry(key)
        .ok_or_else(ObserverError::key_not_found::<K>)
}

pub(crate) fn map_signal<K, V, C: MapStore<K, V> + ?Sized>(
    cell: &RefCell<C>,
    visit: &mut dyn FnMut(K, V),
) {
    let entries = cell.borrow().snapshot();
    for (key, value) in entries {
        let present = cell.borrow().contains_entry(&key);
        if present {
            visit(key, value);
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
