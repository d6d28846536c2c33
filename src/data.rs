//! Descriptors that own their container.
//!
//! The container is moved in and boxed behind a trait object, so a `SetData`
//! or `MapData` has the same shape whatever container backs it. Ownership is
//! unique: data descriptors move but never clone, and the container is
//! released when the descriptor is dropped or replaced.

use std::cell::RefCell;
use std::fmt;

use crate::capability::{self, AbstractConstMap, AbstractMap, AbstractSet, MapStore, SetStore};
use crate::ObserverError;

// -------------------------------------------------------------------------------------------------
// Owned containers
// -------------------------------------------------------------------------------------------------

struct OwnedSet<C>(RefCell<C>);

impl<T, C: SetStore<T>> AbstractSet<T> for OwnedSet<C> {
    fn append(&self, item: T) -> bool {
        capability::set_append(&self.0, item)
    }

    fn remove(&self, item: &T) -> bool {
        capability::set_remove(&self.0, item)
    }

    fn signal(&self, visit: &mut dyn FnMut(T)) {
        capability::set_signal(&self.0, visit)
    }
}

struct OwnedMap<C>(RefCell<C>);

impl<K, V, C: MapStore<K, V>> AbstractConstMap<K, V> for OwnedMap<C> {
    fn lookup(&self, key: &K) -> Result<V, ObserverError> {
        capability::map_lookup(&*self.0.borrow(), key)
    }

    fn signal(&self, visit: &mut dyn FnMut(K, V)) {
        capability::map_signal(&self.0, visit)
    }
}

impl<K, V, C: MapStore<K, V>> AbstractMap<K, V> for OwnedMap<C> {
    fn define(&self, key: K, value: V) {
        capability::map_define(&self.0, key, value)
    }

    fn remove(&self, key: &K) -> bool {
        capability::map_remove(&self.0, key)
    }
}

// Nothing can mutate a frozen container, so no cell is needed.
struct FrozenMap<C>(C);

impl<K, V, C: MapStore<K, V>> AbstractConstMap<K, V> for FrozenMap<C> {
    fn lookup(&self, key: &K) -> Result<V, ObserverError> {
        capability::map_lookup(&self.0, key)
    }

    fn signal(&self, visit: &mut dyn FnMut(K, V)) {
        for (key, value) in self.0.snapshot() {
            visit(key, value);
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Public descriptors
// -------------------------------------------------------------------------------------------------

/// Set descriptor owning its container.
///
/// # Examples
///
/// ```rust
/// use observer_registry::{AbstractSet, SetData};
/// use std::collections::BTreeSet;
///
/// let data = SetData::new(BTreeSet::from([3, 1]));
/// assert!(data.append(2));
///
/// let mut seen = Vec::new();
/// data.signal(&mut |n| seen.push(n));
/// assert_eq!(seen, vec![1, 2, 3]);
/// ```
pub struct SetData<'a, T> {
    set: Box<dyn AbstractSet<T> + 'a>,
}

impl<'a, T: 'a> SetData<'a, T> {
    /// Takes ownership of `container`.
    pub fn new<C: SetStore<T> + 'a>(container: C) -> Self {
        Self {
            set: Box::new(OwnedSet(RefCell::new(container))),
        }
    }
}

impl<T> AbstractSet<T> for SetData<'_, T> {
    fn append(&self, item: T) -> bool {
        self.set.append(item)
    }

    fn remove(&self, item: &T) -> bool {
        self.set.remove(item)
    }

    fn signal(&self, visit: &mut dyn FnMut(T)) {
        self.set.signal(visit)
    }
}

impl<T> fmt::Debug for SetData<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetData")
            .field("len", &self.set.len())
            .finish()
    }
}

/// Map descriptor owning its container, or any hand-written map descriptor.
pub struct MapData<'a, K, V> {
    map: Box<dyn AbstractMap<K, V> + 'a>,
}

impl<'a, K: 'a, V: 'a> MapData<'a, K, V> {
    /// Takes ownership of `container`.
    pub fn new<C: MapStore<K, V> + 'a>(container: C) -> Self {
        Self {
            map: Box::new(OwnedMap(RefCell::new(container))),
        }
    }

    /// Boxes a descriptor implementation that is not backed by a container.
    pub fn from_map<M: AbstractMap<K, V> + 'a>(map: M) -> Self {
        Self { map: Box::new(map) }
    }
}

impl<K, V> AbstractConstMap<K, V> for MapData<'_, K, V> {
    fn lookup(&self, key: &K) -> Result<V, ObserverError> {
        self.map.lookup(key)
    }

    fn signal(&self, visit: &mut dyn FnMut(K, V)) {
        self.map.signal(visit)
    }
}

impl<K, V> AbstractMap<K, V> for MapData<'_, K, V> {
    fn define(&self, key: K, value: V) {
        self.map.define(key, value)
    }

    fn remove(&self, key: &K) -> bool {
        self.map.remove(key)
    }
}

impl<K, V> fmt::Debug for MapData<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapData")
            .field("len", &self.map.len())
            .finish()
    }
}

/// Read-only map descriptor owning its container.
pub struct ConstMapData<'a, K, V> {
    map: Box<dyn AbstractConstMap<K, V> + 'a>,
}

impl<'a, K: 'a, V: 'a> ConstMapData<'a, K, V> {
    /// Takes ownership of `container` and freezes it.
    pub fn new<C: MapStore<K, V> + 'a>(container: C) -> Self {
        Self {
            map: Box::new(FrozenMap(container)),
        }
    }

    pub fn from_map<M: AbstractConstMap<K, V> + 'a>(map: M) -> Self {
        Self { map: Box::new(map) }
    }
}

impl<K, V> AbstractConstMap<K, V> for ConstMapData<'_, K, V> {
    fn lookup(&self, key: &K) -> Result<V, ObserverError> {
        self.map.lookup(key)
    }

    fn signal(&self, visit: &mut dyn FnMut(K, V)) {
        self.map.signal(visit)
    }
}

impl<K, V> fmt::Debug for ConstMapData<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstMapData")
            .field("len", &self.map.len())
            .finish()
    }
}

/// Presents a read-only map through the full map interface.
///
/// `define` does nothing and `remove` always reports `false`.
#[derive(Debug, Clone, Copy)]
pub struct ReadOnly<M>(pub M);

impl<K, V, M: AbstractConstMap<K, V>> AbstractConstMap<K, V> for ReadOnly<M> {
    fn lookup(&self, key: &K) -> Result<V, ObserverError> {
        self.0.lookup(key)
    }

    fn signal(&self, visit: &mut dyn FnMut(K, V)) {
        self.0.signal(visit)
    }
}

impl<K, V, M: AbstractConstMap<K, V>> AbstractMap<K, V> for ReadOnly<M> {
    fn define(&self, _key: K, _value: V) {}

    fn remove(&self, _key: &K) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexSet;
    use std::collections::HashMap;

    #[test]
    fn test_set_data_owns_its_container() {
        let data = SetData::new(IndexSet::new());
        assert!(data.append("a"));
        assert!(data.append("b"));
        assert!(!data.append("a"));
        assert!(data.remove(&"a"));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_map_data_define_remove_lookup() {
        let data = MapData::new(HashMap::new());
        data.define(1, "one");
        assert_eq!(data.lookup(&1), Ok("one"));
        assert!(data.remove(&1));
        assert!(!data.remove(&1));
        assert_eq!(
            data.lookup(&1),
            Err(ObserverError::KeyNotFound { key_type: "i32" })
        );
    }

    #[test]
    fn test_const_map_data_is_frozen() {
        let data = ConstMapData::new(HashMap::from([(1, 'x')]));
        assert_eq!(data.lookup(&1), Ok('x'));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_read_only_ignores_define_and_fails_remove() {
        let table = ReadOnly(ConstMapData::new(HashMap::from([(1, 'x')])));
        table.define(2, 'y');
        table.define(1, 'z');
        assert!(!table.remove(&1));
        assert_eq!(table.lookup(&1), Ok('x'));
        assert!(table.lookup(&2).is_err());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_map_data_from_custom_descriptor() {
        // A table that answers every key with the same value and stores nothing
        struct Constant(u8);

        impl AbstractConstMap<i32, u8> for Constant {
            fn lookup(&self, _key: &i32) -> Result<u8, ObserverError> {
                Ok(self.0)
            }

            fn signal(&self, _visit: &mut dyn FnMut(i32, u8)) {}
        }

        impl AbstractMap<i32, u8> for Constant {
            fn define(&self, _key: i32, _value: u8) {}

            fn remove(&self, _key: &i32) -> bool {
                true
            }
        }

        let data = MapData::from_map(Constant(9));
        assert_eq!(data.lookup(&-4), Ok(9));
        assert!(data.is_empty());
    }
}
