//! Descriptors over caller-owned containers.
//!
//! A view borrows the container for `'a`; the borrow checker guarantees the
//! container outlives every subject or observer the view is bound to. The
//! caller keeps full access to the container through the same `RefCell`, so
//! it can inspect subscriptions while they are in use.

use std::cell::RefCell;
use std::fmt;

use crate::capability::{self, AbstractConstMap, AbstractMap, AbstractSet, MapStore, SetStore};
use crate::ObserverError;

/// Set descriptor over a borrowed `RefCell<C>`.
///
/// # Examples
///
/// ```rust
/// use observer_registry::{AbstractSet, SetView};
/// use std::cell::RefCell;
/// use std::collections::HashSet;
///
/// let names = RefCell::new(HashSet::new());
/// let view = SetView::new(&names);
///
/// assert!(view.append("alice"));
/// assert!(!view.append("alice"));
/// assert_eq!(names.borrow().len(), 1);
/// ```
pub struct SetView<'a, T> {
    set: &'a RefCell<dyn SetStore<T> + 'a>,
}

impl<'a, T> SetView<'a, T> {
    pub fn new<C: SetStore<T> + 'a>(set: &'a RefCell<C>) -> Self {
        Self { set }
    }
}

impl<T> Clone for SetView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SetView<'_, T> {}

impl<T> AbstractSet<T> for SetView<'_, T> {
    fn append(&self, item: T) -> bool {
        capability::set_append(self.set, item)
    }

    fn remove(&self, item: &T) -> bool {
        capability::set_remove(self.set, item)
    }

    fn signal(&self, visit: &mut dyn FnMut(T)) {
        capability::set_signal(self.set, visit)
    }
}

impl<T> fmt::Debug for SetView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetView").finish_non_exhaustive()
    }
}

/// Map descriptor over a borrowed `RefCell<C>`.
pub struct MapView<'a, K, V> {
    map: &'a RefCell<dyn MapStore<K, V> + 'a>,
}

impl<'a, K, V> MapView<'a, K, V> {
    pub fn new<C: MapStore<K, V> + 'a>(map: &'a RefCell<C>) -> Self {
        Self { map }
    }
}

impl<K, V> Clone for MapView<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for MapView<'_, K, V> {}

impl<K, V> AbstractConstMap<K, V> for MapView<'_, K, V> {
    fn lookup(&self, key: &K) -> Result<V, ObserverError> {
        capability::map_lookup(&*self.map.borrow(), key)
    }

    fn signal(&self, visit: &mut dyn FnMut(K, V)) {
        capability::map_signal(self.map, visit)
    }
}

impl<K, V> AbstractMap<K, V> for MapView<'_, K, V> {
    fn define(&self, key: K, value: V) {
        capability::map_define(self.map, key, value)
    }

    fn remove(&self, key: &K) -> bool {
        capability::map_remove(self.map, key)
    }
}

impl<K, V> fmt::Debug for MapView<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapView").finish_non_exhaustive()
    }
}

/// Read-only map descriptor over a shared borrow of a container.
///
/// The container cannot change while the view exists, so no `RefCell` is
/// needed.
pub struct ConstMapView<'a, K, V> {
    map: &'a (dyn MapStore<K, V> + 'a),
}

impl<'a, K, V> ConstMapView<'a, K, V> {
    pub fn new<C: MapStore<K, V> + 'a>(map: &'a C) -> Self {
        Self { map }
    }
}

impl<K, V> Clone for ConstMapView<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for ConstMapView<'_, K, V> {}

impl<K, V> AbstractConstMap<K, V> for ConstMapView<'_, K, V> {
    fn lookup(&self, key: &K) -> Result<V, ObserverError> {
        capability::map_lookup(self.map, key)
    }

    fn signal(&self, visit: &mut dyn FnMut(K, V)) {
        for (key, value) in self.map.snapshot() {
            visit(key, value);
        }
    }
}

impl<K, V> fmt::Debug for ConstMapView<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstMapView").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap, HashSet};

    #[test]
    fn test_set_view_writes_through_to_container() {
        let set = RefCell::new(HashSet::new());
        let view = SetView::new(&set);

        assert!(view.append(1));
        assert!(view.append(2));
        assert!(!view.append(1));
        assert_eq!(set.borrow().len(), 2);

        assert!(view.remove(&1));
        assert!(!view.remove(&1));
        assert_eq!(*set.borrow(), HashSet::from([2]));
    }

    #[test]
    fn test_copies_of_a_view_share_the_container() {
        let set = RefCell::new(HashSet::new());
        let first = SetView::new(&set);
        let second = first;

        first.append('x');
        assert!(!second.append('x'));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_map_view_define_overwrites() {
        let map = RefCell::new(HashMap::new());
        let view = MapView::new(&map);

        view.define("k", 1);
        view.define("k", 2);
        assert_eq!(view.lookup(&"k"), Ok(2));
        assert_eq!(map.borrow().len(), 1);
    }

    #[test]
    fn test_map_view_lookup_absent() {
        let map: RefCell<HashMap<i32, i32>> = RefCell::new(HashMap::new());
        let view = MapView::new(&map);
        assert!(matches!(
            view.lookup(&3),
            Err(ObserverError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_const_map_view_signal_in_key_order() {
        let map = BTreeMap::from([(2, 'b'), (1, 'a')]);
        let view = ConstMapView::new(&map);

        let mut seen = Vec::new();
        view.signal(&mut |k, v| seen.push((k, v)));
        assert_eq!(seen, vec![(1, 'a'), (2, 'b')]);
        assert_eq!(view.lookup(&2), Ok('b'));
    }
}
