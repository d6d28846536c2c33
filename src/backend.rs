//! Runtime-selectable registry backends.
//!
//! A backend is either a view over a caller-owned container or a data
//! descriptor owning one. Subjects and observers hold a
//! backend, never a concrete adapter, so the storage strategy can be chosen
//! (and rebound) at runtime without changing their type.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;

use crate::capability::{AbstractConstMap, AbstractMap, AbstractSet};
use crate::data::{ConstMapData, MapData, ReadOnly, SetData};
use crate::view::{ConstMapView, MapView, SetView};
use crate::ObserverError;

/// Which adapter a backend currently forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Borrowed, caller-owned container.
    View,
    /// Owned container or hand-written descriptor.
    Data,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::View => write!(f, "view"),
            BackendKind::Data => write!(f, "data"),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Set
// -------------------------------------------------------------------------------------------------

/// A set descriptor that is either a view or owned data.
pub enum SetBackend<'a, T> {
    View(SetView<'a, T>),
    Data(SetData<'a, T>),
}

impl<T> SetBackend<'_, T> {
    pub fn kind(&self) -> BackendKind {
        match self {
            SetBackend::View(_) => BackendKind::View,
            SetBackend::Data(_) => BackendKind::Data,
        }
    }
}

impl<T> AbstractSet<T> for SetBackend<'_, T> {
    fn append(&self, item: T) -> bool {
        match self {
            SetBackend::View(view) => view.append(item),
            SetBackend::Data(data) => data.append(item),
        }
    }

    fn remove(&self, item: &T) -> bool {
        match self {
            SetBackend::View(view) => view.remove(item),
            SetBackend::Data(data) => data.remove(item),
        }
    }

    fn signal(&self, visit: &mut dyn FnMut(T)) {
        match self {
            SetBackend::View(view) => view.signal(visit),
            SetBackend::Data(data) => data.signal(visit),
        }
    }
}

/// An owned, empty, insertion-ordered set.
impl<'a, T: Clone + Eq + Hash + 'a> Default for SetBackend<'a, T> {
    fn default() -> Self {
        SetBackend::Data(SetData::new(IndexSet::new()))
    }
}

impl<'a, T> From<SetView<'a, T>> for SetBackend<'a, T> {
    fn from(view: SetView<'a, T>) -> Self {
        SetBackend::View(view)
    }
}

impl<'a, T> From<SetData<'a, T>> for SetBackend<'a, T> {
    fn from(data: SetData<'a, T>) -> Self {
        SetBackend::Data(data)
    }
}

impl<T> fmt::Debug for SetBackend<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetBackend::View(view) => f.debug_tuple("View").field(view).finish(),
            SetBackend::Data(data) => f.debug_tuple("Data").field(data).finish(),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Map
// -------------------------------------------------------------------------------------------------

/// A map descriptor that is either a view or owned data.
///
/// Read-only maps enter as `Data` wrapped in [`ReadOnly`].
pub enum MapBackend<'a, K, V> {
    View(MapView<'a, K, V>),
    Data(MapData<'a, K, V>),
}

impl<K, V> MapBackend<'_, K, V> {
    pub fn kind(&self) -> BackendKind {
        match self {
            MapBackend::View(_) => BackendKind::View,
            MapBackend::Data(_) => BackendKind::Data,
        }
    }
}

impl<K, V> AbstractConstMap<K, V> for MapBackend<'_, K, V> {
    fn lookup(&self, key: &K) -> Result<V, ObserverError> {
        match self {
            MapBackend::View(view) => view.lookup(key),
            MapBackend::Data(data) => data.lookup(key),
        }
    }

    fn signal(&self, visit: &mut dyn FnMut(K, V)) {
        match self {
            MapBackend::View(view) => view.signal(visit),
            MapBackend::Data(data) => data.signal(visit),
        }
    }
}

impl<K, V> AbstractMap<K, V> for MapBackend<'_, K, V> {
    fn define(&self, key: K, value: V) {
        match self {
            MapBackend::View(view) => view.define(key, value),
            MapBackend::Data(data) => data.define(key, value),
        }
    }

    fn remove(&self, key: &K) -> bool {
        match self {
            MapBackend::View(view) => AbstractMap::remove(view, key),
            MapBackend::Data(data) => AbstractMap::remove(data, key),
        }
    }
}

impl<'a, K, V> From<MapView<'a, K, V>> for MapBackend<'a, K, V> {
    fn from(view: MapView<'a, K, V>) -> Self {
        MapBackend::View(view)
    }
}

impl<'a, K, V> From<MapData<'a, K, V>> for MapBackend<'a, K, V> {
    fn from(data: MapData<'a, K, V>) -> Self {
        MapBackend::Data(data)
    }
}

impl<'a, K: 'a, V: 'a> From<ConstMapView<'a, K, V>> for MapBackend<'a, K, V> {
    fn from(view: ConstMapView<'a, K, V>) -> Self {
        MapBackend::Data(MapData::from_map(ReadOnly(view)))
    }
}

impl<'a, K: 'a, V: 'a> From<ConstMapData<'a, K, V>> for MapBackend<'a, K, V> {
    fn from(data: ConstMapData<'a, K, V>) -> Self {
        MapBackend::Data(MapData::from_map(ReadOnly(data)))
    }
}

impl<'a, K: 'a, V: 'a> From<ConstMapBackend<'a, K, V>> for MapBackend<'a, K, V> {
    fn from(backend: ConstMapBackend<'a, K, V>) -> Self {
        MapBackend::Data(MapData::from_map(ReadOnly(backend)))
    }
}

impl<K, V> fmt::Debug for MapBackend<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapBackend::View(view) => f.debug_tuple("View").field(view).finish(),
            MapBackend::Data(data) => f.debug_tuple("Data").field(data).finish(),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Const map
// -------------------------------------------------------------------------------------------------

/// A read-only map descriptor that is either a view or owned data.
pub enum ConstMapBackend<'a, K, V> {
    View(ConstMapView<'a, K, V>),
    Data(ConstMapData<'a, K, V>),
}

impl<K, V> ConstMapBackend<'_, K, V> {
    pub fn kind(&self) -> BackendKind {
        match self {
            ConstMapBackend::View(_) => BackendKind::View,
            ConstMapBackend::Data(_) => BackendKind::Data,
        }
    }
}

impl<K, V> AbstractConstMap<K, V> for ConstMapBackend<'_, K, V> {
    fn lookup(&self, key: &K) -> Result<V, ObserverError> {
        match self {
            ConstMapBackend::View(view) => view.lookup(key),
            ConstMapBackend::Data(data) => data.lookup(key),
        }
    }

    fn signal(&self, visit: &mut dyn FnMut(K, V)) {
        match self {
            ConstMapBackend::View(view) => view.signal(visit),
            ConstMapBackend::Data(data) => data.signal(visit),
        }
    }
}

impl<'a, K, V> From<ConstMapView<'a, K, V>> for ConstMapBackend<'a, K, V> {
    fn from(view: ConstMapView<'a, K, V>) -> Self {
        ConstMapBackend::View(view)
    }
}

impl<'a, K, V> From<ConstMapData<'a, K, V>> for ConstMapBackend<'a, K, V> {
    fn from(data: ConstMapData<'a, K, V>) -> Self {
        ConstMapBackend::Data(data)
    }
}

impl<K, V> fmt::Debug for ConstMapBackend<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstMapBackend::View(view) => f.debug_tuple("View").field(view).finish(),
            ConstMapBackend::Data(data) => f.debug_tuple("Data").field(data).finish(),
        }
    }
}
