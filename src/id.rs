//! Identity wrappers for single-event subjects and observers.
//!
//! An id is a non-owning handle: it keeps no component alive and exposes no
//! operation of its own. The only thing a caller can do with one is hand it
//! back to [`SingleSubject`](crate::SingleSubject) or
//! [`SingleObserver`](crate::SingleObserver), which reach the component
//! through it internally. Ids are typed by role and by event, so an
//! `ObserverId<'a, Clicked>` is never accepted where a `SubjectId` or an id for
//! another event is expected.
//!
//! Equality, hashing and ordering go by the address of the component's heap
//! core, which stays reserved while any id to it exists.

use std::any::type_name;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use crate::observer::ObserverCore;
use crate::subject::SubjectCore;

/// Identity of a [`SingleSubject`](crate::SingleSubject) for event `E`.
pub struct SubjectId<'a, E> {
    core: Weak<SubjectCore<'a, E>>,
}

/// Identity of a [`SingleObserver`](crate::SingleObserver) for event `E`.
pub struct ObserverId<'a, E> {
    core: Weak<ObserverCore<'a, E>>,
}

impl<'a, E> SubjectId<'a, E> {
    pub(crate) fn of(core: &Rc<SubjectCore<'a, E>>) -> Self {
        Self {
            core: Rc::downgrade(core),
        }
    }

    /// The identity passed to handlers when an event is delivered without a
    /// subject. All unattributed ids of one event type compare equal.
    pub fn unattributed() -> Self {
        Self { core: Weak::new() }
    }

    /// Whether the subject behind this id still exists.
    pub fn is_live(&self) -> bool {
        self.core.strong_count() > 0
    }

    pub(crate) fn upgrade(&self) -> Option<Rc<SubjectCore<'a, E>>> {
        self.core.upgrade()
    }

    fn addr(&self) -> *const () {
        self.core.as_ptr() as *const ()
    }
}

impl<'a, E> ObserverId<'a, E> {
    pub(crate) fn of(core: &Rc<ObserverCore<'a, E>>) -> Self {
        Self {
            core: Rc::downgrade(core),
        }
    }

    /// Whether the observer behind this id still exists.
    pub fn is_live(&self) -> bool {
        self.core.strong_count() > 0
    }

    pub(crate) fn upgrade(&self) -> Option<Rc<ObserverCore<'a, E>>> {
        self.core.upgrade()
    }

    fn addr(&self) -> *const () {
        self.core.as_ptr() as *const ()
    }
}

macro_rules! impl_identity {
    ($id:ident) => {
        impl<E> Clone for $id<'_, E> {
            fn clone(&self) -> Self {
                Self {
                    core: Weak::clone(&self.core),
                }
            }
        }

        impl<E> PartialEq for $id<'_, E> {
            fn eq(&self, other: &Self) -> bool {
                self.addr() == other.addr()
            }
        }

        impl<E> Eq for $id<'_, E> {}

        impl<E> Hash for $id<'_, E> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.addr().hash(state);
            }
        }

        impl<E> PartialOrd for $id<'_, E> {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl<E> Ord for $id<'_, E> {
            fn cmp(&self, other: &Self) -> Ordering {
                (self.addr() as usize).cmp(&(other.addr() as usize))
            }
        }

        impl<E> fmt::Debug for $id<'_, E> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "{}<{}>({:p})",
                    stringify!($id),
                    type_name::<E>(),
                    self.addr()
                )
            }
        }
    };
}

impl_identity!(SubjectId);
impl_identity!(ObserverId);
